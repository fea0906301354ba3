pub mod gltf;

pub use self::gltf::load_gltf_scene;
