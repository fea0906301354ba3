// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "roomcast")]
#[command(about = "Living-room scene with a live TV screen", long_about = None)]
pub struct Cli {
    /// glTF model to load
    #[arg(long, default_value = "models/living_room_orange/scene.gltf")]
    pub model: PathBuf,

    /// Optional JSON config overriding camera/lights/roles/timing
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Still image bound to the screen at startup
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Remote snapshot endpoint polled for live refreshes
    #[arg(long)]
    pub snapshot_url: Option<String>,

    /// Directory to spill the captured filmstrip into
    #[arg(long)]
    pub strip_dir: Option<PathBuf>,

    /// Stop after this many seconds; runs until interrupted when absent
    #[arg(long)]
    pub duration: Option<f32>,
}
