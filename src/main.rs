use anyhow::Result;
use clap::Parser;

use roomcast::app::{App, AppOptions};
use roomcast::cli::Cli;
use roomcast::config::Config;
use roomcast::traits::LogRenderer;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let options = AppOptions {
        model: cli.model.clone(),
        image: cli.image.clone(),
        snapshot_url: cli.snapshot_url.clone(),
        strip_dir: cli.strip_dir.clone(),
    };

    let mut app = App::new(options, config, LogRenderer::new())?;
    app.run(cli.duration)
}
