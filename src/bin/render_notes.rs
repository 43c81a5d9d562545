use std::path::PathBuf;

use anyhow::Result;
use log::{info, warn};

use polytone::core::RenderConfig;
use polytone::offline;

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sounds"));

    let config = match RenderConfig::load() {
        Ok(config) => config,
        Err(err) => {
            warn!("config unusable ({err:#}), using defaults");
            RenderConfig::default()
        }
    };

    info!(
        "rendering note pack to {} at {} Hz",
        out_dir.display(),
        config.sample_rate
    );
    offline::render_note_pack(&out_dir, &config)?;
    info!("done");
    Ok(())
}
