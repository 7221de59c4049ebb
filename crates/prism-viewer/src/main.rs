mod app;
mod config;

use anyhow::Result;
use prism_engine::logging::{LoggingConfig, init_logging};
use prism_engine::{ShaderLanguage, TriangleStyle};

use crate::config::ViewerConfig;

/// Config file read when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "prism.toml";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = ViewerConfig::load_from_path(&path)?;

    let language: ShaderLanguage = config.render.language.into();
    let style: TriangleStyle = config.render.style.into();
    log::info!("starting viewer: {style} triangle in {language}");

    app::run(config)
}
