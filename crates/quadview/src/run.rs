use anyhow::{Context, Result};
use renderer::{ImageCatalog, ImageSlot, Renderer, RendererConfig, ShaderSources};
use tracing_subscriber::EnvFilter;
use viewconfig::ViewerConfig;

use crate::paths::AppPaths;

pub fn run() -> Result<()> {
    let paths = AppPaths::discover()?;
    let config_file = paths.config_file();
    let (config, from_file) = ViewerConfig::load_or_default(&config_file)
        .with_context(|| format!("failed to load {}", config_file.display()))?;
    if from_file {
        tracing::info!(path = %config_file.display(), "loaded configuration");
    } else {
        tracing::info!(
            path = %config_file.display(),
            "no configuration file found; using defaults"
        );
    }

    let renderer_config = renderer_config(config)?;
    Renderer::new(renderer_config).run()
}

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn renderer_config(config: ViewerConfig) -> Result<RendererConfig> {
    let initial = u8::try_from(config.images.initial)
        .ok()
        .and_then(ImageSlot::new)
        .with_context(|| format!("initial image {} is not a valid slot", config.images.initial))?;
    let images = ImageCatalog::from_paths(config.images.paths)?;

    Ok(RendererConfig {
        surface_size: (config.window.width, config.window.height),
        title: config.window.title,
        shaders: ShaderSources {
            vertex: config.shaders.vertex,
            fragment: config.shaders.fragment,
        },
        images,
        initial_image: initial,
    })
}
