use std::path::{Path, PathBuf};

use anyhow::Result;

pub use viewconfig::IMAGE_SLOT_COUNT;

/// One-based image slot selected by the `1`..`6` hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSlot(u8);

impl ImageSlot {
    /// Returns `None` for values outside `1..=6`.
    pub fn new(slot: u8) -> Option<Self> {
        (1..=IMAGE_SLOT_COUNT as u8).contains(&slot).then_some(Self(slot))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl std::fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six image files the viewer can switch between.
#[derive(Clone, Debug)]
pub struct ImageCatalog {
    paths: [PathBuf; IMAGE_SLOT_COUNT],
}

impl ImageCatalog {
    /// Builds a catalog from an arbitrary list, which must hold exactly six paths.
    pub fn from_paths(paths: Vec<PathBuf>) -> Result<Self> {
        let count = paths.len();
        let paths: [PathBuf; IMAGE_SLOT_COUNT] = paths.try_into().map_err(|_| {
            anyhow::anyhow!("expected {IMAGE_SLOT_COUNT} image paths, got {count}")
        })?;
        Ok(Self { paths })
    }

    pub fn path(&self, slot: ImageSlot) -> &Path {
        &self.paths[slot.index()]
    }
}

/// Vertex and fragment shader files compiled at start-up.
#[derive(Clone, Debug)]
pub struct ShaderSources {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

/// Immutable configuration passed to the renderer at start-up.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    pub title: String,
    pub shaders: ShaderSources,
    pub images: ImageCatalog,
    /// Image displayed before any hotkey is pressed.
    pub initial_image: ImageSlot,
}
