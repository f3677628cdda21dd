use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Number of hotkey-addressable image slots (`1`..`6`).
pub const IMAGE_SLOT_COUNT: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowSection,
    pub shaders: ShaderSection,
    pub images: ImageSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowSection {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            title: "CPSC 453 Image Filters".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShaderSection {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderSection {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/vertex.glsl"),
            fragment: PathBuf::from("shaders/fragment.glsl"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageSection {
    /// One-based slot shown at start-up.
    pub initial: usize,
    pub paths: Vec<PathBuf>,
}

impl Default for ImageSection {
    fn default() -> Self {
        Self {
            initial: 5,
            paths: [
                "res/image1-mandrill.png",
                "res/image2-uclogo.png",
                "res/image3-aerial.jpg",
                "res/image4-thirsk.jpg",
                "res/image5-pattern.png",
                "res/image6-Banff.jpg",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: ViewerConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    /// Loads `path` if it exists, otherwise falls back to the built-in defaults.
    ///
    /// Returns the configuration together with a flag telling whether the file
    /// was actually read.
    pub fn load_or_default(path: &Path) -> Result<(Self, bool), ConfigError> {
        if !path.exists() {
            return Ok((Self::default(), false));
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok((Self::from_toml_str(&contents)?, true))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        if self.shaders.vertex.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "shaders.vertex may not be empty".into(),
            ));
        }
        if self.shaders.fragment.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "shaders.fragment may not be empty".into(),
            ));
        }

        if self.images.paths.len() != IMAGE_SLOT_COUNT {
            return Err(ConfigError::Invalid(format!(
                "images.paths must list exactly {IMAGE_SLOT_COUNT} images, found {}",
                self.images.paths.len()
            )));
        }

        for (index, path) in self.images.paths.iter().enumerate() {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "images.paths entry {} is empty",
                    index + 1
                )));
            }
        }

        if !(1..=IMAGE_SLOT_COUNT).contains(&self.images.initial) {
            return Err(ConfigError::Invalid(format!(
                "images.initial must be between 1 and {IMAGE_SLOT_COUNT}, got {}",
                self.images.initial
            )));
        }

        Ok(())
    }
}
