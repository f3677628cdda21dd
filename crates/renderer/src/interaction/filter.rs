/// Per-channel weights used to collapse a texel into a grey value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LuminanceWeights {
    /// Pass-through weights; the shader leaves colour untouched.
    pub const NEUTRAL: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for LuminanceWeights {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Greyscale weightings bound to `Z`, `X` and `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuminancePreset {
    /// Plain channel average.
    Average,
    /// ITU-R BT.601 luma.
    Rec601,
    /// ITU-R BT.709 luma.
    Rec709,
}

impl LuminancePreset {
    pub fn weights(self) -> LuminanceWeights {
        match self {
            LuminancePreset::Average => LuminanceWeights::new(0.333, 0.333, 0.333),
            LuminancePreset::Rec601 => LuminanceWeights::new(0.299, 0.587, 0.114),
            LuminancePreset::Rec709 => LuminanceWeights::new(0.213, 0.715, 0.072),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SobelOrientation {
    Horizontal,
    Vertical,
}

/// Supported Gaussian blur kernel widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaussianKernel {
    Size3,
    Size5,
    Size7,
}

impl GaussianKernel {
    pub fn size(self) -> u32 {
        match self {
            GaussianKernel::Size3 => 3,
            GaussianKernel::Size5 => 5,
            GaussianKernel::Size7 => 7,
        }
    }
}

/// The single active image filter.
///
/// Every filter hotkey replaces the whole mode, so at most one filter category
/// is ever active and the shader flags derived from it cannot contradict each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FilterMode {
    #[default]
    None,
    Luminance(LuminanceWeights),
    Brightness,
    Sobel(SobelOrientation),
    Sharpen,
    Gaussian(GaussianKernel),
}

impl FilterMode {
    /// Weights uploaded as `luminanceValues`; neutral unless a luminance preset
    /// is active.
    pub fn luminance(&self) -> LuminanceWeights {
        match self {
            FilterMode::Luminance(weights) => *weights,
            _ => LuminanceWeights::NEUTRAL,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::None => "none",
            FilterMode::Luminance(_) => "luminance",
            FilterMode::Brightness => "brightness",
            FilterMode::Sobel(SobelOrientation::Horizontal) => "sobel-horizontal",
            FilterMode::Sobel(SobelOrientation::Vertical) => "sobel-vertical",
            FilterMode::Sharpen => "sharpen",
            FilterMode::Gaussian(_) => "gaussian",
        }
    }
}

/// Flat view of everything the fragment and vertex stages consume.
///
/// Field names follow the uniform contract (`transform`, `luminanceValues`,
/// `adjustBrightness`, ...). Flags are `0.0` or `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderParameters {
    pub transform: glam::Mat4,
    pub luminance_values: [f32; 3],
    pub adjust_brightness: f32,
    pub do_sobel: f32,
    pub hor_sobel: f32,
    pub image_width: f32,
    pub image_height: f32,
    pub do_unsharp: f32,
    pub do_gauss: f32,
    pub gauss_val: f32,
}

impl ShaderParameters {
    pub fn new(mode: &FilterMode, transform: glam::Mat4, extent: (u32, u32)) -> Self {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        let (do_sobel, hor_sobel) = match mode {
            FilterMode::Sobel(orientation) => {
                (1.0, flag(*orientation == SobelOrientation::Horizontal))
            }
            _ => (0.0, 0.0),
        };
        let (do_gauss, gauss_val) = match mode {
            FilterMode::Gaussian(kernel) => (1.0, kernel.size() as f32),
            _ => (0.0, 0.0),
        };

        Self {
            transform,
            luminance_values: mode.luminance().as_array(),
            adjust_brightness: flag(matches!(mode, FilterMode::Brightness)),
            do_sobel,
            hor_sobel,
            image_width: extent.0 as f32,
            image_height: extent.1 as f32,
            do_unsharp: flag(matches!(mode, FilterMode::Sharpen)),
            do_gauss,
            gauss_val,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mode: FilterMode) -> ShaderParameters {
        ShaderParameters::new(&mode, glam::Mat4::IDENTITY, (640, 480))
    }

    #[test]
    fn none_mode_clears_every_flag() {
        let p = params(FilterMode::None);
        assert_eq!(p.luminance_values, [1.0, 1.0, 1.0]);
        assert_eq!(p.adjust_brightness, 0.0);
        assert_eq!(p.do_sobel, 0.0);
        assert_eq!(p.hor_sobel, 0.0);
        assert_eq!(p.do_unsharp, 0.0);
        assert_eq!(p.do_gauss, 0.0);
        assert_eq!(p.gauss_val, 0.0);
        assert_eq!((p.image_width, p.image_height), (640.0, 480.0));
    }

    #[test]
    fn luminance_mode_uploads_its_weights() {
        let p = params(FilterMode::Luminance(LuminancePreset::Rec709.weights()));
        assert_eq!(p.luminance_values, [0.213, 0.715, 0.072]);
        assert_eq!(p.do_sobel + p.do_gauss + p.do_unsharp + p.adjust_brightness, 0.0);
    }

    #[test]
    fn sobel_orientation_drives_hor_flag() {
        let horizontal = params(FilterMode::Sobel(SobelOrientation::Horizontal));
        assert_eq!((horizontal.do_sobel, horizontal.hor_sobel), (1.0, 1.0));

        let vertical = params(FilterMode::Sobel(SobelOrientation::Vertical));
        assert_eq!((vertical.do_sobel, vertical.hor_sobel), (1.0, 0.0));
    }

    #[test]
    fn gaussian_kernel_sizes() {
        for (kernel, size) in [
            (GaussianKernel::Size3, 3.0),
            (GaussianKernel::Size5, 5.0),
            (GaussianKernel::Size7, 7.0),
        ] {
            let p = params(FilterMode::Gaussian(kernel));
            assert_eq!(p.do_gauss, 1.0);
            assert_eq!(p.gauss_val, size);
            assert_eq!(p.luminance_values, [1.0, 1.0, 1.0]);
        }
    }
}
