use bytemuck::{Pod, Zeroable};

use crate::interaction::ShaderParameters;

/// Mirror of the `FilterParams` uniform block declared in both shaders.
///
/// The field order and padding follow std140: the matrix takes four vec4
/// columns, `luminance_values` occupies a vec3 whose trailing slot is filled by
/// `adjust_brightness`, and the block is rounded up to a multiple of 16 bytes.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FilterUniforms {
    pub transform: [[f32; 4]; 4],
    pub luminance_values: [f32; 3],
    pub adjust_brightness: f32,
    pub do_sobel: f32,
    pub hor_sobel: f32,
    pub image_width: f32,
    pub image_height: f32,
    pub do_unsharp: f32,
    pub do_gauss: f32,
    pub gauss_val: f32,
    pub padding: f32,
}

unsafe impl Zeroable for FilterUniforms {}
unsafe impl Pod for FilterUniforms {}

impl FilterUniforms {
    pub fn from_parameters(params: &ShaderParameters) -> Self {
        Self {
            transform: params.transform.to_cols_array_2d(),
            luminance_values: params.luminance_values,
            adjust_brightness: params.adjust_brightness,
            do_sobel: params.do_sobel,
            hor_sobel: params.hor_sobel,
            image_width: params.image_width,
            image_height: params.image_height,
            do_unsharp: params.do_unsharp,
            do_gauss: params.do_gauss,
            gauss_val: params.gauss_val,
            padding: 0.0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
