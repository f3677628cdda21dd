use std::borrow::Cow;
use std::path::Path;

use anyhow::{bail, Context, Result};
use wgpu::naga::ShaderStage;

use crate::gpu::GpuContext;

/// Reads a GLSL source file from disk.
pub(crate) fn load_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read shader at {}", path.display()))
}

/// Reads and compiles one GLSL 450 stage.
///
/// Naga reports GLSL front-end errors through the device's validation scope, so
/// the module is created inside one and any captured error is turned into a
/// start-up failure.
pub(crate) fn compile_shader(
    context: &GpuContext,
    path: &Path,
    stage: ShaderStage,
) -> Result<wgpu::ShaderModule> {
    let source = load_source(path)?;
    let label = format!("{} ({})", stage_name(stage), path.display());

    context.push_error_scope();
    let module = context
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Glsl {
                shader: Cow::Owned(source),
                stage,
                defines: &[],
            },
        });
    if let Some(error) = context.pop_error_scope("shader compilation") {
        bail!("failed to compile {label}: {error}");
    }

    tracing::debug!(shader = %label, "compiled shader");
    Ok(module)
}

fn stage_name(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Vertex => "vertex shader",
        ShaderStage::Fragment => "fragment shader",
        _ => "shader",
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn shader_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../shaders")
    }

    #[test]
    fn missing_shader_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.glsl");
        let err = load_source(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("failed to read shader"), "{message}");
        assert!(message.contains("missing.glsl"), "{message}");
    }

    #[test]
    fn shaders_declare_the_uniform_contract() {
        let names = [
            "transform",
            "luminanceValues",
            "adjustBrightness",
            "doSobel",
            "horSobel",
            "imageWidth",
            "imageHeight",
            "doUnSharp",
            "doGauss",
            "gaussVal",
        ];
        for file in ["vertex.glsl", "fragment.glsl"] {
            let source = load_source(&shader_dir().join(file)).unwrap();
            assert!(source.starts_with("#version 450"), "{file}");
            assert!(source.contains("uniform FilterParams"), "{file}");
            for name in names {
                assert!(source.contains(name), "{file} is missing {name}");
            }
        }
    }

    #[test]
    fn vertex_inputs_match_quad_layout() {
        let source = load_source(&shader_dir().join("vertex.glsl")).unwrap();
        assert!(source.contains("layout(location = 0) in vec2"));
        assert!(source.contains("layout(location = 1) in vec3"));
        assert!(source.contains("layout(location = 2) in vec2"));
    }
}
