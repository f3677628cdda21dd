use bytemuck::{Pod, Zeroable};

pub(crate) const QUAD_VERTEX_COUNT: usize = 6;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Flipped-UV mapping for the two triangles; the texture data is flipped on
/// upload to match.
const TEX_COORDS: [[f32; 2]; QUAD_VERTEX_COUNT] = [
    [0.0, 1.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
];

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub position: [f32; 2],
    pub colour: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x3, 2 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Two-triangle quad sized to the displayed image.
///
/// The longer image side spans `[-1, 1]`; the shorter side is scaled by the
/// aspect ratio so the picture is never distorted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadGeometry {
    half_extent: (f32, f32),
    vertices: [QuadVertex; QUAD_VERTEX_COUNT],
}

impl QuadGeometry {
    pub fn for_image(width: u32, height: u32) -> Self {
        let half_extent = half_extent(width, height);
        let (w, h) = half_extent;
        let positions = [[-w, h], [w, h], [-w, -h], [w, -h], [w, h], [-w, -h]];

        let vertices = std::array::from_fn(|index| QuadVertex {
            position: positions[index],
            colour: WHITE,
            tex_coord: TEX_COORDS[index],
        });

        Self {
            half_extent,
            vertices,
        }
    }

    /// Half width and half height of the quad in local units.
    pub fn half_extent(&self) -> (f32, f32) {
        self.half_extent
    }

    pub(crate) fn vertices(&self) -> &[QuadVertex; QUAD_VERTEX_COUNT] {
        &self.vertices
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices())
    }
}

fn half_extent(width: u32, height: u32) -> (f32, f32) {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;
    if width < height {
        (width / height, 1.0)
    } else if height < width {
        (1.0, height / width)
    } else {
        (1.0, 1.0)
    }
}
