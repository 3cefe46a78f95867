//! Vertex format and fixed geometry for the textured quad.

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// Vertex with a position in clip space and a texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl QuadVertex {
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &[
                // position
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                // uv
                VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Unit quad covering the full clip volume. UVs are flipped vertically
/// relative to position order so the texture's first row lands at the top.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [-1.0, -1.0, 0.0],
        uv: [1.0, 1.0],
    },
    QuadVertex {
        position: [1.0, -1.0, 0.0],
        uv: [0.0, 1.0],
    },
    QuadVertex {
        position: [1.0, 1.0, 0.0],
        uv: [0.0, 0.0],
    },
    QuadVertex {
        position: [-1.0, 1.0, 0.0],
        uv: [1.0, 0.0],
    },
];

/// Two triangles with fixed winding.
pub const QUAD_INDICES: [u32; 6] = [0, 2, 1, 3, 2, 0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_shape() {
        assert_eq!(QUAD_VERTICES.len(), 4);
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < 4));
    }

    #[test]
    fn test_quad_covers_clip_volume() {
        for v in &QUAD_VERTICES {
            assert_eq!(v.position[0].abs(), 1.0);
            assert_eq!(v.position[1].abs(), 1.0);
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 20);
        let desc = QuadVertex::desc();
        assert_eq!(desc.array_stride, 20);
        assert_eq!(desc.attributes.len(), 2);
        assert_eq!(desc.attributes[1].offset, 12);
    }
}
