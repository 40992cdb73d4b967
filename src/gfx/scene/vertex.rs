//! # Vertex Data Structures
//!
//! The interleaved single-precision vertex layout that generated and imported
//! meshes are converted to before upload by a renderer.

/// A 3D vertex with position and normal data.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, so a slice of vertices can be reinterpreted as bytes with
/// [`vertex_bytes`] and copied into a GPU buffer unchanged.
///
/// # Examples
///
/// ```
/// use meshforge::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
/// };
/// assert_eq!(std::mem::size_of_val(&vertex), Vertex3D::STRIDE);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
}

/// One attribute of [`Vertex3D`] as seen by a shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub shader_location: u32,
    /// Byte offset from the start of the vertex
    pub offset: usize,
    /// Number of `f32` components
    pub components: usize,
}

impl Vertex3D {
    /// Size of one vertex in bytes
    pub const STRIDE: usize = std::mem::size_of::<Vertex3D>();

    /// Attribute layout: position at location 0, normal at location 1
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute {
            shader_location: 0,
            offset: 0,
            components: 3,
        },
        VertexAttribute {
            shader_location: 1,
            offset: std::mem::size_of::<[f32; 3]>(),
            components: 3,
        },
    ];
}

/// View a vertex slice as raw bytes
pub fn vertex_bytes(vertices: &[Vertex3D]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// View an index slice as raw bytes
pub fn index_bytes(indices: &[u32]) -> &[u8] {
    bytemuck::cast_slice(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        assert_eq!(Vertex3D::STRIDE, 24);
        assert_eq!(Vertex3D::ATTRIBUTES[1].offset, 12);
    }

    #[test]
    fn test_byte_views() {
        let vertices = [
            Vertex3D {
                position: [1.0, 2.0, 3.0],
                normal: [0.0, 0.0, 1.0],
            };
            4
        ];
        assert_eq!(vertex_bytes(&vertices).len(), 4 * Vertex3D::STRIDE);
        assert_eq!(index_bytes(&[0, 1, 2]).len(), 12);

        let back: &[Vertex3D] = bytemuck::cast_slice(vertex_bytes(&vertices));
        assert_eq!(back[3], vertices[3]);
    }
}
