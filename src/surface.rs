//! Procedurally displaced wave surface.
//!
//! The mesh itself is a flat subdivided grid; all displacement, normal
//! estimation, and emissive shading happen on the GPU (see `shader.wgsl`).
//! `waves` holds the CPU reference implementation of the same field.

pub mod waves;

use bytemuck::{Pod, Zeroable};

use crate::params::SurfaceGeometry;

/// Vertex data for the wave mesh (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Flat grid mesh in the XZ plane, centered on the origin.
pub struct SurfaceGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl SurfaceGrid {
    /// Build a `size` x `size` plane with `subdivisions` quads per side.
    pub fn new(geometry: &SurfaceGeometry) -> Self {
        let subdivisions = geometry.subdivisions;
        let spacing = geometry.vertex_spacing();
        let half_size = geometry.size / 2.0;

        let mut vertices = Vec::with_capacity((subdivisions + 1).pow(2));
        let mut indices = Vec::with_capacity(subdivisions.pow(2) * 6);

        for z in 0..=subdivisions {
            for x in 0..=subdivisions {
                let x_pos = x as f32 * spacing - half_size;
                let z_pos = z as f32 * spacing - half_size;

                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                    uv: [
                        x as f32 / subdivisions as f32,
                        z as f32 / subdivisions as f32,
                    ],
                });
            }
        }

        // Triangle indices (counter-clockwise winding)
        for z in 0..subdivisions {
            for x in 0..subdivisions {
                let top_left = (z * (subdivisions + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (subdivisions + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self { vertices, indices }
    }
}

/// The renderable wave surface, constructed once when the scene's asset
/// gate opens.
pub struct ProceduralSurface {
    pub grid: SurfaceGrid,
}

impl ProceduralSurface {
    pub fn build(geometry: &SurfaceGeometry) -> Self {
        Self {
            grid: SurfaceGrid::new(geometry),
        }
    }

    /// No-op: the wave field is evaluated per-vertex on the GPU from a
    /// live time uniform, so nothing host-side depends on the viewport.
    pub fn resize(&mut self) {}

    /// No-op, see `resize`.
    pub fn update(&mut self) {}

    /// No-op: mesh and material resources are released with the GPU
    /// buffers that hold them.
    pub fn teardown(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_counts() {
        let geometry = SurfaceGeometry::default();
        let grid = SurfaceGrid::new(&geometry);

        // (subdivisions + 1)^2 vertices, subdivisions^2 quads of 2 triangles
        assert_eq!(grid.vertices.len(), 257 * 257);
        assert_eq!(grid.indices.len(), 256 * 256 * 6);
    }

    #[test]
    fn test_grid_is_flat_and_centered() {
        let geometry = SurfaceGeometry::default();
        let grid = SurfaceGrid::new(&geometry);

        for v in &grid.vertices {
            assert_eq!(v.position[1], 0.0);
            assert!(v.position[0] >= -3.5 && v.position[0] <= 3.5);
            assert!(v.position[2] >= -3.5 && v.position[2] <= 3.5);
        }

        let first = grid.vertices.first().unwrap();
        let last = grid.vertices.last().unwrap();
        assert_eq!(first.position[0], -3.5);
        assert_eq!(last.position[0], 3.5);
    }

    #[test]
    fn test_indices_in_range() {
        let geometry = SurfaceGeometry {
            subdivisions: 4,
            ..SurfaceGeometry::default()
        };
        let grid = SurfaceGrid::new(&geometry);
        let max = grid.vertices.len() as u32;
        assert!(grid.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn test_vertex_spacing_dominates_normal_shift() {
        // The finite-difference shift must stay well under the vertex
        // spacing for the normal estimate to hold
        let geometry = SurfaceGeometry::default();
        let params = crate::params::WaveParams::default();
        assert!(params.normal_shift < geometry.vertex_spacing());
    }
}
