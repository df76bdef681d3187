use glam::{Vec2, Vec3};

// Regular grid plane on XZ at y = 0. Generated once at pipeline init and
// never mutated; resolution changes mean building a new mesh.
pub struct SurfaceMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

// Build a width×height plane centered on the origin with the given
// tessellation: (sx+1)*(sy+1) vertices, sx*sy*2 triangles, uv spanning [0,1]²
// with (0,0) and (1,1) at opposite corners.
pub fn generate_grid(width: f32, height: f32, segments_x: usize, segments_y: usize) -> SurfaceMesh {
    let grid_x1 = segments_x + 1;
    let grid_y1 = segments_y + 1;
    let segment_w = width / segments_x as f32;
    let segment_h = height / segments_y as f32;

    let mut positions = Vec::with_capacity(grid_x1 * grid_y1);
    let mut uvs = Vec::with_capacity(grid_x1 * grid_y1);
    for iy in 0..grid_y1 {
        let z = iy as f32 * segment_h - height / 2.0;
        for ix in 0..grid_x1 {
            let x = ix as f32 * segment_w - width / 2.0;
            positions.push(Vec3::new(x, 0.0, z));
            uvs.push(Vec2::new(
                ix as f32 / segments_x as f32,
                1.0 - iy as f32 / segments_y as f32,
            ));
        }
    }

    let mut indices = Vec::with_capacity(segments_x * segments_y * 6);
    for iy in 0..segments_y {
        for ix in 0..segments_x {
            let a = (ix + grid_x1 * iy) as u32;
            let b = (ix + grid_x1 * (iy + 1)) as u32;
            let c = (ix + 1 + grid_x1 * (iy + 1)) as u32;
            let d = (ix + 1 + grid_x1 * iy) as u32;
            indices.extend_from_slice(&[a, b, d]);
            indices.extend_from_slice(&[b, c, d]);
        }
    }

    SurfaceMesh {
        positions,
        uvs,
        indices,
    }
}
