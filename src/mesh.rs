//! Procedural tube surface around a particle chain.
//!
//! One ring of `sides + 1` vertices is emitted per particle. The last vertex
//! of each ring duplicates the first so the UV seam can close. Consecutive
//! rings are stitched with two triangles per side, wound so that
//! counter-clockwise faces point outward.

use crate::config::CableConfig;
use crate::float::Float;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Tube surface buffers. All per-vertex sequences are parallel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TubeMesh<F: Float> {
    pub vertices: AllocVec<Vec3<F>>,
    pub normals: AllocVec<Vec3<F>>,
    pub tangents: AllocVec<Vec3<F>>,
    pub uvs: AllocVec<[F; 2]>,
    pub triangles: AllocVec<u32>,
}

impl<F: Float> TubeMesh<F> {
    pub fn new() -> Self {
        TubeMesh {
            vertices: AllocVec::new(),
            normals: AllocVec::new(),
            tangents: AllocVec::new(),
            uvs: AllocVec::new(),
            triangles: AllocVec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.triangles.len()
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.tangents.clear();
        self.uvs.clear();
        self.triangles.clear();
    }
}

/// Generates [`TubeMesh`] buffers from particle positions.
#[derive(Clone, Debug)]
pub struct TubeMeshBuilder<F: Float> {
    pub width: F,
    pub sides: usize,
    pub tiling: F,
    /// Subtracted from every position, so the mesh can live in the owner's
    /// local space.
    pub origin: Vec3<F>,
}

impl<F: Float> TubeMeshBuilder<F> {
    pub fn new(width: F, sides: usize, tiling: F) -> Self {
        TubeMeshBuilder { width, sides, tiling, origin: Vec3::zero() }
    }

    pub fn from_config(config: &CableConfig<F>) -> Self {
        TubeMeshBuilder::new(config.width, config.sides, config.tiled_material)
    }

    pub fn with_origin(mut self, origin: Vec3<F>) -> Self {
        self.origin = origin;
        self
    }

    /// Vertices per ring, including the seam duplicate.
    pub fn ring_size(&self) -> usize {
        self.sides + 1
    }

    pub fn vertex_count(&self, particle_count: usize) -> usize {
        self.ring_size() * particle_count
    }

    pub fn index_count(&self, segment_count: usize) -> usize {
        segment_count * self.sides * 6
    }

    pub fn vertex_index(&self, along: usize, around: usize) -> usize {
        along * self.ring_size() + around
    }

    pub fn build(&self, points: &[Vec3<F>]) -> TubeMesh<F> {
        let mut mesh = TubeMesh::new();
        self.rebuild(points, &mut mesh);
        mesh
    }

    /// Regenerate every buffer of `mesh` in place from `points`.
    pub fn rebuild(&self, points: &[Vec3<F>], mesh: &mut TubeMesh<F>) {
        mesh.clear();
        if points.is_empty() {
            return;
        }

        let count = points.len();
        let segments = count - 1;
        let vertex_total = self.vertex_count(count);
        mesh.vertices.reserve(vertex_total);
        mesh.normals.reserve(vertex_total);
        mesh.tangents.reserve(vertex_total);
        mesh.uvs.reserve(vertex_total);
        mesh.triangles.reserve(self.index_count(segments));

        let radius = self.width * F::half();
        let two_pi = F::two() * F::pi();
        let mut last_forward = Vec3::forward();

        for i in 0..count {
            let prev = i.saturating_sub(1);
            let next = (i + 1).min(count - 1);

            let mut forward = (points[next] - points[prev]).normalize();
            if forward == Vec3::zero() {
                forward = last_forward;
            }
            last_forward = forward;
            let (right, up) = ring_basis(forward);

            let center = points[i] - self.origin;
            let along = if segments == 0 {
                F::zero()
            } else {
                F::from_usize(i) / F::from_usize(segments)
            };

            for v in 0..self.ring_size() {
                let around = F::from_usize(v) / F::from_usize(self.sides);
                let angle = two_pi * around;
                let outward = up.scale(angle.cos()) + right.scale(angle.sin());

                mesh.vertices.push(center + outward.scale(radius));
                mesh.normals.push(outward);
                mesh.tangents.push(forward);
                mesh.uvs.push([along * self.tiling, around]);
            }
        }

        self.stitch(segments, &mut mesh.triangles);
        log::trace!("rebuilt tube mesh: {} vertices, {} indices", mesh.vertex_count(), mesh.index_count());
    }

    fn stitch(&self, segments: usize, triangles: &mut AllocVec<u32>) {
        for seg in 0..segments {
            for side in 0..self.sides {
                let tl = self.vertex_index(seg, side) as u32;
                let bl = self.vertex_index(seg, side + 1) as u32;
                let tr = self.vertex_index(seg + 1, side) as u32;
                let br = self.vertex_index(seg + 1, side + 1) as u32;

                triangles.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
            }
        }
    }
}

/// Right and up vectors perpendicular to `forward`, derived from world up.
///
/// When `forward` is parallel to world up the cross product vanishes and
/// world forward is used as the reference instead.
pub fn ring_basis<F: Float>(forward: Vec3<F>) -> (Vec3<F>, Vec3<F>) {
    let mut right = Vec3::up().cross(forward).normalize();
    if right == Vec3::zero() {
        right = Vec3::forward().cross(forward).normalize();
    }
    let up = right.cross(forward).normalize();
    (right, up)
}
