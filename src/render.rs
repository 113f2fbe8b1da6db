//! Hand-off from tube buffers to a host renderer.

use crate::float::Float;
use crate::mesh::TubeMesh;
use alloc::vec::Vec as AllocVec;
use bytemuck::{Pod, Zeroable};

/// Interleaved GPU vertex: position, normal, tangent (w = handedness), uv.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
    pub uv: [f32; 2],
}

/// Opaque material identifier owned by the host renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Receives mesh data. Implemented by the host's rendering layer.
pub trait MeshConsumer {
    /// Full upload: topology, vertex data and material.
    fn upload(&mut self, material: MaterialId, vertices: &[TubeVertex], indices: &[u32]);

    /// Vertex-only refresh; topology is unchanged since the last upload.
    fn update_vertices(&mut self, vertices: &[TubeVertex]);
}

/// Owns the mesh resource and material on the render side and pushes each
/// rebuilt [`TubeMesh`] to a [`MeshConsumer`].
pub struct RenderBridge<C: MeshConsumer> {
    consumer: C,
    material: MaterialId,
    vertices: AllocVec<TubeVertex>,
    uploaded_topology: Option<(usize, usize)>,
}

impl<C: MeshConsumer> RenderBridge<C> {
    pub fn new(consumer: C, material: MaterialId) -> Self {
        RenderBridge {
            consumer,
            material,
            vertices: AllocVec::new(),
            uploaded_topology: None,
        }
    }

    /// Changing the material forces a full upload on the next present.
    pub fn set_material(&mut self, material: MaterialId) {
        if material != self.material {
            self.material = material;
            self.uploaded_topology = None;
        }
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Pack `mesh` and send it on. Only the first present, or one after a
    /// change in vertex or index count, or a material change, re-sends indices.
    pub fn present<F: Float>(&mut self, mesh: &TubeMesh<F>) {
        pack_vertices(mesh, &mut self.vertices);

        let topology = (mesh.vertex_count(), mesh.index_count());
        if self.uploaded_topology == Some(topology) {
            self.consumer.update_vertices(&self.vertices);
        } else {
            self.consumer.upload(self.material, &self.vertices, &mesh.triangles);
            self.uploaded_topology = Some(topology);
        }
    }

    /// Raw bytes of the last packed vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }
}

/// Interleave the parallel buffers of `mesh` into `out`.
pub fn pack_vertices<F: Float>(mesh: &TubeMesh<F>, out: &mut AllocVec<TubeVertex>) {
    out.clear();
    out.extend(
        mesh.vertices
            .iter()
            .zip(&mesh.normals)
            .zip(&mesh.tangents)
            .zip(&mesh.uvs)
            .map(|(((position, normal), tangent), uv)| {
                let t = tangent.to_array_f32();
                TubeVertex {
                    position: position.to_array_f32(),
                    normal: normal.to_array_f32(),
                    tangent: [t[0], t[1], t[2], 1.0],
                    uv: [uv[0].to_f32(), uv[1].to_f32()],
                }
            }),
    );
}
