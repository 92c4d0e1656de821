// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Traits implemented by drawable engine objects.

use std::sync::Arc;

use crate::renderer::api::{PrimitiveTopology, VertexElement};
use crate::renderer::buffer::GpuBuffer;
use crate::renderer::program::ShaderProgram;
use crate::renderer::renderer::Renderer;

/// Geometry a renderable draws: vertex layout, buffers, and ranges.
pub trait Mesh {
    /// Primitive assembly mode of the geometry.
    fn topology(&self) -> PrimitiveTopology;

    /// Number of vertices to draw for non-indexed geometry.
    fn vertex_count(&self) -> u32;
    /// First vertex for non-indexed draws.
    fn start_vertex(&self) -> u32 {
        0
    }
    /// Byte stride of one interleaved vertex.
    fn vertex_stride(&self) -> u32;
    /// Layout of the interleaved vertex attributes.
    fn vertex_elements(&self) -> &[VertexElement];
    /// The vertex buffer, `None` when the mesh carries no geometry.
    fn vertex_buffer(&self) -> Option<&GpuBuffer>;

    /// The index buffer, `None` for non-indexed geometry.
    fn index_buffer(&self) -> Option<&GpuBuffer>;
    /// Number of indices to draw, 0 lets the renderer derive it from the
    /// index buffer size.
    fn index_count(&self) -> u32 {
        0
    }
    /// First index for indexed draws.
    fn start_index(&self) -> u32 {
        0
    }
    /// Byte stride of one index element.
    fn index_stride(&self) -> u32 {
        2
    }
    /// CPU-side copy of the index data, used for wireframe rebuilds.
    fn indices(&self) -> &[u8] {
        &[]
    }

    /// Number of whole primitives this mesh draws.
    fn face_count(&self) -> u32 {
        let elements = if self.index_buffer().is_some() {
            self.index_count()
        } else {
            self.vertex_count()
        };
        self.topology().primitive_count(elements)
    }
}

/// An object the [`Renderer`] can draw.
///
/// The renderer drives the draw sequence; the renderable supplies its
/// program, geometry, and the state and uniform bindings it needs.
pub trait Renderable {
    /// Stable identity used for consecutive-draw redundancy elimination.
    fn id(&self) -> u64;

    /// The shader program to draw with, `None` skips the draw.
    fn shader_program(&self) -> Option<Arc<ShaderProgram>>;

    /// The geometry to draw.
    fn mesh(&self) -> &dyn Mesh;

    /// Binds the fixed-function state this object renders with.
    fn bind_render_state(&self, renderer: &mut Renderer);

    /// Stages the uniform values this object renders with.
    fn bind_shader_params(&self, program: &ShaderProgram);
}
