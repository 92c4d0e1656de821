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

//! Defines the [`GraphicsDriver`] abstraction spoken by every backend.

use std::fmt::Debug;

use crate::math::LinearRgba;
use crate::renderer::api::{
    AddressMode, AttachmentPoint, BlendFactor, BlendOperation, BufferId, BufferKind, BufferUsage,
    ColorWrites, CompareFunction, CullMode, FilterMode, FrameBufferId, FrontFace, IndexFormat,
    MipFilter, PrimitiveTopology, ProgramId, ShaderId, ShaderStage, StencilFace, StencilOperation,
    TextureAxis, TextureId, TextureKind, UniformLocation, UniformReflection, UniformValue,
    VertexFormat,
};
use crate::renderer::error::{RenderError, ResourceError, ShaderError};

/// Abstract interface to a concrete graphics backend.
///
/// The engine-side state objects and the [`Renderer`](crate::renderer::Renderer)
/// facade talk to the hardware exclusively through this trait. Calls are
/// immediate: each method maps to one backend state change or command, and
/// redundant-call elimination is the caller's responsibility.
///
/// Implementations must be internally synchronized; every method takes
/// `&self`.
pub trait GraphicsDriver: Debug + Send + Sync + 'static {
    /// A human-readable description of the backend.
    fn description(&self) -> String;

    /// Whether the backend can mask the alpha channel independently of the
    /// color channels. Backends without this capability always write alpha.
    fn supports_independent_alpha_write(&self) -> bool;

    // --- Blend state ---

    /// Enables or disables blending.
    fn set_blend_enabled(&self, enabled: bool);
    /// Sets the source and destination blend factors.
    fn set_blend_func(&self, src: BlendFactor, dst: BlendFactor);
    /// Sets the blend equation.
    fn set_blend_op(&self, op: BlendOperation);
    /// Sets the constant blend color.
    fn set_blend_color(&self, color: LinearRgba);
    /// Sets the per-channel color write mask.
    fn set_color_write_mask(&self, mask: ColorWrites);
    /// Enables or disables alpha-to-coverage.
    fn set_alpha_to_coverage(&self, enabled: bool);

    // --- Depth / stencil state ---

    /// Enables or disables the depth test.
    fn set_depth_test_enabled(&self, enabled: bool);
    /// Enables or disables depth buffer writes.
    fn set_depth_write_enabled(&self, enabled: bool);
    /// Sets the depth comparison function.
    fn set_depth_compare(&self, func: CompareFunction);
    /// Enables or disables the stencil test for one face.
    fn set_stencil_enabled(&self, face: StencilFace, enabled: bool);
    /// Sets the stencil comparison for one face.
    fn set_stencil_func(&self, face: StencilFace, func: CompareFunction, reference: u32, read_mask: u32);
    /// Sets the stencil operations and write mask for one face.
    fn set_stencil_op(
        &self,
        face: StencilFace,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
        write_mask: u32,
    );

    // --- Rasterizer state ---

    /// Sets face culling, `None` disables it.
    fn set_cull_mode(&self, mode: Option<CullMode>);
    /// Sets the front-face winding order.
    fn set_front_face(&self, winding: FrontFace);
    /// Configures depth-bias (polygon offset) rasterization.
    fn set_polygon_offset(&self, enabled: bool, factor: f32, units: f32);
    /// Enables or disables the scissor test.
    fn set_scissor_test_enabled(&self, enabled: bool);
    /// Enables or disables multisample rasterization.
    fn set_multisample_enabled(&self, enabled: bool);

    // --- Sampler state (applies to the texture bound on the active slot) ---

    /// Sets the minification filter together with the mipmap filter.
    fn set_texture_min_filter(&self, filter: FilterMode, mip: MipFilter);
    /// Sets the magnification filter.
    fn set_texture_mag_filter(&self, filter: FilterMode);
    /// Sets the wrap mode for one texture coordinate axis.
    fn set_texture_wrap(&self, axis: TextureAxis, mode: AddressMode);

    // --- Viewport, scissor, clears ---

    /// Sets the viewport rectangle in framebuffer coordinates.
    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32);
    /// Sets the scissor rectangle in framebuffer coordinates.
    fn set_scissor_rect(&self, x: i32, y: i32, width: u32, height: u32);
    /// Clears one color slot of the bound framebuffer.
    fn clear_color_slot(&self, slot: usize, color: LinearRgba);
    /// Clears the depth and/or stencil planes of the bound framebuffer.
    fn clear_depth_stencil(&self, depth: Option<f32>, stencil: Option<u32>);

    // --- Buffers ---

    /// Creates an empty buffer object.
    fn create_buffer(&self) -> Result<BufferId, ResourceError>;
    /// Uploads data to a buffer, replacing its previous contents.
    fn upload_buffer(
        &self,
        id: BufferId,
        kind: BufferKind,
        usage: BufferUsage,
        data: &[u8],
    ) -> Result<(), ResourceError>;
    /// Binds a buffer to its kind's binding point.
    fn bind_buffer(&self, id: BufferId, kind: BufferKind);
    /// Releases a buffer object.
    fn destroy_buffer(&self, id: BufferId);

    // --- Shaders and programs ---

    /// Creates an empty shader object for one stage.
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, ResourceError>;
    /// Compiles source into a shader object. On success the returned string
    /// holds the (possibly empty) compiler info log.
    fn compile_shader(&self, id: ShaderId, source: &str) -> Result<String, ShaderError>;
    /// Releases a shader object.
    fn destroy_shader(&self, id: ShaderId);

    /// Creates an empty program object.
    fn create_program(&self) -> Result<ProgramId, ResourceError>;
    /// Attaches a compiled shader to a program.
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    /// Detaches a shader from a program.
    fn detach_shader(&self, program: ProgramId, shader: ShaderId);
    /// Links the attached stages into an executable program.
    fn link_program(&self, program: ProgramId) -> Result<(), ShaderError>;
    /// Releases a program object.
    fn destroy_program(&self, id: ProgramId);

    /// Enumerates the active uniforms of a linked program.
    fn active_uniforms(&self, program: ProgramId) -> Vec<UniformReflection>;
    /// Queries the location of a uniform by name.
    fn uniform_location(&self, program: ProgramId, name: &str) -> UniformLocation;
    /// Queries the location of a vertex attribute by name, `-1` if unused.
    fn attribute_location(&self, program: ProgramId, name: &str) -> i32;
    /// Makes a program current, `None` unbinds.
    fn use_program(&self, program: Option<ProgramId>);
    /// Uploads a uniform value to a location of the current program.
    fn set_uniform(&self, location: UniformLocation, value: &UniformValue);

    // --- Vertex attributes ---

    /// Enables a vertex attribute slot.
    fn enable_vertex_attribute(&self, slot: u32);
    /// Disables a vertex attribute slot.
    fn disable_vertex_attribute(&self, slot: u32);
    /// Points an attribute slot into the bound vertex buffer.
    fn set_vertex_attribute_pointer(&self, slot: u32, format: VertexFormat, stride: u32, offset: u32);

    // --- Textures ---

    /// Creates a texture object of the given kind.
    fn create_texture(&self, kind: TextureKind) -> Result<TextureId, ResourceError>;
    /// Allocates (or reallocates) backing storage for a texture.
    fn allocate_texture_storage(&self, id: TextureId, width: u32, height: u32)
        -> Result<(), ResourceError>;
    /// Binds a texture to a sampler slot, `None` unbinds the slot.
    fn bind_texture(&self, slot: u32, kind: TextureKind, id: Option<TextureId>);
    /// Releases a texture object.
    fn destroy_texture(&self, id: TextureId);

    // --- Framebuffers ---

    /// Creates an empty framebuffer object.
    fn create_framebuffer(&self) -> Result<FrameBufferId, ResourceError>;
    /// Binds a framebuffer as the draw target, `None` binds the window surface.
    fn bind_framebuffer(&self, id: Option<FrameBufferId>);
    /// Attaches (or detaches with `None`) a texture to one attachment point
    /// of the bound framebuffer.
    fn attach_framebuffer_texture(
        &self,
        fb: FrameBufferId,
        point: AttachmentPoint,
        texture: Option<TextureId>,
    );
    /// Selects which color slots draw output goes to.
    fn set_draw_buffers(&self, slots: &[usize]);
    /// Verifies that the bound framebuffer is complete.
    fn check_framebuffer_complete(&self) -> Result<(), ResourceError>;
    /// Releases a framebuffer object.
    fn destroy_framebuffer(&self, id: FrameBufferId);

    // --- Readback ---

    /// Reads `width * height` RGBA8 pixels from a color slot of the bound
    /// framebuffer.
    fn read_color_pixels(&self, slot: usize, width: u32, height: u32)
        -> Result<Vec<u8>, ResourceError>;
    /// Reads `width * height` depth values from the bound framebuffer.
    fn read_depth_pixels(&self, width: u32, height: u32) -> Result<Vec<f32>, ResourceError>;

    // --- Draws and presentation ---

    /// Issues a non-indexed draw from the bound vertex buffer.
    fn draw_arrays(&self, topology: PrimitiveTopology, start_vertex: u32, vertex_count: u32);
    /// Issues an indexed draw from the bound index buffer.
    fn draw_indexed(
        &self,
        topology: PrimitiveTopology,
        format: IndexFormat,
        index_count: u32,
        start_index: u32,
    );

    /// Notifies the backend that the window surface changed size.
    fn resize_surface(&self, width: u32, height: u32);
    /// Swaps the window surface buffers, making the frame visible.
    fn swap_buffers(&self) -> Result<(), RenderError>;
}
