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

//! The immediate-mode rendering facade and its binding cache.

use std::sync::Arc;

use crate::renderer::api::{
    BufferKind, BufferUsage, IndexFormat, PolygonMode, PrimitiveTopology, ProgramId, ShaderStage,
    TextureId, TextureKind,
};
use crate::renderer::buffer::GpuBuffer;
use crate::renderer::error::{RenderError, ResourceError};
use crate::renderer::frame_buffer::{FrameBufferOffScreen, FrameBufferWindow};
use crate::renderer::program::ShaderProgram;
use crate::renderer::shader::{Shader, ShaderIncludeLibrary};
use crate::renderer::state::{
    BlendState, BlendStateDesc, DepthStencilState, DepthStencilStateDesc, RasterizerState,
    RasterizerStateDesc, SamplerState, SamplerStateDesc,
};
use crate::renderer::texture::Texture;
use crate::renderer::traits::{GraphicsDriver, Renderable};

/// Number of texture sampler slots the binding cache tracks.
pub const MAX_TEXTURE_SLOTS: usize = 8;

/// Number of vertex attribute slots the binding cache tracks.
pub const MAX_VERTEX_ATTRIBUTES: usize = 16;

/// Initial configuration of the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererSettings {
    /// Initial window surface width.
    pub window_width: u32,
    /// Initial window surface height.
    pub window_height: u32,
    /// Whether presentation waits for vertical sync.
    pub vsync: bool,
    /// Global polygon mode override, used by the debug wireframe path.
    pub polygon_mode: PolygonMode,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            vsync: true,
            polygon_mode: PolygonMode::Fill,
        }
    }
}

/// Counters accumulated over one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Number of draw calls issued.
    pub draw_calls: u32,
    /// Number of primitives submitted.
    pub triangles: u32,
}

/// What the renderer believes is bound on one texture slot.
#[derive(Debug, Clone, Default)]
pub struct TextureSlot {
    kind: Option<TextureKind>,
    id: Option<TextureId>,
    sampler: Option<Arc<SamplerState>>,
}

impl TextureSlot {
    /// The texture handle bound to the slot, if any.
    pub fn id(&self) -> Option<TextureId> {
        self.id
    }

    /// The sampler state last applied to the slot's texture.
    pub fn sampler(&self) -> Option<&Arc<SamplerState>> {
        self.sampler.as_ref()
    }
}

/// The renderer's record of what is currently bound on the driver.
///
/// All mutation goes through the setters so every cache update stays in one
/// place; the [`Renderer`] consults this record to skip redundant driver
/// calls.
#[derive(Debug, Default)]
pub struct RendererState {
    bound_program: Option<ProgramId>,
    blend: Option<Arc<BlendState>>,
    depth_stencil: Option<Arc<DepthStencilState>>,
    rasterizer: Option<Arc<RasterizerState>>,
    texture_slots: [TextureSlot; MAX_TEXTURE_SLOTS],
    vertex_attributes: [bool; MAX_VERTEX_ATTRIBUTES],
    last_renderable: Option<u64>,
}

impl RendererState {
    /// The currently bound program, if any.
    pub fn bound_program(&self) -> Option<ProgramId> {
        self.bound_program
    }

    fn set_bound_program(&mut self, program: Option<ProgramId>) {
        self.bound_program = program;
    }

    /// The active blend state, if one was ever set.
    pub fn blend(&self) -> Option<&Arc<BlendState>> {
        self.blend.as_ref()
    }

    fn set_blend(&mut self, state: Arc<BlendState>) {
        self.blend = Some(state);
    }

    /// The active depth-stencil state, if one was ever set.
    pub fn depth_stencil(&self) -> Option<&Arc<DepthStencilState>> {
        self.depth_stencil.as_ref()
    }

    fn set_depth_stencil(&mut self, state: Arc<DepthStencilState>) {
        self.depth_stencil = Some(state);
    }

    /// The active rasterizer state, if one was ever set.
    pub fn rasterizer(&self) -> Option<&Arc<RasterizerState>> {
        self.rasterizer.as_ref()
    }

    fn set_rasterizer(&mut self, state: Arc<RasterizerState>) {
        self.rasterizer = Some(state);
    }

    /// The binding record for one texture slot, `None` when out of range.
    pub fn texture_slot(&self, slot: usize) -> Option<&TextureSlot> {
        self.texture_slots.get(slot)
    }

    fn set_texture_slot(
        &mut self,
        slot: usize,
        kind: Option<TextureKind>,
        id: Option<TextureId>,
        sampler: Option<Arc<SamplerState>>,
    ) {
        if let Some(entry) = self.texture_slots.get_mut(slot) {
            *entry = TextureSlot { kind, id, sampler };
        }
    }

    /// Whether a vertex attribute slot is enabled.
    pub fn vertex_attribute_enabled(&self, slot: usize) -> bool {
        self.vertex_attributes[slot]
    }

    fn set_vertex_attribute(&mut self, slot: usize, enabled: bool) {
        self.vertex_attributes[slot] = enabled;
    }

    /// Identity of the last renderable whose geometry was bound.
    pub fn last_renderable(&self) -> Option<u64> {
        self.last_renderable
    }

    fn set_last_renderable(&mut self, id: Option<u64>) {
        self.last_renderable = id;
    }

    fn clear_rasterizer(&mut self) {
        self.rasterizer = None;
    }

    fn reset_per_frame(&mut self) {
        self.bound_program = None;
        for slot in &mut self.texture_slots {
            *slot = TextureSlot::default();
        }
        self.last_renderable = None;
    }
}

/// The immediate-mode rendering facade.
///
/// Owns the binding cache, the deduplicated sampler pool, and the shader
/// include library. Every engine-side object that needs the hardware goes
/// through this type; the concrete backend behind the [`GraphicsDriver`]
/// trait is chosen once at construction.
#[derive(Debug)]
pub struct Renderer {
    driver: Arc<dyn GraphicsDriver>,
    settings: RendererSettings,
    state: RendererState,
    samplers: Vec<Arc<SamplerState>>,
    includes: ShaderIncludeLibrary,
    wireframe_indices: Option<GpuBuffer>,
    window_width: u32,
    window_height: u32,
    stats: FrameStats,
    last_frame_stats: FrameStats,
}

impl Renderer {
    /// Creates a renderer over a concrete driver backend.
    pub fn new(driver: Arc<dyn GraphicsDriver>, settings: RendererSettings) -> Self {
        log::info!("Renderer backend: {}", driver.description());
        let window_width = settings.window_width;
        let window_height = settings.window_height;
        Self {
            driver,
            settings,
            state: RendererState::default(),
            samplers: Vec::new(),
            includes: ShaderIncludeLibrary::new(),
            wireframe_indices: None,
            window_width,
            window_height,
            stats: FrameStats::default(),
            last_frame_stats: FrameStats::default(),
        }
    }

    /// The driver this renderer talks to.
    pub fn driver(&self) -> &Arc<dyn GraphicsDriver> {
        &self.driver
    }

    /// The settings the renderer was created with.
    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// The current binding cache.
    pub fn state(&self) -> &RendererState {
        &self.state
    }

    /// Current window surface dimensions.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// The shader include library used to preprocess shader source.
    pub fn includes(&self) -> &ShaderIncludeLibrary {
        &self.includes
    }

    /// Mutable access to the shader include library.
    pub fn includes_mut(&mut self) -> &mut ShaderIncludeLibrary {
        &mut self.includes
    }

    /// Counters of the last completed frame.
    pub fn frame_stats(&self) -> FrameStats {
        self.last_frame_stats
    }

    /// Notifies the renderer that the window surface changed size.
    pub fn on_window_resized(&mut self, width: u32, height: u32) {
        if (width, height) == (self.window_width, self.window_height) {
            return;
        }
        log::debug!("Window resized to {width}x{height}");
        self.window_width = width;
        self.window_height = height;
        self.driver.resize_surface(width, height);
        self.driver.set_viewport(0, 0, width, height);
    }

    // --- Resource creation ---

    /// Creates a vertex buffer initialized with `data`.
    pub fn create_vertex_buffer(
        &self,
        usage: BufferUsage,
        data: &[u8],
    ) -> Result<GpuBuffer, ResourceError> {
        GpuBuffer::new(self.driver.clone(), BufferKind::Vertex, usage, data)
    }

    /// Creates an index buffer initialized with `data`.
    pub fn create_index_buffer(
        &self,
        usage: BufferUsage,
        data: &[u8],
    ) -> Result<GpuBuffer, ResourceError> {
        GpuBuffer::new(self.driver.clone(), BufferKind::Index, usage, data)
    }

    /// Creates a 2D texture. The name is used for diagnostics only.
    pub fn create_texture_2d(
        &self,
        name: &str,
        width: u32,
        height: u32,
    ) -> Result<Texture, ResourceError> {
        Texture::new(self.driver.clone(), name, TextureKind::D2, width, height)
    }

    /// Creates a cube texture.
    pub fn create_texture_cube(
        &self,
        name: &str,
        width: u32,
        height: u32,
    ) -> Result<Texture, ResourceError> {
        Texture::new(self.driver.clone(), name, TextureKind::Cube, width, height)
    }

    /// Creates a texture usable as a framebuffer attachment.
    pub fn create_texture_render(
        &self,
        name: &str,
        width: u32,
        height: u32,
    ) -> Result<Texture, ResourceError> {
        Texture::new(self.driver.clone(), name, TextureKind::Render, width, height)
    }

    /// Creates an empty shader program.
    pub fn create_shader_program(&self) -> Result<ShaderProgram, ResourceError> {
        ShaderProgram::new(self.driver.clone())
    }

    /// Creates one shader stage and compiles `source`, expanding
    /// `#include <name>` directives through the include library first.
    pub fn create_shader(
        &self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Shader, ResourceError> {
        let mut shader = Shader::new(self.driver.clone(), stage)?;
        let expanded = self.includes.preprocess(source);
        shader.compile(&expanded)?;
        Ok(shader)
    }

    /// Wraps a blend descriptor in a shareable state object.
    pub fn create_blend_state(&self, desc: BlendStateDesc) -> Arc<BlendState> {
        Arc::new(BlendState::new(desc))
    }

    /// Wraps a depth-stencil descriptor in a shareable state object.
    pub fn create_depth_stencil_state(
        &self,
        desc: DepthStencilStateDesc,
    ) -> Arc<DepthStencilState> {
        Arc::new(DepthStencilState::new(desc))
    }

    /// Wraps a rasterizer descriptor in a shareable state object.
    pub fn create_rasterizer_state(&self, desc: RasterizerStateDesc) -> Arc<RasterizerState> {
        Arc::new(RasterizerState::new(desc))
    }

    /// Creates an off-screen render target with no attachments.
    pub fn create_frame_buffer_off_screen(
        &self,
        width: u32,
        height: u32,
    ) -> Result<FrameBufferOffScreen, ResourceError> {
        FrameBufferOffScreen::new(self.driver.clone(), width, height)
    }

    /// Creates a render target for the window surface.
    pub fn create_frame_buffer_window(&self) -> FrameBufferWindow {
        FrameBufferWindow::new(self.driver.clone())
    }

    // --- Fixed-function state ---

    /// Activates a blend state, diffing against the previous one.
    ///
    /// Activating the same state object again is free; state identity is
    /// compared, not descriptor contents.
    pub fn set_blend_state(&mut self, state: Arc<BlendState>) {
        if let Some(current) = self.state.blend() {
            if Arc::ptr_eq(current, &state) {
                return;
            }
        }
        let previous = self.state.blend().map(|s| *s.desc());
        state.activate(self.driver.as_ref(), previous.as_ref());
        self.state.set_blend(state);
    }

    /// Activates a depth-stencil state, diffing against the previous one.
    pub fn set_depth_stencil_state(&mut self, state: Arc<DepthStencilState>) {
        if let Some(current) = self.state.depth_stencil() {
            if Arc::ptr_eq(current, &state) {
                return;
            }
        }
        let previous = self.state.depth_stencil().map(|s| *s.desc());
        state.activate(self.driver.as_ref(), previous.as_ref());
        self.state.set_depth_stencil(state);
    }

    /// Activates a rasterizer state, diffing against the previous one.
    pub fn set_rasterizer_state(&mut self, state: Arc<RasterizerState>) {
        if let Some(current) = self.state.rasterizer() {
            if Arc::ptr_eq(current, &state) {
                return;
            }
        }
        let previous = self.state.rasterizer().map(|s| *s.desc());
        state.activate(self.driver.as_ref(), previous.as_ref());
        self.state.set_rasterizer(state);
    }

    /// Returns a shared sampler state for `desc`, creating it on first use.
    ///
    /// Samplers are pooled by descriptor so equal descriptors always yield
    /// the same state object.
    pub fn sampler_state(&mut self, desc: SamplerStateDesc) -> Arc<SamplerState> {
        if let Some(existing) = self.samplers.iter().find(|s| *s.desc() == desc) {
            return existing.clone();
        }
        let state = Arc::new(SamplerState::new(desc));
        self.samplers.push(state.clone());
        state
    }

    // --- Texture binding ---

    /// Binds a texture and its sampler to a slot.
    ///
    /// When the slot already holds the same texture and sampler nothing is
    /// sent to the driver. An out-of-range slot is rejected with an error
    /// log.
    pub fn bind_texture(
        &mut self,
        slot: usize,
        texture: Option<&Texture>,
        sampler: Option<Arc<SamplerState>>,
    ) {
        let kind = texture.map(Texture::kind);
        let id = texture.map(Texture::id);

        let Some(current) = self.state.texture_slot(slot) else {
            log::error!("Texture slot {slot} is out of range");
            return;
        };
        let texture_unchanged = current.id == id && current.kind == kind;
        let sampler_unchanged = match (&current.sampler, &sampler) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if texture_unchanged && sampler_unchanged {
            return;
        }

        // Binding also selects the active slot the sampler calls target.
        self.driver
            .bind_texture(slot as u32, kind.unwrap_or(TextureKind::D2), id);

        if let (Some(sampler), Some(_)) = (&sampler, id) {
            // Sampler parameters live on the texture object, so the slot's
            // previous sampler only describes the newly bound texture when
            // the texture itself is unchanged.
            let previous = if texture_unchanged {
                current.sampler.as_ref().map(|s| *s.desc())
            } else {
                None
            };
            sampler.activate(self.driver.as_ref(), previous.as_ref());
        }

        let stored_sampler = if id.is_some() { sampler } else { None };
        self.state.set_texture_slot(slot, kind, id, stored_sampler);
    }

    // --- Programs ---

    /// Makes a program current, skipping the driver call when it already is.
    pub fn bind_shader_program(&mut self, program: &ShaderProgram) -> bool {
        if !program.is_linked() {
            log::error!("Cannot bind an unlinked shader program");
            return false;
        }
        if self.state.bound_program() == Some(program.id()) {
            return true;
        }
        self.driver.use_program(Some(program.id()));
        self.state.set_bound_program(Some(program.id()));
        // Attribute bindings are per renderable and per program; a program
        // switch invalidates the geometry cache.
        self.state.set_last_renderable(None);
        true
    }

    // --- Scissor ---

    /// Enables the scissor test and sets the rectangle from a
    /// top-left-origin rectangle.
    ///
    /// The driver expects a bottom-left origin, so the y coordinate is
    /// flipped against the window height. The cached rasterizer state is
    /// dropped so the next [`set_rasterizer_state`](Self::set_rasterizer_state)
    /// re-emits its full descriptor.
    pub fn set_scissor(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.driver.set_scissor_test_enabled(true);
        self.state.clear_rasterizer();
        let flipped_y = self.window_height as i32 - y - height as i32;
        self.driver.set_scissor_rect(x, flipped_y, width, height);
    }

    /// Disables the scissor test outside of rasterizer state control.
    ///
    /// The cached rasterizer state is dropped so the next
    /// [`set_rasterizer_state`](Self::set_rasterizer_state) re-emits its
    /// full descriptor, scissor enable included.
    pub fn end_scissor(&mut self) {
        self.driver.set_scissor_test_enabled(false);
        self.state.clear_rasterizer();
    }

    // --- Drawing ---

    /// Draws one renderable.
    ///
    /// Returns `false` without issuing driver work when the renderable has
    /// no program, its program is not linked, or its mesh has no geometry.
    pub fn draw(&mut self, renderable: &dyn Renderable) -> bool {
        let Some(program) = renderable.shader_program() else {
            log::debug!("Skipping renderable {} with no shader program", renderable.id());
            return false;
        };
        if !program.is_linked() {
            log::debug!(
                "Skipping renderable {} with an unlinked program",
                renderable.id()
            );
            return false;
        }

        if !self.bind_shader_program(&program) {
            return false;
        }

        renderable.bind_render_state(self);
        renderable.bind_shader_params(&program);
        program.bind_uniforms();

        if !self.bind_geometry(renderable, &program) {
            return false;
        }

        if !self.issue_draw(renderable) {
            return false;
        }
        program.unbind();
        true
    }

    /// Binds the renderable's buffers and vertex layout, skipping the work
    /// entirely when the same renderable was drawn last.
    fn bind_geometry(&mut self, renderable: &dyn Renderable, program: &ShaderProgram) -> bool {
        let mesh = renderable.mesh();
        let Some(vertex_buffer) = mesh.vertex_buffer() else {
            log::debug!("Renderable {} has no vertex buffer", renderable.id());
            return false;
        };

        if self.state.last_renderable() == Some(renderable.id()) {
            return true;
        }

        vertex_buffer.bind();

        let mut desired = [false; MAX_VERTEX_ATTRIBUTES];
        for element in mesh.vertex_elements() {
            let location = program.attribute_location(element.semantic);
            if location < 0 || location as usize >= MAX_VERTEX_ATTRIBUTES {
                continue;
            }
            desired[location as usize] = true;
            self.driver.set_vertex_attribute_pointer(
                location as u32,
                element.format,
                mesh.vertex_stride(),
                element.offset,
            );
        }

        for slot in 0..MAX_VERTEX_ATTRIBUTES {
            if desired[slot] == self.state.vertex_attribute_enabled(slot) {
                continue;
            }
            if desired[slot] {
                self.driver.enable_vertex_attribute(slot as u32);
            } else {
                self.driver.disable_vertex_attribute(slot as u32);
            }
            self.state.set_vertex_attribute(slot, desired[slot]);
        }

        if let Some(index_buffer) = mesh.index_buffer() {
            index_buffer.bind();
        }

        true
    }

    fn issue_draw(&mut self, renderable: &dyn Renderable) -> bool {
        let mesh = renderable.mesh();
        let topology = mesh.topology();

        let polygon_mode = self
            .state
            .rasterizer()
            .map(|r| r.desc().polygon_mode)
            .unwrap_or(self.settings.polygon_mode);

        if cfg!(debug_assertions)
            && polygon_mode != PolygonMode::Fill
            && topology == PrimitiveTopology::TriangleList
        {
            self.issue_wireframe_draw(renderable);
            return true;
        }

        match mesh.index_buffer() {
            Some(index_buffer) => {
                let stride = mesh.index_stride();
                let format = IndexFormat::from_stride(stride);
                let mut count = mesh.index_count();
                if count == 0 && stride > 0 {
                    count = (index_buffer.size() as u32) / stride;
                }
                self.driver
                    .draw_indexed(topology, format, count, mesh.start_index());
                self.stats.draw_calls += 1;
                self.stats.triangles += topology.primitive_count(count);
            }
            None => {
                if mesh.vertex_count() == 0 {
                    log::error!("Renderable {} has no vertices to draw", renderable.id());
                    return false;
                }
                self.driver
                    .draw_arrays(topology, mesh.start_vertex(), mesh.vertex_count());
                self.stats.draw_calls += 1;
                self.stats.triangles += topology.primitive_count(mesh.vertex_count());
            }
        }
        self.state.set_last_renderable(Some(renderable.id()));
        true
    }

    /// Debug-build wireframe path: rebuilds the triangle indices as a line
    /// list and draws that instead.
    fn issue_wireframe_draw(&mut self, renderable: &dyn Renderable) {
        let mesh = renderable.mesh();

        let lines = if mesh.index_buffer().is_some() {
            wireframe_line_indices(mesh.indices(), mesh.index_stride())
        } else {
            sequential_line_indices(mesh.vertex_count())
        };
        if lines.is_empty() {
            return;
        }

        let data = bytemuck::cast_slice(&lines);
        let uploaded = match &mut self.wireframe_indices {
            Some(buffer) => buffer.update_data(data),
            None => match GpuBuffer::new(
                self.driver.clone(),
                BufferKind::Index,
                BufferUsage::Dynamic,
                data,
            ) {
                Ok(buffer) => {
                    self.wireframe_indices = Some(buffer);
                    true
                }
                Err(err) => {
                    log::error!("Failed to create wireframe index buffer: {err}");
                    false
                }
            },
        };
        if !uploaded {
            return;
        }

        if let Some(buffer) = &self.wireframe_indices {
            buffer.bind();
            self.driver.draw_indexed(
                PrimitiveTopology::LineList,
                IndexFormat::Uint32,
                lines.len() as u32,
                0,
            );
            self.stats.draw_calls += 1;
            self.stats.triangles += (lines.len() / 6) as u32;
        }

        // The substitute index binding invalidates the geometry cache.
        self.state.set_last_renderable(None);
    }

    // --- Presentation ---

    /// Finishes the frame: resets the per-frame binding cache, publishes
    /// the frame counters, and swaps the window surface.
    pub fn present(&mut self) -> Result<(), RenderError> {
        self.driver.use_program(None);
        self.state.reset_per_frame();
        self.last_frame_stats = std::mem::take(&mut self.stats);
        self.driver.swap_buffers()
    }
}

/// Expands triangle-list indices into line-list indices, one line per edge.
fn wireframe_line_indices(indices: &[u8], stride: u32) -> Vec<u32> {
    let read = |i: usize| -> u32 {
        let offset = i * stride as usize;
        match stride {
            4 => u32::from_le_bytes([
                indices[offset],
                indices[offset + 1],
                indices[offset + 2],
                indices[offset + 3],
            ]),
            2 => u16::from_le_bytes([indices[offset], indices[offset + 1]]) as u32,
            _ => indices[offset] as u32,
        }
    };

    if stride == 0 {
        return Vec::new();
    }
    let index_count = indices.len() / stride as usize;
    let triangle_count = index_count / 3;
    let mut lines = Vec::with_capacity(triangle_count * 6);
    for triangle in 0..triangle_count {
        let (a, b, c) = (
            read(triangle * 3),
            read(triangle * 3 + 1),
            read(triangle * 3 + 2),
        );
        lines.extend_from_slice(&[a, b, b, c, c, a]);
    }
    lines
}

/// Line-list indices outlining sequential non-indexed triangles.
fn sequential_line_indices(vertex_count: u32) -> Vec<u32> {
    let triangle_count = vertex_count / 3;
    let mut lines = Vec::with_capacity(triangle_count as usize * 6);
    for triangle in 0..triangle_count {
        let base = triangle * 3;
        lines.extend_from_slice(&[base, base + 1, base + 1, base + 2, base + 2, base]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wireframe_indices_from_u16_triangles() {
        let indices: Vec<u8> = [0u16, 1, 2, 2, 3, 0]
            .iter()
            .flat_map(|i| i.to_le_bytes())
            .collect();
        let lines = wireframe_line_indices(&indices, 2);
        assert_eq!(lines, vec![0, 1, 1, 2, 2, 0, 2, 3, 3, 0, 0, 2]);
    }

    #[test]
    fn wireframe_indices_from_u32_triangle() {
        let indices: Vec<u8> = [5u32, 6, 7].iter().flat_map(|i| i.to_le_bytes()).collect();
        assert_eq!(wireframe_line_indices(&indices, 4), vec![5, 6, 6, 7, 7, 5]);
    }

    #[test]
    fn wireframe_indices_ignore_trailing_partial_triangle() {
        let indices: Vec<u8> = [0u16, 1, 2, 3]
            .iter()
            .flat_map(|i| i.to_le_bytes())
            .collect();
        assert_eq!(wireframe_line_indices(&indices, 2).len(), 6);
    }

    #[test]
    fn sequential_lines_cover_each_triangle() {
        assert_eq!(sequential_line_indices(6).len(), 12);
        assert_eq!(sequential_line_indices(2), Vec::<u32>::new());
        assert_eq!(sequential_line_indices(3), vec![0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn default_settings() {
        let settings = RendererSettings::default();
        assert_eq!(settings.window_width, 1280);
        assert_eq!(settings.polygon_mode, PolygonMode::Fill);
        assert!(settings.vsync);
    }
}
