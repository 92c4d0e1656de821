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

//! The in-memory [`GraphicsDriver`] implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use lumen_core::math::LinearRgba;
use lumen_core::renderer::{
    AddressMode, AttachmentPoint, BlendFactor, BlendOperation, BufferId, BufferKind, BufferUsage,
    ColorWrites, CompareFunction, CullMode, FilterMode, FrameBufferId, FrontFace, GraphicsDriver,
    IndexFormat, MipFilter, PrimitiveTopology, ProgramId, RenderError, ResourceError, ShaderError,
    ShaderId, ShaderStage, StencilFace, StencilOperation, TextureAxis, TextureId, TextureKind,
    UniformLocation, UniformReflection, UniformValue, VertexFormat, MAX_COLOR_ATTACHMENTS,
};

use super::reflect;
use super::state::FixedFunctionState;

#[derive(Debug, Default)]
struct BufferEntry {
    kind: Option<BufferKind>,
    usage: Option<BufferUsage>,
    data: Vec<u8>,
}

#[derive(Debug)]
struct ShaderEntry {
    stage: ShaderStage,
    source: String,
    compiled: bool,
}

#[derive(Debug, Default)]
struct ProgramEntry {
    attached: Vec<usize>,
    linked: bool,
    uniforms: Vec<UniformReflection>,
    uniform_locations: HashMap<String, i32>,
    attribute_locations: HashMap<String, i32>,
}

#[derive(Debug)]
struct TextureEntry {
    kind: TextureKind,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    depth: Vec<f32>,
}

impl TextureEntry {
    fn allocate(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width * height * 4) as usize];
        self.depth = vec![1.0; (width * height) as usize];
    }
}

#[derive(Debug, Default)]
struct FramebufferEntry {
    color: [Option<usize>; MAX_COLOR_ATTACHMENTS],
    depth_stencil: Option<usize>,
}

#[derive(Debug)]
struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    depth: Vec<f32>,
}

impl Surface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
            depth: vec![1.0; (width * height) as usize],
        }
    }
}

#[derive(Debug, Default)]
struct Bindings {
    vertex_buffer: Option<usize>,
    index_buffer: Option<usize>,
    framebuffer: Option<usize>,
    program: Option<usize>,
    texture_slots: [Option<usize>; 8],
    draw_buffers: Vec<usize>,
}

/// One draw command as the driver received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    /// Primitive assembly mode.
    pub topology: PrimitiveTopology,
    /// Whether the draw was indexed.
    pub indexed: bool,
    /// Index width for indexed draws.
    pub format: Option<IndexFormat>,
    /// Element count.
    pub count: u32,
    /// First element.
    pub start: u32,
}

/// A headless driver that executes the [`GraphicsDriver`] contract against
/// CPU memory.
///
/// Every fixed-function setter appends a label to the transition log, so
/// tests can assert exactly how many state changes a sequence of engine
/// calls produced. Resource state is fully introspectable.
#[derive(Debug)]
pub struct SoftDriver {
    independent_alpha_write: bool,
    next_id: AtomicUsize,
    fixed: Mutex<FixedFunctionState>,
    transitions: Mutex<Vec<String>>,
    buffers: Mutex<HashMap<usize, BufferEntry>>,
    shaders: Mutex<HashMap<usize, ShaderEntry>>,
    programs: Mutex<HashMap<usize, ProgramEntry>>,
    textures: Mutex<HashMap<usize, TextureEntry>>,
    framebuffers: Mutex<HashMap<usize, FramebufferEntry>>,
    bindings: Mutex<Bindings>,
    uniform_uploads: Mutex<Vec<(i32, UniformValue)>>,
    draw_calls: Mutex<Vec<DrawCall>>,
    window: Mutex<Surface>,
    frames_presented: AtomicUsize,
}

impl SoftDriver {
    /// Creates a driver with a 1280x720 window surface.
    pub fn new() -> Self {
        Self::with_capabilities(true)
    }

    /// Creates a driver, choosing whether the alpha channel can be masked
    /// independently of the color channels.
    pub fn with_capabilities(independent_alpha_write: bool) -> Self {
        Self {
            independent_alpha_write,
            next_id: AtomicUsize::new(1),
            fixed: Mutex::new(FixedFunctionState::default()),
            transitions: Mutex::new(Vec::new()),
            buffers: Mutex::new(HashMap::new()),
            shaders: Mutex::new(HashMap::new()),
            programs: Mutex::new(HashMap::new()),
            textures: Mutex::new(HashMap::new()),
            framebuffers: Mutex::new(HashMap::new()),
            bindings: Mutex::new(Bindings::default()),
            uniform_uploads: Mutex::new(Vec::new()),
            draw_calls: Mutex::new(Vec::new()),
            window: Mutex::new(Surface::new(1280, 720)),
            frames_presented: AtomicUsize::new(0),
        }
    }

    fn alloc_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn record(&self, label: &str) {
        self.transitions.lock().unwrap().push(label.to_string());
    }

    // --- Test and tooling introspection ---

    /// All fixed-function transition labels recorded so far.
    pub fn transition_log(&self) -> Vec<String> {
        self.transitions.lock().unwrap().clone()
    }

    /// Number of fixed-function transitions recorded so far.
    pub fn transition_count(&self) -> usize {
        self.transitions.lock().unwrap().len()
    }

    /// Empties the transition log.
    pub fn clear_transition_log(&self) {
        self.transitions.lock().unwrap().clear();
    }

    /// Drains the uniform upload log as `(location, value)` pairs.
    pub fn take_uniform_uploads(&self) -> Vec<(i32, UniformValue)> {
        std::mem::take(&mut self.uniform_uploads.lock().unwrap())
    }

    /// All draw commands received so far.
    pub fn draw_log(&self) -> Vec<DrawCall> {
        self.draw_calls.lock().unwrap().clone()
    }

    /// Empties the draw log.
    pub fn clear_draw_log(&self) {
        self.draw_calls.lock().unwrap().clear();
    }

    /// Snapshot of the fixed-function state.
    pub fn fixed_state(&self) -> FixedFunctionState {
        self.fixed.lock().unwrap().clone()
    }

    /// Number of completed [`swap_buffers`](GraphicsDriver::swap_buffers)
    /// calls.
    pub fn frames_presented(&self) -> usize {
        self.frames_presented.load(Ordering::Relaxed)
    }

    /// Contents of a buffer, if it exists.
    pub fn buffer_contents(&self, id: BufferId) -> Option<Vec<u8>> {
        self.buffers.lock().unwrap().get(&id.0).map(|b| b.data.clone())
    }

    // --- Internals ---

    fn fill_rgba(pixels: &mut [u8], rgba: [u8; 4]) {
        for chunk in pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Copies `width * height` RGBA rows out of `src`, zero-padding pixels
    /// outside the source extents.
    fn copy_rgba(
        src: &[u8],
        src_width: u32,
        src_height: u32,
        width: u32,
        height: u32,
    ) -> Vec<u8> {
        let mut out = vec![0u8; (width * height * 4) as usize];
        for y in 0..height.min(src_height) {
            for x in 0..width.min(src_width) {
                let src_at = ((y * src_width + x) * 4) as usize;
                let dst_at = ((y * width + x) * 4) as usize;
                out[dst_at..dst_at + 4].copy_from_slice(&src[src_at..src_at + 4]);
            }
        }
        out
    }

    fn copy_depth(
        src: &[f32],
        src_width: u32,
        src_height: u32,
        width: u32,
        height: u32,
    ) -> Vec<f32> {
        let mut out = vec![0.0f32; (width * height) as usize];
        for y in 0..height.min(src_height) {
            for x in 0..width.min(src_width) {
                out[(y * width + x) as usize] = src[(y * src_width + x) as usize];
            }
        }
        out
    }
}

impl Default for SoftDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDriver for SoftDriver {
    fn description(&self) -> String {
        "soft (headless, in-memory)".to_string()
    }

    fn supports_independent_alpha_write(&self) -> bool {
        self.independent_alpha_write
    }

    // --- Blend state ---

    fn set_blend_enabled(&self, enabled: bool) {
        self.fixed.lock().unwrap().blend_enabled = enabled;
        self.record("blend.enabled");
    }

    fn set_blend_func(&self, src: BlendFactor, dst: BlendFactor) {
        let mut fixed = self.fixed.lock().unwrap();
        fixed.blend_src = src;
        fixed.blend_dst = dst;
        drop(fixed);
        self.record("blend.func");
    }

    fn set_blend_op(&self, op: BlendOperation) {
        self.fixed.lock().unwrap().blend_op = op;
        self.record("blend.op");
    }

    fn set_blend_color(&self, color: LinearRgba) {
        self.fixed.lock().unwrap().blend_color = color;
        self.record("blend.color");
    }

    fn set_color_write_mask(&self, mask: ColorWrites) {
        self.fixed.lock().unwrap().color_write_mask = mask;
        self.record("blend.write_mask");
    }

    fn set_alpha_to_coverage(&self, enabled: bool) {
        self.fixed.lock().unwrap().alpha_to_coverage = enabled;
        self.record("blend.alpha_to_coverage");
    }

    // --- Depth / stencil state ---

    fn set_depth_test_enabled(&self, enabled: bool) {
        self.fixed.lock().unwrap().depth_test = enabled;
        self.record("depth.test");
    }

    fn set_depth_write_enabled(&self, enabled: bool) {
        self.fixed.lock().unwrap().depth_write = enabled;
        self.record("depth.write");
    }

    fn set_depth_compare(&self, func: CompareFunction) {
        self.fixed.lock().unwrap().depth_compare = func;
        self.record("depth.compare");
    }

    fn set_stencil_enabled(&self, face: StencilFace, enabled: bool) {
        let mut fixed = self.fixed.lock().unwrap();
        let shadow = match face {
            StencilFace::Front => &mut fixed.stencil_front,
            StencilFace::Back => &mut fixed.stencil_back,
        };
        shadow.enabled = enabled;
        drop(fixed);
        self.record(match face {
            StencilFace::Front => "stencil.front.enabled",
            StencilFace::Back => "stencil.back.enabled",
        });
    }

    fn set_stencil_func(&self, face: StencilFace, func: CompareFunction, reference: u32, read_mask: u32) {
        let mut fixed = self.fixed.lock().unwrap();
        let shadow = match face {
            StencilFace::Front => &mut fixed.stencil_front,
            StencilFace::Back => &mut fixed.stencil_back,
        };
        shadow.func = func;
        shadow.reference = reference;
        shadow.read_mask = read_mask;
        drop(fixed);
        self.record(match face {
            StencilFace::Front => "stencil.front.func",
            StencilFace::Back => "stencil.back.func",
        });
    }

    fn set_stencil_op(
        &self,
        face: StencilFace,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
        write_mask: u32,
    ) {
        let mut fixed = self.fixed.lock().unwrap();
        let shadow = match face {
            StencilFace::Front => &mut fixed.stencil_front,
            StencilFace::Back => &mut fixed.stencil_back,
        };
        shadow.fail = fail;
        shadow.depth_fail = depth_fail;
        shadow.pass = pass;
        shadow.write_mask = write_mask;
        drop(fixed);
        self.record(match face {
            StencilFace::Front => "stencil.front.op",
            StencilFace::Back => "stencil.back.op",
        });
    }

    // --- Rasterizer state ---

    fn set_cull_mode(&self, mode: Option<CullMode>) {
        self.fixed.lock().unwrap().cull_mode = mode;
        self.record("raster.cull");
    }

    fn set_front_face(&self, winding: FrontFace) {
        self.fixed.lock().unwrap().front_face = winding;
        self.record("raster.front_face");
    }

    fn set_polygon_offset(&self, enabled: bool, factor: f32, units: f32) {
        self.fixed.lock().unwrap().polygon_offset = (enabled, factor, units);
        self.record("raster.polygon_offset");
    }

    fn set_scissor_test_enabled(&self, enabled: bool) {
        self.fixed.lock().unwrap().scissor_test = enabled;
        self.record("raster.scissor_test");
    }

    fn set_multisample_enabled(&self, enabled: bool) {
        self.fixed.lock().unwrap().multisample = enabled;
        self.record("raster.multisample");
    }

    // --- Sampler state ---

    fn set_texture_min_filter(&self, _filter: FilterMode, _mip: MipFilter) {
        self.record("sampler.min_filter");
    }

    fn set_texture_mag_filter(&self, _filter: FilterMode) {
        self.record("sampler.mag_filter");
    }

    fn set_texture_wrap(&self, axis: TextureAxis, _mode: AddressMode) {
        self.record(match axis {
            TextureAxis::U => "sampler.wrap.u",
            TextureAxis::V => "sampler.wrap.v",
            TextureAxis::W => "sampler.wrap.w",
        });
    }

    // --- Viewport, scissor, clears ---

    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        self.fixed.lock().unwrap().viewport = (x, y, width, height);
    }

    fn set_scissor_rect(&self, x: i32, y: i32, width: u32, height: u32) {
        self.fixed.lock().unwrap().scissor_rect = (x, y, width, height);
    }

    fn clear_color_slot(&self, slot: usize, color: LinearRgba) {
        let rgba = color.to_rgba8();
        let bound = self.bindings.lock().unwrap().framebuffer;
        match bound {
            None => {
                if slot == 0 {
                    Self::fill_rgba(&mut self.window.lock().unwrap().pixels, rgba);
                }
            }
            Some(fb) => {
                let framebuffers = self.framebuffers.lock().unwrap();
                let Some(texture_id) = framebuffers.get(&fb).and_then(|f| f.color[slot]) else {
                    return;
                };
                drop(framebuffers);
                if let Some(texture) = self.textures.lock().unwrap().get_mut(&texture_id) {
                    Self::fill_rgba(&mut texture.pixels, rgba);
                }
            }
        }
    }

    fn clear_depth_stencil(&self, depth: Option<f32>, _stencil: Option<u32>) {
        let Some(depth) = depth else { return };
        let bound = self.bindings.lock().unwrap().framebuffer;
        match bound {
            None => {
                self.window.lock().unwrap().depth.fill(depth);
            }
            Some(fb) => {
                let framebuffers = self.framebuffers.lock().unwrap();
                let Some(texture_id) = framebuffers.get(&fb).and_then(|f| f.depth_stencil) else {
                    return;
                };
                drop(framebuffers);
                if let Some(texture) = self.textures.lock().unwrap().get_mut(&texture_id) {
                    texture.depth.fill(depth);
                }
            }
        }
    }

    // --- Buffers ---

    fn create_buffer(&self) -> Result<BufferId, ResourceError> {
        let id = self.alloc_id();
        self.buffers.lock().unwrap().insert(id, BufferEntry::default());
        Ok(BufferId(id))
    }

    fn upload_buffer(
        &self,
        id: BufferId,
        kind: BufferKind,
        usage: BufferUsage,
        data: &[u8],
    ) -> Result<(), ResourceError> {
        let mut buffers = self.buffers.lock().unwrap();
        let entry = buffers.get_mut(&id.0).ok_or(ResourceError::InvalidHandle)?;
        entry.kind = Some(kind);
        entry.usage = Some(usage);
        entry.data = data.to_vec();
        Ok(())
    }

    fn bind_buffer(&self, id: BufferId, kind: BufferKind) {
        let mut bindings = self.bindings.lock().unwrap();
        match kind {
            BufferKind::Vertex => bindings.vertex_buffer = Some(id.0),
            BufferKind::Index => bindings.index_buffer = Some(id.0),
        }
    }

    fn destroy_buffer(&self, id: BufferId) {
        self.buffers.lock().unwrap().remove(&id.0);
    }

    // --- Shaders and programs ---

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, ResourceError> {
        let id = self.alloc_id();
        self.shaders.lock().unwrap().insert(
            id,
            ShaderEntry {
                stage,
                source: String::new(),
                compiled: false,
            },
        );
        Ok(ShaderId(id))
    }

    fn compile_shader(&self, id: ShaderId, source: &str) -> Result<String, ShaderError> {
        let mut shaders = self.shaders.lock().unwrap();
        let entry = shaders.get_mut(&id.0).ok_or_else(|| ShaderError::CompilationError {
            label: "unknown".to_string(),
            details: "no such shader object".to_string(),
        })?;
        entry.compiled = false;

        if source.trim().is_empty() {
            return Err(ShaderError::CompilationError {
                label: entry.stage.desc_label().to_string(),
                details: "empty shader source".to_string(),
            });
        }
        if let Some(line) = source.lines().find(|l| l.trim_start().starts_with("#error")) {
            return Err(ShaderError::CompilationError {
                label: entry.stage.desc_label().to_string(),
                details: line.trim().to_string(),
            });
        }

        entry.source = source.to_string();
        entry.compiled = true;
        Ok(String::new())
    }

    fn destroy_shader(&self, id: ShaderId) {
        self.shaders.lock().unwrap().remove(&id.0);
    }

    fn create_program(&self) -> Result<ProgramId, ResourceError> {
        let id = self.alloc_id();
        self.programs.lock().unwrap().insert(id, ProgramEntry::default());
        Ok(ProgramId(id))
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        if let Some(entry) = self.programs.lock().unwrap().get_mut(&program.0) {
            entry.attached.push(shader.0);
        }
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        if let Some(entry) = self.programs.lock().unwrap().get_mut(&program.0) {
            entry.attached.retain(|&id| id != shader.0);
        }
    }

    fn link_program(&self, program: ProgramId) -> Result<(), ShaderError> {
        let shaders = self.shaders.lock().unwrap();
        let mut programs = self.programs.lock().unwrap();
        let entry = programs.get_mut(&program.0).ok_or_else(|| ShaderError::LinkError {
            details: "no such program object".to_string(),
        })?;
        entry.linked = false;

        let attached: Vec<&ShaderEntry> = entry
            .attached
            .iter()
            .filter_map(|id| shaders.get(id))
            .collect();

        let has_stage = |stage: ShaderStage| {
            attached.iter().any(|s| s.stage == stage && s.compiled)
        };
        if !has_stage(ShaderStage::Vertex) || !has_stage(ShaderStage::Fragment) {
            return Err(ShaderError::LinkError {
                details: "program requires compiled vertex and fragment stages".to_string(),
            });
        }

        entry.uniforms.clear();
        entry.uniform_locations.clear();
        entry.attribute_locations.clear();

        let mut next_location = 0i32;
        for shader in &attached {
            for uniform in reflect::scan_uniforms(&shader.source) {
                if entry.uniform_locations.contains_key(&uniform.name) {
                    continue;
                }
                entry.uniform_locations.insert(uniform.name.clone(), next_location);
                next_location += 1;
                entry.uniforms.push(uniform);
            }
        }

        let mut next_attribute = 0i32;
        for shader in attached.iter().filter(|s| s.stage == ShaderStage::Vertex) {
            for name in reflect::scan_attributes(&shader.source) {
                if entry.attribute_locations.contains_key(&name) {
                    continue;
                }
                entry.attribute_locations.insert(name, next_attribute);
                next_attribute += 1;
            }
        }

        entry.linked = true;
        Ok(())
    }

    fn destroy_program(&self, id: ProgramId) {
        self.programs.lock().unwrap().remove(&id.0);
    }

    fn active_uniforms(&self, program: ProgramId) -> Vec<UniformReflection> {
        self.programs
            .lock()
            .unwrap()
            .get(&program.0)
            .map(|p| p.uniforms.clone())
            .unwrap_or_default()
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> UniformLocation {
        let location = self
            .programs
            .lock()
            .unwrap()
            .get(&program.0)
            .and_then(|p| p.uniform_locations.get(name).copied())
            .unwrap_or(-1);
        UniformLocation(location)
    }

    fn attribute_location(&self, program: ProgramId, name: &str) -> i32 {
        self.programs
            .lock()
            .unwrap()
            .get(&program.0)
            .and_then(|p| p.attribute_locations.get(name).copied())
            .unwrap_or(-1)
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.bindings.lock().unwrap().program = program.map(|p| p.0);
    }

    fn set_uniform(&self, location: UniformLocation, value: &UniformValue) {
        self.uniform_uploads
            .lock()
            .unwrap()
            .push((location.0, value.clone()));
    }

    // --- Vertex attributes ---

    fn enable_vertex_attribute(&self, _slot: u32) {}

    fn disable_vertex_attribute(&self, _slot: u32) {}

    fn set_vertex_attribute_pointer(
        &self,
        _slot: u32,
        _format: VertexFormat,
        _stride: u32,
        _offset: u32,
    ) {
    }

    // --- Textures ---

    fn create_texture(&self, kind: TextureKind) -> Result<TextureId, ResourceError> {
        let id = self.alloc_id();
        self.textures.lock().unwrap().insert(
            id,
            TextureEntry {
                kind,
                width: 0,
                height: 0,
                pixels: Vec::new(),
                depth: Vec::new(),
            },
        );
        Ok(TextureId(id))
    }

    fn allocate_texture_storage(
        &self,
        id: TextureId,
        width: u32,
        height: u32,
    ) -> Result<(), ResourceError> {
        let mut textures = self.textures.lock().unwrap();
        let entry = textures.get_mut(&id.0).ok_or(ResourceError::InvalidHandle)?;
        entry.allocate(width, height);
        Ok(())
    }

    fn bind_texture(&self, slot: u32, _kind: TextureKind, id: Option<TextureId>) {
        let mut bindings = self.bindings.lock().unwrap();
        if let Some(target) = bindings.texture_slots.get_mut(slot as usize) {
            *target = id.map(|t| t.0);
        }
    }

    fn destroy_texture(&self, id: TextureId) {
        self.textures.lock().unwrap().remove(&id.0);
    }

    // --- Framebuffers ---

    fn create_framebuffer(&self) -> Result<FrameBufferId, ResourceError> {
        let id = self.alloc_id();
        self.framebuffers
            .lock()
            .unwrap()
            .insert(id, FramebufferEntry::default());
        Ok(FrameBufferId(id))
    }

    fn bind_framebuffer(&self, id: Option<FrameBufferId>) {
        self.bindings.lock().unwrap().framebuffer = id.map(|f| f.0);
    }

    fn attach_framebuffer_texture(
        &self,
        fb: FrameBufferId,
        point: AttachmentPoint,
        texture: Option<TextureId>,
    ) {
        let mut framebuffers = self.framebuffers.lock().unwrap();
        let Some(entry) = framebuffers.get_mut(&fb.0) else {
            return;
        };
        match point.color_index() {
            Some(slot) => entry.color[slot] = texture.map(|t| t.0),
            None => entry.depth_stencil = texture.map(|t| t.0),
        }
    }

    fn set_draw_buffers(&self, slots: &[usize]) {
        self.bindings.lock().unwrap().draw_buffers = slots.to_vec();
    }

    fn check_framebuffer_complete(&self) -> Result<(), ResourceError> {
        let Some(fb) = self.bindings.lock().unwrap().framebuffer else {
            return Ok(());
        };
        let framebuffers = self.framebuffers.lock().unwrap();
        let entry = framebuffers.get(&fb).ok_or(ResourceError::InvalidHandle)?;

        let textures = self.textures.lock().unwrap();
        let mut size: Option<(u32, u32)> = None;
        let attached = entry
            .color
            .iter()
            .flatten()
            .chain(entry.depth_stencil.iter());
        let mut count = 0;
        for id in attached {
            let texture = textures.get(id).ok_or(ResourceError::InvalidHandle)?;
            count += 1;
            match size {
                None => size = Some((texture.width, texture.height)),
                Some(expected) if expected != (texture.width, texture.height) => {
                    return Err(ResourceError::IncompleteFrameBuffer(
                        "attachment sizes differ".to_string(),
                    ));
                }
                Some(_) => {}
            }
        }
        if count == 0 {
            return Err(ResourceError::IncompleteFrameBuffer(
                "no attachments".to_string(),
            ));
        }
        Ok(())
    }

    fn destroy_framebuffer(&self, id: FrameBufferId) {
        self.framebuffers.lock().unwrap().remove(&id.0);
    }

    // --- Readback ---

    fn read_color_pixels(
        &self,
        slot: usize,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ResourceError> {
        let bound = self.bindings.lock().unwrap().framebuffer;
        match bound {
            None => {
                let window = self.window.lock().unwrap();
                Ok(Self::copy_rgba(
                    &window.pixels,
                    window.width,
                    window.height,
                    width,
                    height,
                ))
            }
            Some(fb) => {
                let framebuffers = self.framebuffers.lock().unwrap();
                let texture_id = framebuffers
                    .get(&fb)
                    .and_then(|f| f.color[slot])
                    .ok_or_else(|| {
                        ResourceError::BackendError(format!("no color attachment on slot {slot}"))
                    })?;
                drop(framebuffers);
                let textures = self.textures.lock().unwrap();
                let texture = textures.get(&texture_id).ok_or(ResourceError::InvalidHandle)?;
                Ok(Self::copy_rgba(
                    &texture.pixels,
                    texture.width,
                    texture.height,
                    width,
                    height,
                ))
            }
        }
    }

    fn read_depth_pixels(&self, width: u32, height: u32) -> Result<Vec<f32>, ResourceError> {
        let bound = self.bindings.lock().unwrap().framebuffer;
        match bound {
            None => {
                let window = self.window.lock().unwrap();
                Ok(Self::copy_depth(
                    &window.depth,
                    window.width,
                    window.height,
                    width,
                    height,
                ))
            }
            Some(fb) => {
                let framebuffers = self.framebuffers.lock().unwrap();
                let texture_id = framebuffers
                    .get(&fb)
                    .and_then(|f| f.depth_stencil)
                    .ok_or_else(|| {
                        ResourceError::BackendError("no depth-stencil attachment".to_string())
                    })?;
                drop(framebuffers);
                let textures = self.textures.lock().unwrap();
                let texture = textures.get(&texture_id).ok_or(ResourceError::InvalidHandle)?;
                Ok(Self::copy_depth(
                    &texture.depth,
                    texture.width,
                    texture.height,
                    width,
                    height,
                ))
            }
        }
    }

    // --- Draws and presentation ---

    fn draw_arrays(&self, topology: PrimitiveTopology, start_vertex: u32, vertex_count: u32) {
        self.draw_calls.lock().unwrap().push(DrawCall {
            topology,
            indexed: false,
            format: None,
            count: vertex_count,
            start: start_vertex,
        });
    }

    fn draw_indexed(
        &self,
        topology: PrimitiveTopology,
        format: IndexFormat,
        index_count: u32,
        start_index: u32,
    ) {
        self.draw_calls.lock().unwrap().push(DrawCall {
            topology,
            indexed: true,
            format: Some(format),
            count: index_count,
            start: start_index,
        });
    }

    fn resize_surface(&self, width: u32, height: u32) {
        *self.window.lock().unwrap() = Surface::new(width, height);
    }

    fn swap_buffers(&self) -> Result<(), RenderError> {
        self.frames_presented.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
