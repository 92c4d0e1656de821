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

//! End-to-end draw submission through the renderer facade.

use std::sync::Arc;

use lumen_core::renderer::{
    BlendState, BlendStateDesc, BufferKind, BufferUsage, DepthStencilState, DepthStencilStateDesc,
    GpuBuffer, GraphicsDriver, IndexFormat, Mesh, PolygonMode, PrimitiveTopology, RasterizerState,
    RasterizerStateDesc, Renderable, Renderer, RendererSettings, SamplerStateDesc, Shader,
    ShaderProgram, ShaderStage, Texture, TextureKind, UniformValue, VertexElement, VertexFormat,
    VertexSemantic,
};
use lumen_infra::SoftDriver;

const VS: &str = "attribute vec3 a_Position;\nuniform mat4 u_Mvp;\nvoid main() {}\n";
const FS: &str = "uniform vec4 u_Color;\nvoid main() {}\n";

fn setup() -> (Arc<SoftDriver>, Renderer) {
    let _ = env_logger::builder().is_test(true).try_init();
    let driver = Arc::new(SoftDriver::new());
    let renderer = Renderer::new(driver.clone(), RendererSettings::default());
    (driver, renderer)
}

fn linked_program(driver: &Arc<SoftDriver>) -> Arc<ShaderProgram> {
    let mut program = ShaderProgram::new(driver.clone()).unwrap();
    for (stage, source) in [(ShaderStage::Vertex, VS), (ShaderStage::Fragment, FS)] {
        let mut shader = Shader::new(driver.clone(), stage).unwrap();
        shader.compile(source).unwrap();
        program.attach_shader(shader).unwrap();
    }
    assert!(program.link_shaders());
    Arc::new(program)
}

struct TestMesh {
    vertex_buffer: GpuBuffer,
    index_buffer: Option<GpuBuffer>,
    raw_indices: Vec<u8>,
    vertex_count: u32,
    elements: Vec<VertexElement>,
}

impl TestMesh {
    /// A quad as two indexed triangles with u16 indices.
    fn quad(driver: &Arc<SoftDriver>) -> Self {
        let vertices = vec![0u8; 4 * 12];
        let raw_indices: Vec<u8> = [0u16, 1, 2, 2, 3, 0]
            .iter()
            .flat_map(|i| i.to_le_bytes())
            .collect();
        Self {
            vertex_buffer: GpuBuffer::new(
                driver.clone(),
                BufferKind::Vertex,
                BufferUsage::Static,
                &vertices,
            )
            .unwrap(),
            index_buffer: Some(
                GpuBuffer::new(
                    driver.clone(),
                    BufferKind::Index,
                    BufferUsage::Static,
                    &raw_indices,
                )
                .unwrap(),
            ),
            raw_indices,
            vertex_count: 4,
            elements: vec![VertexElement {
                semantic: VertexSemantic::Position,
                format: VertexFormat::Float32x3,
                offset: 0,
            }],
        }
    }

    /// Two non-indexed triangles.
    fn soup(driver: &Arc<SoftDriver>) -> Self {
        let vertices = vec![0u8; 6 * 12];
        Self {
            vertex_buffer: GpuBuffer::new(
                driver.clone(),
                BufferKind::Vertex,
                BufferUsage::Static,
                &vertices,
            )
            .unwrap(),
            index_buffer: None,
            raw_indices: Vec::new(),
            vertex_count: 6,
            elements: vec![VertexElement {
                semantic: VertexSemantic::Position,
                format: VertexFormat::Float32x3,
                offset: 0,
            }],
        }
    }
}

impl Mesh for TestMesh {
    fn topology(&self) -> PrimitiveTopology {
        PrimitiveTopology::TriangleList
    }

    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    fn vertex_stride(&self) -> u32 {
        12
    }

    fn vertex_elements(&self) -> &[VertexElement] {
        &self.elements
    }

    fn vertex_buffer(&self) -> Option<&GpuBuffer> {
        Some(&self.vertex_buffer)
    }

    fn index_buffer(&self) -> Option<&GpuBuffer> {
        self.index_buffer.as_ref()
    }

    fn indices(&self) -> &[u8] {
        &self.raw_indices
    }
}

struct TestRenderable {
    id: u64,
    program: Option<Arc<ShaderProgram>>,
    mesh: TestMesh,
    blend: Arc<BlendState>,
    depth_stencil: Arc<DepthStencilState>,
    rasterizer: Arc<RasterizerState>,
}

impl TestRenderable {
    fn new(id: u64, program: Option<Arc<ShaderProgram>>, mesh: TestMesh) -> Self {
        Self {
            id,
            program,
            mesh,
            blend: Arc::new(BlendState::new(BlendStateDesc::default())),
            depth_stencil: Arc::new(DepthStencilState::new(DepthStencilStateDesc::default())),
            rasterizer: Arc::new(RasterizerState::new(RasterizerStateDesc::default())),
        }
    }
}

impl Renderable for TestRenderable {
    fn id(&self) -> u64 {
        self.id
    }

    fn shader_program(&self) -> Option<Arc<ShaderProgram>> {
        self.program.clone()
    }

    fn mesh(&self) -> &dyn Mesh {
        &self.mesh
    }

    fn bind_render_state(&self, renderer: &mut Renderer) {
        renderer.set_blend_state(self.blend.clone());
        renderer.set_depth_stencil_state(self.depth_stencil.clone());
        renderer.set_rasterizer_state(self.rasterizer.clone());
    }

    fn bind_shader_params(&self, program: &ShaderProgram) {
        program.set_uniform_value("u_Mvp", UniformValue::Mat4([0.0; 16]));
        program.set_uniform_value("u_Color", UniformValue::Vec4([1.0; 4]));
    }
}

#[test]
fn indexed_draw_derives_format_and_count_from_the_index_buffer() {
    let (driver, mut renderer) = setup();
    let renderable = TestRenderable::new(1, Some(linked_program(&driver)), TestMesh::quad(&driver));

    assert!(renderer.draw(&renderable));

    let draws = driver.draw_log();
    assert_eq!(draws.len(), 1);
    assert!(draws[0].indexed);
    assert_eq!(draws[0].format, Some(IndexFormat::Uint16));
    assert_eq!(draws[0].count, 6);
    assert_eq!(draws[0].topology, PrimitiveTopology::TriangleList);
}

#[test]
fn non_indexed_draw_submits_the_vertex_range() {
    let (driver, mut renderer) = setup();
    let renderable = TestRenderable::new(1, Some(linked_program(&driver)), TestMesh::soup(&driver));

    assert!(renderer.draw(&renderable));

    let draws = driver.draw_log();
    assert_eq!(draws.len(), 1);
    assert!(!draws[0].indexed);
    assert_eq!(draws[0].count, 6);
}

#[test]
fn present_publishes_frame_stats_and_resets_bindings() {
    let (driver, mut renderer) = setup();
    let renderable = TestRenderable::new(1, Some(linked_program(&driver)), TestMesh::quad(&driver));

    assert!(renderer.draw(&renderable));
    assert!(renderer.state().bound_program().is_some());

    renderer.present().unwrap();

    assert_eq!(renderer.frame_stats().draw_calls, 1);
    assert_eq!(renderer.frame_stats().triangles, 2);
    assert!(renderer.state().bound_program().is_none());
    assert_eq!(driver.frames_presented(), 1);

    // The next present publishes an empty frame.
    renderer.present().unwrap();
    assert_eq!(renderer.frame_stats().draw_calls, 0);
}

#[test]
fn renderable_without_a_program_is_skipped() {
    let (driver, mut renderer) = setup();
    let renderable = TestRenderable::new(1, None, TestMesh::quad(&driver));

    assert!(!renderer.draw(&renderable));
    assert!(driver.draw_log().is_empty());
}

#[test]
fn renderable_with_an_unlinked_program_is_skipped() {
    let (driver, mut renderer) = setup();
    let program = Arc::new(ShaderProgram::new(driver.clone()).unwrap());
    let renderable = TestRenderable::new(1, Some(program), TestMesh::quad(&driver));

    assert!(!renderer.draw(&renderable));
    assert!(driver.draw_log().is_empty());
}

#[test]
fn draw_uploads_staged_uniforms() {
    let (driver, mut renderer) = setup();
    let renderable = TestRenderable::new(1, Some(linked_program(&driver)), TestMesh::quad(&driver));

    driver.take_uniform_uploads();
    assert!(renderer.draw(&renderable));

    let uploads = driver.take_uniform_uploads();
    assert_eq!(uploads.len(), 2);
    assert!(uploads.iter().any(|(_, v)| *v == UniformValue::Mat4([0.0; 16])));
}

#[test]
fn scissor_rectangles_are_flipped_to_bottom_left_origin() {
    let (driver, mut renderer) = setup();

    renderer.set_scissor(10, 20, 100, 50);

    // Window height is 720: 720 - 20 - 50 = 650.
    assert_eq!(driver.fixed_state().scissor_rect, (10, 650, 100, 50));
    assert!(driver.fixed_state().scissor_test);
}

#[test]
fn rebinding_the_same_texture_and_sampler_is_free() {
    let (driver, mut renderer) = setup();
    let texture = Texture::new(driver.clone(), "albedo", TextureKind::D2, 4, 4).unwrap();
    let sampler = renderer.sampler_state(SamplerStateDesc::default());

    driver.clear_transition_log();
    renderer.bind_texture(0, Some(&texture), Some(sampler.clone()));
    assert_eq!(driver.transition_count(), 5);

    driver.clear_transition_log();
    renderer.bind_texture(0, Some(&texture), Some(sampler.clone()));
    assert_eq!(driver.transition_count(), 0);

    // A different wrap mode on the same texture re-emits only that axis.
    let mut clamped = SamplerStateDesc::default();
    clamped.address_u = lumen_core::renderer::AddressMode::Clamp;
    let clamp_sampler = renderer.sampler_state(clamped);
    driver.clear_transition_log();
    renderer.bind_texture(0, Some(&texture), Some(clamp_sampler));
    assert_eq!(driver.transition_log(), vec!["sampler.wrap.u"]);
}

#[test]
fn sampler_reapplies_when_a_different_texture_is_bound() {
    let (driver, mut renderer) = setup();
    let first = Texture::new(driver.clone(), "albedo", TextureKind::D2, 4, 4).unwrap();
    let second = Texture::new(driver.clone(), "normal", TextureKind::D2, 4, 4).unwrap();
    let sampler = renderer.sampler_state(SamplerStateDesc::default());

    renderer.bind_texture(0, Some(&first), Some(sampler.clone()));

    // Sampler parameters live on the texture object: a new texture in the
    // slot needs the full set even under the same sampler.
    driver.clear_transition_log();
    renderer.bind_texture(0, Some(&second), Some(sampler));
    assert_eq!(driver.transition_count(), 5);
}

#[test]
fn out_of_range_texture_slot_is_rejected() {
    let (driver, mut renderer) = setup();
    let texture = Texture::new(driver.clone(), "albedo", TextureKind::D2, 4, 4).unwrap();
    let sampler = renderer.sampler_state(SamplerStateDesc::default());

    driver.clear_transition_log();
    renderer.bind_texture(64, Some(&texture), Some(sampler));
    assert_eq!(driver.transition_count(), 0);
}

#[test]
fn present_invalidates_the_texture_slot_cache() {
    let (driver, mut renderer) = setup();
    let texture = Texture::new(driver.clone(), "albedo", TextureKind::D2, 4, 4).unwrap();
    let sampler = renderer.sampler_state(SamplerStateDesc::default());

    renderer.bind_texture(0, Some(&texture), Some(sampler.clone()));
    renderer.present().unwrap();

    driver.clear_transition_log();
    renderer.bind_texture(0, Some(&texture), Some(sampler));
    assert_eq!(driver.transition_count(), 5);
}

#[cfg(debug_assertions)]
#[test]
fn wireframe_mode_redraws_triangles_as_lines() {
    let (driver, mut renderer) = setup();
    let mut renderable =
        TestRenderable::new(1, Some(linked_program(&driver)), TestMesh::quad(&driver));
    let mut desc = RasterizerStateDesc::default();
    desc.polygon_mode = PolygonMode::Line;
    renderable.rasterizer = Arc::new(RasterizerState::new(desc));

    assert!(renderer.draw(&renderable));

    let draws = driver.draw_log();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].topology, PrimitiveTopology::LineList);
    assert_eq!(draws[0].format, Some(IndexFormat::Uint32));
    // Two triangles become six edges.
    assert_eq!(draws[0].count, 12);
}

#[test]
fn factory_helpers_create_driver_backed_resources() {
    let (_driver, renderer) = setup();

    let vertex_buffer = renderer
        .create_vertex_buffer(BufferUsage::Static, &[0u8; 12])
        .unwrap();
    assert_eq!(vertex_buffer.size(), 12);

    let texture = renderer.create_texture_render("target", 32, 32).unwrap();
    assert_eq!((texture.width(), texture.height()), (32, 32));

    let shader = renderer.create_shader(ShaderStage::Vertex, VS).unwrap();
    assert!(shader.is_valid());

    let mut program = renderer.create_shader_program().unwrap();
    program.attach_shader(shader).unwrap();
}

#[test]
fn end_scissor_forces_full_rasterizer_reactivation() {
    let (driver, mut renderer) = setup();
    let rasterizer = renderer.create_rasterizer_state(RasterizerStateDesc::default());
    renderer.set_rasterizer_state(rasterizer.clone());

    driver.clear_transition_log();
    renderer.end_scissor();
    assert!(!driver.fixed_state().scissor_test);
    assert_eq!(driver.transition_log(), vec!["raster.scissor_test"]);

    // The cache was dropped, so the same state object re-arms from scratch.
    driver.clear_transition_log();
    renderer.set_rasterizer_state(rasterizer);
    assert_eq!(driver.transition_count(), 5);
}

#[test]
fn window_resize_reaches_the_driver_surface() {
    let (driver, mut renderer) = setup();
    renderer.on_window_resized(800, 600);
    assert_eq!(renderer.window_size(), (800, 600));
    assert_eq!(driver.fixed_state().viewport, (0, 0, 800, 600));

    driver.clear_color_slot(0, lumen_core::math::LinearRgba::RED);
    let pixels = driver.read_color_pixels(0, 800, 600).unwrap();
    assert_eq!(pixels.len(), 800 * 600 * 4);
}
