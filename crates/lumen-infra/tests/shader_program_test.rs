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

//! Shader compilation, program linking, reflection, and uniform binding.

use std::sync::Arc;

use lumen_core::renderer::{
    Shader, ShaderIncludeLibrary, ShaderProgram, ShaderStage, UniformKind, UniformType,
    UniformValue, VertexSemantic,
};
use lumen_infra::SoftDriver;

const VS: &str = "attribute vec3 a_Position;\n\
                  attribute vec2 a_UV;\n\
                  uniform mat4 u_Model;\n\
                  uniform mat4 u_Bones[64];\n\
                  void main() {}\n";

const FS: &str = "uniform vec4 u_Color;\n\
                  uniform sampler2D u_Albedo;\n\
                  uniform sampler2D u_Normal;\n\
                  void main() {}\n";

fn setup() -> Arc<SoftDriver> {
    let _ = env_logger::builder().is_test(true).try_init();
    Arc::new(SoftDriver::new())
}

fn compiled(driver: &Arc<SoftDriver>, stage: ShaderStage, source: &str) -> Shader {
    let mut shader = Shader::new(driver.clone(), stage).unwrap();
    shader.compile(source).unwrap();
    shader
}

fn linked_program(driver: &Arc<SoftDriver>) -> ShaderProgram {
    let mut program = ShaderProgram::new(driver.clone()).unwrap();
    program
        .attach_shader(compiled(driver, ShaderStage::Vertex, VS))
        .unwrap();
    program
        .attach_shader(compiled(driver, ShaderStage::Fragment, FS))
        .unwrap();
    assert!(program.link_shaders());
    program
}

#[test]
fn compile_failure_keeps_shader_invalid() {
    let driver = setup();
    let mut shader = Shader::new(driver.clone(), ShaderStage::Fragment).unwrap();
    assert!(shader.compile("#error broken\nvoid main() {}").is_err());
    assert!(!shader.is_valid());
    assert!(shader.info_log().contains("#error"));

    assert!(shader.compile("void main() {}").is_ok());
    assert!(shader.is_valid());
}

#[test]
fn link_reflects_normalized_uniform_names() {
    let driver = setup();
    let program = linked_program(&driver);

    assert!(program.is_linked());

    let model = program.uniform("u_Model").unwrap();
    assert_eq!(model.ty, UniformType::Mat4);
    assert_eq!(model.array_count, 1);

    // Arrays are reported as `name[0]` by the driver but looked up bare.
    let bones = program.uniform("u_Bones").unwrap();
    assert_eq!(bones.array_count, 64);
    assert_eq!(bones.size_bytes, 64 * 64);
    assert!(program.uniform("u_Bones[0]").is_none());
}

#[test]
fn texture_uniforms_get_sequential_slots() {
    let driver = setup();
    let program = linked_program(&driver);

    let mut slots: Vec<u32> = program
        .uniforms()
        .filter_map(|u| match u.kind {
            UniformKind::Texture { slot } => Some(slot),
            UniformKind::Value => None,
        })
        .collect();
    slots.sort_unstable();
    assert_eq!(slots, vec![0, 1]);
}

#[test]
fn attribute_locations_resolve_by_semantic() {
    let driver = setup();
    let program = linked_program(&driver);

    assert!(program.attribute_location(VertexSemantic::Position) >= 0);
    assert!(program.attribute_location(VertexSemantic::TexCoord0) >= 0);
    assert_eq!(program.attribute_location(VertexSemantic::Tangent), -1);
}

#[test]
fn attaching_to_an_occupied_stage_hands_the_shader_back() {
    let driver = setup();
    let mut program = ShaderProgram::new(driver.clone()).unwrap();
    program
        .attach_shader(compiled(&driver, ShaderStage::Vertex, VS))
        .unwrap();

    let rejected = program
        .attach_shader(compiled(&driver, ShaderStage::Vertex, "void main() {}"))
        .unwrap_err();
    assert_eq!(rejected.stage(), ShaderStage::Vertex);

    let detached = program.detach_shader(ShaderStage::Vertex).unwrap();
    assert_eq!(detached.stage(), ShaderStage::Vertex);
    assert!(program.detach_shader(ShaderStage::Vertex).is_none());
}

#[test]
fn changing_stages_invalidates_a_previous_link() {
    let driver = setup();
    let mut program = linked_program(&driver);
    assert!(program.is_linked());

    let detached = program.detach_shader(ShaderStage::Fragment).unwrap();
    assert!(!program.is_linked());

    program.attach_shader(detached).unwrap();
    assert!(!program.is_linked());

    assert!(program.link_shaders());
    assert!(program.is_linked());
}

#[test]
fn link_fails_with_an_invalid_attached_stage() {
    let driver = setup();
    let mut program = ShaderProgram::new(driver.clone()).unwrap();

    let mut broken = Shader::new(driver.clone(), ShaderStage::Vertex).unwrap();
    let _ = broken.compile("");
    program.attach_shader(broken).unwrap();
    program
        .attach_shader(compiled(&driver, ShaderStage::Fragment, FS))
        .unwrap();

    assert!(!program.link_shaders());
    assert!(!program.is_linked());
    assert!(program.uniform("u_Color").is_none());
}

#[test]
fn bind_uniforms_uploads_staged_values_and_defaults() {
    let driver = setup();
    let mut program = linked_program(&driver);
    program.set_uniform_default("u_Color", UniformValue::Vec4([1.0, 1.0, 1.0, 1.0]));

    program.set_uniform_value("u_Model", UniformValue::Mat4([0.0; 16]));
    program.set_uniform_value("u_Bones", UniformValue::Mat4Array(vec![[0.0; 16]; 64]));

    driver.take_uniform_uploads();
    program.bind_uniforms();
    let uploads = driver.take_uniform_uploads();

    // Two staged values, one default, and two sampler slot bindings.
    assert_eq!(uploads.len(), 5);
    assert!(uploads
        .iter()
        .any(|(_, v)| *v == UniformValue::Vec4([1.0, 1.0, 1.0, 1.0])));
    let sampler_slots: Vec<i32> = uploads
        .iter()
        .filter_map(|(_, v)| match v {
            UniformValue::Int(slot) => Some(*slot),
            _ => None,
        })
        .collect();
    assert!(sampler_slots.contains(&0));
    assert!(sampler_slots.contains(&1));
}

#[test]
fn staged_value_wins_over_default() {
    let driver = setup();
    let mut program = linked_program(&driver);
    program.set_uniform_default("u_Color", UniformValue::Vec4([0.0; 4]));
    program.set_uniform_value("u_Color", UniformValue::Vec4([0.5, 0.5, 0.5, 1.0]));
    program.set_uniform_value("u_Model", UniformValue::Mat4([0.0; 16]));
    program.set_uniform_value("u_Bones", UniformValue::Mat4Array(vec![[0.0; 16]; 64]));

    driver.take_uniform_uploads();
    program.bind_uniforms();
    let uploads = driver.take_uniform_uploads();

    assert!(uploads
        .iter()
        .any(|(_, v)| *v == UniformValue::Vec4([0.5, 0.5, 0.5, 1.0])));
    assert!(!uploads.iter().any(|(_, v)| *v == UniformValue::Vec4([0.0; 4])));
}

#[test]
fn missing_value_skips_the_upload() {
    let driver = setup();
    let program = linked_program(&driver);
    // Nothing staged at all: only the two sampler bindings go out.
    driver.take_uniform_uploads();
    program.bind_uniforms();
    assert_eq!(driver.take_uniform_uploads().len(), 2);
}

#[test]
fn includes_expand_before_compilation() {
    let driver = setup();
    let mut includes = ShaderIncludeLibrary::new();
    includes.add("lighting", "uniform vec4 u_LightDir;");

    let source = includes.preprocess("#include <lighting>\nvoid main() {}\n");
    let mut shader = Shader::new(driver.clone(), ShaderStage::Fragment).unwrap();
    assert!(shader.compile(&source).is_ok());

    let mut program = ShaderProgram::new(driver.clone()).unwrap();
    program
        .attach_shader(compiled(&driver, ShaderStage::Vertex, VS))
        .unwrap();
    program.attach_shader(shader).unwrap();
    assert!(program.link_shaders());
    assert!(program.uniform("u_LightDir").is_some());
}
