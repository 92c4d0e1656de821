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

//! Shader programs: linking, uniform reflection, and uniform binding.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::renderer::api::{
    ProgramId, ShaderStage, UniformLocation, UniformType, UniformValue, VertexSemantic,
};
use crate::renderer::error::ResourceError;
use crate::renderer::renderer::Renderer;
use crate::renderer::shader::Shader;
use crate::renderer::traits::GraphicsDriver;

/// How a reflected uniform is fed at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    /// A plain value uploaded from the staged value table.
    Value,
    /// A texture sampler bound to a fixed slot assigned at link time.
    Texture {
        /// The sampler slot the texture must be bound to.
        slot: u32,
    },
}

/// One active uniform of a linked program.
#[derive(Debug, Clone)]
pub struct Uniform {
    /// Normalized uniform name (no struct suffix, no `[0]`).
    pub name: String,
    /// Element data type.
    pub ty: UniformType,
    /// Declared array length, 1 for scalars.
    pub array_count: u32,
    /// Total byte size of the uniform's data.
    pub size_bytes: u32,
    /// Driver-side location.
    pub location: UniformLocation,
    /// Whether the uniform is a value or a sampler.
    pub kind: UniformKind,
}

/// A linked set of shader stages with reflected uniforms.
///
/// Uniform values are staged CPU-side with [`set_uniform_value`] and only
/// uploaded when [`bind_uniforms`] runs during a draw. A uniform with no
/// staged value falls back to its registered default, and a uniform with
/// neither is reported as an error at draw time.
///
/// [`set_uniform_value`]: ShaderProgram::set_uniform_value
/// [`bind_uniforms`]: ShaderProgram::bind_uniforms
#[derive(Debug)]
pub struct ShaderProgram {
    id: ProgramId,
    driver: Arc<dyn GraphicsDriver>,
    stages: [Option<Shader>; 3],
    linked: bool,
    uniforms: HashMap<String, Uniform>,
    attribute_locations: [i32; VertexSemantic::ALL.len()],
    values: Mutex<HashMap<String, UniformValue>>,
    defaults: HashMap<String, UniformValue>,
}

impl ShaderProgram {
    /// Creates an empty program object.
    pub fn new(driver: Arc<dyn GraphicsDriver>) -> Result<Self, ResourceError> {
        let id = driver.create_program()?;
        Ok(Self {
            id,
            driver,
            stages: [None, None, None],
            linked: false,
            uniforms: HashMap::new(),
            attribute_locations: [-1; VertexSemantic::ALL.len()],
            values: Mutex::new(HashMap::new()),
            defaults: HashMap::new(),
        })
    }

    /// Attaches a compiled shader, taking ownership of it.
    ///
    /// Changing the attached stages invalidates any previous link. If the
    /// shader's stage is already occupied the shader is handed back
    /// unchanged in the `Err` variant.
    pub fn attach_shader(&mut self, shader: Shader) -> Result<(), Shader> {
        let slot = shader.stage().index();
        if self.stages[slot].is_some() {
            log::error!(
                "A {:?} shader is already attached to this program",
                shader.stage()
            );
            return Err(shader);
        }
        self.driver.attach_shader(self.id, shader.id());
        self.stages[slot] = Some(shader);
        self.linked = false;
        Ok(())
    }

    /// Detaches and returns the shader attached to `stage`, if any.
    ///
    /// A detach invalidates any previous link.
    pub fn detach_shader(&mut self, stage: ShaderStage) -> Option<Shader> {
        let shader = self.stages[stage.index()].take()?;
        self.driver.detach_shader(self.id, shader.id());
        self.linked = false;
        Some(shader)
    }

    /// Links the attached stages and reflects the program's interface.
    ///
    /// Clears any previous reflection first, so a failed re-link leaves the
    /// program unlinked with no stale uniforms. Returns `true` on success.
    pub fn link_shaders(&mut self) -> bool {
        self.uniforms.clear();
        self.attribute_locations = [-1; VertexSemantic::ALL.len()];
        self.linked = false;

        for shader in self.stages.iter().flatten() {
            if !shader.is_valid() {
                log::error!(
                    "Cannot link: attached [{}] shader did not compile",
                    shader.stage().desc_label()
                );
                return false;
            }
        }

        if let Err(err) = self.driver.link_program(self.id) {
            log::error!("Program link failed: {err}");
            return false;
        }

        let mut next_texture_slot = 0u32;
        for reflection in self.driver.active_uniforms(self.id) {
            let location = self.driver.uniform_location(self.id, &reflection.name);
            let name = Self::normalize_uniform_name(&reflection.name);
            let kind = if reflection.ty.is_texture() {
                let slot = next_texture_slot;
                next_texture_slot += 1;
                UniformKind::Texture { slot }
            } else {
                UniformKind::Value
            };
            self.uniforms.insert(
                name.to_string(),
                Uniform {
                    name: name.to_string(),
                    ty: reflection.ty,
                    array_count: reflection.array_count,
                    size_bytes: reflection.ty.byte_size() * reflection.array_count,
                    location,
                    kind,
                },
            );
        }

        for semantic in VertexSemantic::ALL {
            self.attribute_locations[semantic.index()] =
                self.driver.attribute_location(self.id, semantic.attribute_name());
        }

        self.linked = true;
        true
    }

    /// Strips a struct member suffix and an array `[0]` suffix from a
    /// driver-reported uniform name.
    fn normalize_uniform_name(raw: &str) -> &str {
        let base = raw.split('.').next().unwrap_or(raw);
        base.strip_suffix("[0]").unwrap_or(base)
    }

    /// Makes this program current through the renderer's state cache.
    pub fn bind(&self, renderer: &mut Renderer) -> bool {
        renderer.bind_shader_program(self)
    }

    /// Restores the unbound program state. The renderer re-binds programs
    /// per draw, so there is nothing to undo here.
    pub fn unbind(&self) {}

    /// Uploads every reflected uniform from the staged values, falling back
    /// to defaults. Texture uniforms upload their fixed sampler slot.
    pub fn bind_uniforms(&self) {
        let values = self.values.lock().unwrap();
        for uniform in self.uniforms.values() {
            match uniform.kind {
                UniformKind::Texture { slot } => {
                    self.driver
                        .set_uniform(uniform.location, &UniformValue::Int(slot as i32));
                }
                UniformKind::Value => {
                    let value = values
                        .get(&uniform.name)
                        .or_else(|| self.defaults.get(&uniform.name));
                    match value {
                        Some(value) => self.driver.set_uniform(uniform.location, value),
                        None => {
                            log::error!("No value staged for uniform '{}'", uniform.name);
                        }
                    }
                }
            }
        }
    }

    /// Stages a uniform value for the next draw.
    pub fn set_uniform_value(&self, name: impl Into<String>, value: UniformValue) {
        self.values.lock().unwrap().insert(name.into(), value);
    }

    /// Registers a fallback value used when no value is staged.
    pub fn set_uniform_default(&mut self, name: impl Into<String>, value: UniformValue) {
        self.defaults.insert(name.into(), value);
    }

    /// Looks up a reflected uniform by normalized name.
    pub fn uniform(&self, name: &str) -> Option<&Uniform> {
        self.uniforms.get(name)
    }

    /// All reflected uniforms of the linked program.
    pub fn uniforms(&self) -> impl Iterator<Item = &Uniform> {
        self.uniforms.values()
    }

    /// The attribute location bound to `semantic`, `-1` when unused.
    pub fn attribute_location(&self, semantic: VertexSemantic) -> i32 {
        self.attribute_locations[semantic.index()]
    }

    /// Whether the last link succeeded.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// The driver-side program handle.
    pub fn id(&self) -> ProgramId {
        self.id
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.driver.destroy_program(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_name_normalization() {
        assert_eq!(ShaderProgram::normalize_uniform_name("u_Color"), "u_Color");
        assert_eq!(ShaderProgram::normalize_uniform_name("u_Bones[0]"), "u_Bones");
        assert_eq!(ShaderProgram::normalize_uniform_name("u_Light.position"), "u_Light");
        assert_eq!(
            ShaderProgram::normalize_uniform_name("u_Lights[0].position"),
            "u_Lights"
        );
    }
}
