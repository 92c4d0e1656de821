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

//! Single-stage shader objects and include preprocessing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::renderer::api::{ShaderId, ShaderStage};
use crate::renderer::error::{ResourceError, ShaderError};
use crate::renderer::traits::GraphicsDriver;

/// A library of named shader source fragments resolvable via
/// `#include <name>` directives.
#[derive(Debug, Default)]
pub struct ShaderIncludeLibrary {
    sources: HashMap<String, String>,
}

impl ShaderIncludeLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a named source fragment.
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(name.into(), source.into());
    }

    /// Returns the fragment registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    /// Expands every `#include <name>` directive in `source`.
    ///
    /// Included fragments may themselves contain includes; expansion depth
    /// is bounded so include cycles terminate instead of recursing forever.
    /// A directive naming an unregistered fragment expands to nothing and
    /// logs a warning.
    pub fn preprocess(&self, source: &str) -> String {
        self.preprocess_inner(source, self.sources.len() + 1)
    }

    fn preprocess_inner(&self, source: &str, depth: usize) -> String {
        let mut out = String::with_capacity(source.len());
        for line in source.lines() {
            match Self::parse_include(line) {
                Some(name) if depth > 0 => match self.sources.get(name) {
                    Some(fragment) => {
                        out.push_str(&self.preprocess_inner(fragment, depth - 1));
                    }
                    None => {
                        log::warn!("Unresolved shader include '<{name}>', expanding to nothing");
                    }
                },
                Some(name) => {
                    log::warn!("Shader include depth exceeded at '<{name}>'");
                }
                None => {
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        out
    }

    fn parse_include(line: &str) -> Option<&str> {
        let rest = line.trim_start().strip_prefix("#include")?.trim_start();
        let rest = rest.strip_prefix('<')?;
        let end = rest.find('>')?;
        Some(&rest[..end])
    }
}

/// A compiled shader for a single pipeline stage.
///
/// The source is handed to the driver at compile time and not retained;
/// only the compiled driver object, its validity, and the compiler log
/// survive.
#[derive(Debug)]
pub struct Shader {
    stage: ShaderStage,
    id: ShaderId,
    valid: bool,
    info_log: String,
    driver: Arc<dyn GraphicsDriver>,
}

impl Shader {
    /// Creates an empty shader object for `stage`.
    pub fn new(driver: Arc<dyn GraphicsDriver>, stage: ShaderStage) -> Result<Self, ResourceError> {
        let id = driver.create_shader(stage)?;
        Ok(Self {
            stage,
            id,
            valid: false,
            info_log: String::new(),
            driver,
        })
    }

    /// Compiles `source` into this shader object.
    ///
    /// On success the shader becomes valid and `info_log` carries any
    /// compiler warnings. On failure the shader stays invalid and the
    /// error details are kept as the log.
    pub fn compile(&mut self, source: &str) -> Result<(), ShaderError> {
        match self.driver.compile_shader(self.id, source) {
            Ok(info) => {
                self.valid = true;
                if !info.is_empty() {
                    log::warn!(
                        "[{}] shader compiled with warnings: {info}",
                        self.stage.desc_label()
                    );
                }
                self.info_log = info;
                Ok(())
            }
            Err(err) => {
                self.valid = false;
                if let ShaderError::CompilationError { details, .. } = &err {
                    self.info_log = details.clone();
                }
                log::error!(
                    "[{}] shader compilation failed: {}",
                    self.stage.desc_label(),
                    self.info_log
                );
                Err(err)
            }
        }
    }

    /// The pipeline stage this shader targets.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// The driver-side shader handle.
    pub fn id(&self) -> ShaderId {
        self.id
    }

    /// Whether the last compile succeeded.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Compiler output from the last compile.
    pub fn info_log(&self) -> &str {
        &self.info_log
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.driver.destroy_shader(self.id);
    }
}
