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

//! Rasterizer state object.

use crate::renderer::api::{CullMode, FrontFace, PolygonMode};
use crate::renderer::traits::GraphicsDriver;

/// Describes triangle rasterization behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerStateDesc {
    /// How polygons are filled. Backends without native line rasterization
    /// of polygons emulate non-fill modes at draw time.
    pub polygon_mode: PolygonMode,
    /// Which faces are culled, `None` disables culling.
    pub cull_mode: Option<CullMode>,
    /// Winding order of front faces.
    pub front_face: FrontFace,
    /// Whether depth-bias rasterization is enabled.
    pub polygon_offset_enabled: bool,
    /// Slope-scaled depth bias factor.
    pub polygon_offset_factor: f32,
    /// Constant depth bias units.
    pub polygon_offset_units: f32,
    /// Whether the scissor test is enabled.
    pub scissor_test_enabled: bool,
    /// Whether multisample rasterization is enabled.
    pub multisample_enabled: bool,
}

impl Default for RasterizerStateDesc {
    fn default() -> Self {
        Self {
            polygon_mode: PolygonMode::Fill,
            cull_mode: Some(CullMode::Back),
            front_face: FrontFace::Ccw,
            polygon_offset_enabled: false,
            polygon_offset_factor: 0.0,
            polygon_offset_units: 0.0,
            scissor_test_enabled: false,
            multisample_enabled: false,
        }
    }
}

impl RasterizerStateDesc {
    fn offset_unit(&self) -> (bool, f32, f32) {
        (
            self.polygon_offset_enabled,
            self.polygon_offset_factor,
            self.polygon_offset_units,
        )
    }
}

/// An immutable rasterizer state that can be activated on a driver.
#[derive(Debug)]
pub struct RasterizerState {
    desc: RasterizerStateDesc,
}

impl RasterizerState {
    /// Creates a rasterizer state from a descriptor.
    pub fn new(desc: RasterizerStateDesc) -> Self {
        Self { desc }
    }

    /// The descriptor this state was created from.
    pub fn desc(&self) -> &RasterizerStateDesc {
        &self.desc
    }

    /// Applies this state, diffing against the previously active descriptor.
    ///
    /// `polygon_mode` emits no driver transition here; the renderer consumes
    /// it when assembling draw calls.
    pub fn activate(&self, driver: &dyn GraphicsDriver, previous: Option<&RasterizerStateDesc>) {
        let d = &self.desc;

        if previous.map_or(true, |p| p.cull_mode != d.cull_mode) {
            driver.set_cull_mode(d.cull_mode);
        }
        if previous.map_or(true, |p| p.front_face != d.front_face) {
            driver.set_front_face(d.front_face);
        }
        if previous.map_or(true, |p| p.offset_unit() != d.offset_unit()) {
            driver.set_polygon_offset(
                d.polygon_offset_enabled,
                d.polygon_offset_factor,
                d.polygon_offset_units,
            );
        }
        if previous.map_or(true, |p| p.scissor_test_enabled != d.scissor_test_enabled) {
            driver.set_scissor_test_enabled(d.scissor_test_enabled);
        }
        if previous.map_or(true, |p| p.multisample_enabled != d.multisample_enabled) {
            driver.set_multisample_enabled(d.multisample_enabled);
        }
    }
}
