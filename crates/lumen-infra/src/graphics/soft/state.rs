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

//! Shadow copy of the driver's fixed-function state.

use lumen_core::math::LinearRgba;
use lumen_core::renderer::{
    BlendFactor, BlendOperation, ColorWrites, CompareFunction, CullMode, FrontFace,
    StencilOperation,
};

/// Stencil settings for one face as the driver last received them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilFaceShadow {
    /// Whether the stencil test is enabled for this face.
    pub enabled: bool,
    /// Comparison function.
    pub func: CompareFunction,
    /// Reference value.
    pub reference: u32,
    /// Comparison mask.
    pub read_mask: u32,
    /// Operation on stencil fail.
    pub fail: StencilOperation,
    /// Operation on depth fail.
    pub depth_fail: StencilOperation,
    /// Operation when both tests pass.
    pub pass: StencilOperation,
    /// Write mask.
    pub write_mask: u32,
}

impl Default for StencilFaceShadow {
    fn default() -> Self {
        Self {
            enabled: false,
            func: CompareFunction::Always,
            reference: 0,
            read_mask: u32::MAX,
            fail: StencilOperation::Keep,
            depth_fail: StencilOperation::Keep,
            pass: StencilOperation::Keep,
            write_mask: u32::MAX,
        }
    }
}

/// Every fixed-function value the driver has been told to apply.
///
/// The values mirror the hardware defaults a fresh context would report,
/// so tests can assert exactly what a sequence of setters changed.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedFunctionState {
    /// Whether blending is enabled.
    pub blend_enabled: bool,
    /// Source blend factor.
    pub blend_src: BlendFactor,
    /// Destination blend factor.
    pub blend_dst: BlendFactor,
    /// Blend equation.
    pub blend_op: BlendOperation,
    /// Constant blend color.
    pub blend_color: LinearRgba,
    /// Color channel write mask.
    pub color_write_mask: ColorWrites,
    /// Whether alpha-to-coverage is enabled.
    pub alpha_to_coverage: bool,
    /// Whether the depth test runs.
    pub depth_test: bool,
    /// Whether depth writes are enabled.
    pub depth_write: bool,
    /// Depth comparison function.
    pub depth_compare: CompareFunction,
    /// Front-face stencil settings.
    pub stencil_front: StencilFaceShadow,
    /// Back-face stencil settings.
    pub stencil_back: StencilFaceShadow,
    /// Face culling mode, `None` when disabled.
    pub cull_mode: Option<CullMode>,
    /// Front-face winding.
    pub front_face: FrontFace,
    /// Polygon offset: enabled, factor, units.
    pub polygon_offset: (bool, f32, f32),
    /// Whether the scissor test is enabled.
    pub scissor_test: bool,
    /// Whether multisampling is enabled.
    pub multisample: bool,
    /// Current viewport rectangle.
    pub viewport: (i32, i32, u32, u32),
    /// Current scissor rectangle.
    pub scissor_rect: (i32, i32, u32, u32),
}

impl Default for FixedFunctionState {
    fn default() -> Self {
        Self {
            blend_enabled: false,
            blend_src: BlendFactor::One,
            blend_dst: BlendFactor::Zero,
            blend_op: BlendOperation::Add,
            blend_color: LinearRgba::TRANSPARENT,
            color_write_mask: ColorWrites::ALL,
            alpha_to_coverage: false,
            depth_test: false,
            depth_write: true,
            depth_compare: CompareFunction::Less,
            stencil_front: StencilFaceShadow::default(),
            stencil_back: StencilFaceShadow::default(),
            cull_mode: None,
            front_face: FrontFace::Ccw,
            polygon_offset: (false, 0.0, 0.0),
            scissor_test: false,
            multisample: false,
            viewport: (0, 0, 0, 0),
            scissor_rect: (0, 0, 0, 0),
        }
    }
}
