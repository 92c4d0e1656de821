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

//! Blend state object.

use crate::math::LinearRgba;
use crate::renderer::api::{BlendFactor, BlendOperation, ColorWrites};
use crate::renderer::traits::GraphicsDriver;

/// Describes how fragment output is combined with the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendStateDesc {
    /// Whether blending is enabled.
    pub enabled: bool,
    /// Multiplier applied to the fragment color.
    pub src_factor: BlendFactor,
    /// Multiplier applied to the framebuffer color.
    pub dst_factor: BlendFactor,
    /// Equation combining the weighted colors.
    pub operation: BlendOperation,
    /// The constant color for `Constant` blend factors.
    pub constant: LinearRgba,
    /// Per-channel write mask.
    pub write_mask: ColorWrites,
    /// Whether alpha-to-coverage is enabled.
    pub alpha_to_coverage: bool,
}

impl Default for BlendStateDesc {
    fn default() -> Self {
        Self {
            enabled: false,
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::Zero,
            operation: BlendOperation::Add,
            constant: LinearRgba::TRANSPARENT,
            write_mask: ColorWrites::ALL,
            alpha_to_coverage: false,
        }
    }
}

impl BlendStateDesc {
    /// Classic premultiplied-style alpha blending over the destination.
    pub fn alpha_blend() -> Self {
        Self {
            enabled: true,
            src_factor: BlendFactor::SrcAlpha,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            ..Default::default()
        }
    }

    /// Additive blending.
    pub fn additive() -> Self {
        Self {
            enabled: true,
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::One,
            ..Default::default()
        }
    }
}

/// An immutable blend state that can be activated on a driver.
#[derive(Debug)]
pub struct BlendState {
    desc: BlendStateDesc,
}

impl BlendState {
    /// Creates a blend state from a descriptor.
    pub fn new(desc: BlendStateDesc) -> Self {
        Self { desc }
    }

    /// The descriptor this state was created from.
    pub fn desc(&self) -> &BlendStateDesc {
        &self.desc
    }

    /// Applies this state, diffing against the previously active descriptor.
    ///
    /// With `previous == None` every setting is applied unconditionally.
    pub fn activate(&self, driver: &dyn GraphicsDriver, previous: Option<&BlendStateDesc>) {
        let d = &self.desc;

        if previous.map_or(true, |p| p.enabled != d.enabled) {
            driver.set_blend_enabled(d.enabled);
        }
        if previous.map_or(true, |p| (p.src_factor, p.dst_factor) != (d.src_factor, d.dst_factor))
        {
            driver.set_blend_func(d.src_factor, d.dst_factor);
        }
        if previous.map_or(true, |p| p.operation != d.operation) {
            driver.set_blend_op(d.operation);
        }
        if previous.map_or(true, |p| p.constant != d.constant) {
            driver.set_blend_color(d.constant);
        }

        // Drivers that cannot mask alpha separately always write it.
        let mut mask = d.write_mask;
        if !driver.supports_independent_alpha_write() {
            mask.insert(ColorWrites::ALPHA);
        }
        let prev_mask = previous.map(|p| {
            let mut m = p.write_mask;
            if !driver.supports_independent_alpha_write() {
                m.insert(ColorWrites::ALPHA);
            }
            m
        });
        if prev_mask.map_or(true, |p| p != mask) {
            driver.set_color_write_mask(mask);
        }

        if previous.map_or(true, |p| p.alpha_to_coverage != d.alpha_to_coverage) {
            driver.set_alpha_to_coverage(d.alpha_to_coverage);
        }
    }
}
