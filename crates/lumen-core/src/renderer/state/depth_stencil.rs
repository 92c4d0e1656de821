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

//! Depth-stencil state object.

use crate::renderer::api::{CompareFunction, StencilFace, StencilOperation};
use crate::renderer::traits::GraphicsDriver;

/// Stencil configuration for one triangle face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilFaceDesc {
    /// Whether the stencil test runs for this face.
    pub enabled: bool,
    /// Comparison between reference and stored value.
    pub func: CompareFunction,
    /// Reference value for the comparison.
    pub reference: u32,
    /// Mask ANDed with both reference and stored value before comparing.
    pub read_mask: u32,
    /// Operation when the stencil test fails.
    pub fail_op: StencilOperation,
    /// Operation when the stencil test passes but the depth test fails.
    pub depth_fail_op: StencilOperation,
    /// Operation when both tests pass.
    pub pass_op: StencilOperation,
    /// Bit mask restricting stencil buffer writes.
    pub write_mask: u32,
}

impl Default for StencilFaceDesc {
    fn default() -> Self {
        Self {
            enabled: false,
            func: CompareFunction::Always,
            reference: 0,
            read_mask: 0xFFFF,
            fail_op: StencilOperation::Keep,
            depth_fail_op: StencilOperation::Keep,
            pass_op: StencilOperation::Keep,
            write_mask: 0xFFFF,
        }
    }
}

impl StencilFaceDesc {
    fn func_unit(&self) -> (CompareFunction, u32, u32) {
        (self.func, self.reference, self.read_mask)
    }

    fn op_unit(&self) -> (StencilOperation, StencilOperation, StencilOperation, u32) {
        (self.fail_op, self.depth_fail_op, self.pass_op, self.write_mask)
    }
}

/// Describes depth testing, depth writes, and per-face stencil behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilStateDesc {
    /// Whether the depth test runs.
    pub depth_test_enabled: bool,
    /// Whether passing fragments update the depth buffer.
    pub depth_write_enabled: bool,
    /// Depth comparison function.
    pub depth_compare: CompareFunction,
    /// Stencil behavior for front-facing triangles.
    pub front: StencilFaceDesc,
    /// Stencil behavior for back-facing triangles.
    pub back: StencilFaceDesc,
}

impl Default for DepthStencilStateDesc {
    fn default() -> Self {
        Self {
            depth_test_enabled: true,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            front: StencilFaceDesc::default(),
            back: StencilFaceDesc::default(),
        }
    }
}

/// An immutable depth-stencil state that can be activated on a driver.
#[derive(Debug)]
pub struct DepthStencilState {
    desc: DepthStencilStateDesc,
}

impl DepthStencilState {
    /// Creates a depth-stencil state from a descriptor.
    pub fn new(desc: DepthStencilStateDesc) -> Self {
        Self { desc }
    }

    /// The descriptor this state was created from.
    pub fn desc(&self) -> &DepthStencilStateDesc {
        &self.desc
    }

    /// Applies this state, diffing against the previously active descriptor.
    pub fn activate(&self, driver: &dyn GraphicsDriver, previous: Option<&DepthStencilStateDesc>) {
        let d = &self.desc;

        if previous.map_or(true, |p| p.depth_test_enabled != d.depth_test_enabled) {
            driver.set_depth_test_enabled(d.depth_test_enabled);
        }
        if previous.map_or(true, |p| p.depth_write_enabled != d.depth_write_enabled) {
            driver.set_depth_write_enabled(d.depth_write_enabled);
        }
        if previous.map_or(true, |p| p.depth_compare != d.depth_compare) {
            driver.set_depth_compare(d.depth_compare);
        }

        Self::activate_face(driver, StencilFace::Front, &d.front, previous.map(|p| &p.front));
        Self::activate_face(driver, StencilFace::Back, &d.back, previous.map(|p| &p.back));
    }

    fn activate_face(
        driver: &dyn GraphicsDriver,
        face: StencilFace,
        desc: &StencilFaceDesc,
        previous: Option<&StencilFaceDesc>,
    ) {
        if previous.map_or(true, |p| p.enabled != desc.enabled) {
            driver.set_stencil_enabled(face, desc.enabled);
        }
        if previous.map_or(true, |p| p.func_unit() != desc.func_unit()) {
            driver.set_stencil_func(face, desc.func, desc.reference, desc.read_mask);
        }
        if previous.map_or(true, |p| p.op_unit() != desc.op_unit()) {
            driver.set_stencil_op(
                face,
                desc.fail_op,
                desc.depth_fail_op,
                desc.pass_op,
                desc.write_mask,
            );
        }
    }
}
