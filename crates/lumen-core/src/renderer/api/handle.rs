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

//! Opaque handles for driver-side GPU resources.
//!
//! These IDs are returned by [`GraphicsDriver`](crate::renderer::GraphicsDriver)
//! creation methods and are used to reference the resource in all subsequent
//! operations. They carry no lifetime semantics of their own; the owning
//! engine object is responsible for releasing them.

/// An opaque handle to a driver-side GPU buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);

/// An opaque handle to a driver-side texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// An opaque handle to a single compiled driver-side shader stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub usize);

/// An opaque handle to a driver-side shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub usize);

/// An opaque handle to a driver-side framebuffer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameBufferId(pub usize);

/// A uniform location as reported by the driver at link time.
///
/// A negative value marks an inactive uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

impl UniformLocation {
    /// The location the driver reports for a uniform the linker optimized out.
    pub const INACTIVE: Self = Self(-1);

    /// Returns `true` when this location refers to an active uniform.
    pub const fn is_active(&self) -> bool {
        self.0 >= 0
    }
}
