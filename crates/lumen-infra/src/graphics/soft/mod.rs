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

//! A headless in-memory graphics driver.
//!
//! `SoftDriver` implements the full [`GraphicsDriver`] contract against
//! CPU-side storage: buffers and textures are plain vectors, shader
//! "compilation" is a source scan, and every fixed-function setter is
//! recorded in a transition log. It backs the integration test suite and
//! any headless tool that needs renderer semantics without a GPU.
//!
//! [`GraphicsDriver`]: lumen_core::renderer::GraphicsDriver

mod driver;
mod reflect;
mod state;

pub use driver::{DrawCall, SoftDriver};
pub use state::{FixedFunctionState, StencilFaceShadow};
