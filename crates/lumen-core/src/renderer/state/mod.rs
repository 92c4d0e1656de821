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

//! Fixed-function render state objects.
//!
//! Each object wraps an immutable descriptor and knows how to apply it
//! through a [`GraphicsDriver`](crate::renderer::GraphicsDriver). Activation
//! takes the descriptor of the previously active state and emits driver
//! transitions only for the settings that differ, so re-activating the same
//! state is free.

pub mod blend;
pub mod depth_stencil;
pub mod rasterizer;
pub mod sampler;

pub use blend::{BlendState, BlendStateDesc};
pub use depth_stencil::{DepthStencilState, DepthStencilStateDesc, StencilFaceDesc};
pub use rasterizer::{RasterizerState, RasterizerStateDesc};
pub use sampler::{SamplerState, SamplerStateDesc};
