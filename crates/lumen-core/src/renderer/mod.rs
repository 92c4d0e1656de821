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

//! Provides the public, backend-agnostic rendering contracts.
//!
//! This module defines the "common language" for all rendering operations:
//! the abstract [`GraphicsDriver`] trait spoken by concrete backends, the
//! descriptor and handle types, the fixed-function state objects, GPU
//! resources, and the [`Renderer`] facade. The 'how' of talking to actual
//! hardware is handled by a backend implementation in the `lumen-infra`
//! crate which implements [`GraphicsDriver`].

pub mod api;
pub mod buffer;
pub mod error;
pub mod frame_buffer;
pub mod program;
pub mod renderer;
pub mod shader;
pub mod state;
pub mod texture;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::buffer::GpuBuffer;
pub use self::error::{RenderError, ResourceError, ShaderError};
pub use self::frame_buffer::{
    Attachments, ClearConfig, FrameBufferOffScreen, FrameBufferWindow, PixelBuffer,
};
pub use self::program::{ShaderProgram, Uniform, UniformKind};
pub use self::renderer::{FrameStats, Renderer, RendererSettings, RendererState};
pub use self::shader::{Shader, ShaderIncludeLibrary};
pub use self::state::{
    BlendState, BlendStateDesc, DepthStencilState, DepthStencilStateDesc, RasterizerState,
    RasterizerStateDesc, SamplerState, SamplerStateDesc, StencilFaceDesc,
};
pub use self::texture::Texture;
pub use self::traits::{GraphicsDriver, Mesh, Renderable};
