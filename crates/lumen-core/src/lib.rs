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

//! # Lumen Core
//!
//! Backend-agnostic render-state and GPU-resource abstraction layer.
//!
//! This crate defines the contracts of the rendering hardware-abstraction
//! layer: the [`renderer::GraphicsDriver`] trait spoken by concrete backends,
//! the fixed-function state objects, the shader-program lifecycle, GPU
//! buffers, framebuffers, and the [`renderer::Renderer`] facade with its
//! bound-state cache.

#![warn(missing_docs)]

pub mod math;
pub mod renderer;
pub mod utils;

pub use math::LinearRgba;
