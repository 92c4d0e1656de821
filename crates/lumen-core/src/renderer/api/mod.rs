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

//! Backend-agnostic rendering API types.
//!
//! Organized into several logical sub-modules:
//!
//! - **[`common`]**: Fixed-function and resource enums.
//! - **[`handle`]**: Opaque driver-side resource handles.
//! - **[`uniform`]**: Uniform types, values, and reflection records.
//! - **[`vertex`]**: Vertex semantics, formats, and layout elements.

pub mod common;
pub mod handle;
pub mod uniform;
pub mod vertex;

pub use common::*;
pub use handle::*;
pub use uniform::*;
pub use vertex::*;
