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

//! Uniform data types, CPU-side values, and link-time reflection records.

/// Data type of a shader uniform as reported by program reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    /// A single `f32`.
    Float,
    /// Two `f32` components.
    Vec2,
    /// Three `f32` components.
    Vec3,
    /// Four `f32` components.
    Vec4,
    /// A single `i32`.
    Int,
    /// A 4x4 `f32` matrix, column-major.
    Mat4,
    /// A texture sampler of any dimensionality.
    Texture,
}

impl UniformType {
    /// Byte size of a single element of this type. Samplers occupy one
    /// `i32` slot binding.
    pub const fn byte_size(&self) -> u32 {
        match self {
            UniformType::Float => 4,
            UniformType::Vec2 => 8,
            UniformType::Vec3 => 12,
            UniformType::Vec4 => 16,
            UniformType::Int => 4,
            UniformType::Mat4 => 64,
            UniformType::Texture => 4,
        }
    }

    /// Whether the uniform is a texture sampler.
    pub const fn is_texture(&self) -> bool {
        matches!(self, UniformType::Texture)
    }
}

/// A CPU-side uniform value staged for upload at draw time.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// A single float.
    Float(f32),
    /// A 2-component vector.
    Vec2([f32; 2]),
    /// A 3-component vector.
    Vec3([f32; 3]),
    /// A 4-component vector.
    Vec4([f32; 4]),
    /// A single integer, also used for sampler slot bindings.
    Int(i32),
    /// A column-major 4x4 matrix.
    Mat4([f32; 16]),
    /// An array of floats.
    FloatArray(Vec<f32>),
    /// An array of 4-component vectors.
    Vec4Array(Vec<[f32; 4]>),
    /// An array of column-major 4x4 matrices.
    Mat4Array(Vec<[f32; 16]>),
}

impl UniformValue {
    /// The uniform type this value is compatible with.
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::Float(_) | UniformValue::FloatArray(_) => UniformType::Float,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Vec4(_) | UniformValue::Vec4Array(_) => UniformType::Vec4,
            UniformValue::Int(_) => UniformType::Int,
            UniformValue::Mat4(_) | UniformValue::Mat4Array(_) => UniformType::Mat4,
        }
    }

    /// Number of array elements carried by the value.
    pub fn element_count(&self) -> usize {
        match self {
            UniformValue::FloatArray(v) => v.len(),
            UniformValue::Vec4Array(v) => v.len(),
            UniformValue::Mat4Array(v) => v.len(),
            _ => 1,
        }
    }
}

/// One active uniform reported by the driver after a successful link.
///
/// Array uniforms are reported with their declared name suffixed `[0]` and
/// `array_count` set to the declared element count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformReflection {
    /// The uniform name as the driver reports it.
    pub name: String,
    /// The element data type.
    pub ty: UniformType,
    /// Declared array length, 1 for scalars.
    pub array_count: u32,
}
