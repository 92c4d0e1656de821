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

//! Vertex layout description types.

/// Semantic meaning of a vertex attribute.
///
/// Each semantic maps to a well-known attribute name in shader source, so
/// programs can resolve attribute locations without per-mesh configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSemantic {
    /// Object-space position.
    Position,
    /// Surface normal.
    Normal,
    /// Vertex color.
    Color,
    /// First texture coordinate set.
    TexCoord0,
    /// Second texture coordinate set.
    TexCoord1,
    /// Skinning bone indices.
    BlendIndices,
    /// Skinning bone weights.
    BlendWeights,
    /// Surface tangent.
    Tangent,
    /// Surface binormal.
    Binormal,
}

impl VertexSemantic {
    /// Every semantic, in attribute-slot order.
    pub const ALL: [VertexSemantic; 9] = [
        VertexSemantic::Position,
        VertexSemantic::Normal,
        VertexSemantic::Color,
        VertexSemantic::TexCoord0,
        VertexSemantic::TexCoord1,
        VertexSemantic::BlendIndices,
        VertexSemantic::BlendWeights,
        VertexSemantic::Tangent,
        VertexSemantic::Binormal,
    ];

    /// Dense slot index of the semantic.
    pub const fn index(&self) -> usize {
        match self {
            VertexSemantic::Position => 0,
            VertexSemantic::Normal => 1,
            VertexSemantic::Color => 2,
            VertexSemantic::TexCoord0 => 3,
            VertexSemantic::TexCoord1 => 4,
            VertexSemantic::BlendIndices => 5,
            VertexSemantic::BlendWeights => 6,
            VertexSemantic::Tangent => 7,
            VertexSemantic::Binormal => 8,
        }
    }

    /// The attribute name this semantic binds to in shader source.
    pub const fn attribute_name(&self) -> &'static str {
        match self {
            VertexSemantic::Position => "a_Position",
            VertexSemantic::Normal => "a_Normal",
            VertexSemantic::Color => "a_Color",
            VertexSemantic::TexCoord0 => "a_UV",
            VertexSemantic::TexCoord1 => "a_UV1",
            VertexSemantic::BlendIndices => "a_Joint",
            VertexSemantic::BlendWeights => "a_Weight",
            VertexSemantic::Tangent => "a_Tangent",
            VertexSemantic::Binormal => "a_Binormal",
        }
    }
}

/// Component layout of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// One 32-bit float.
    Float32,
    /// Two 32-bit floats.
    Float32x2,
    /// Three 32-bit floats.
    Float32x3,
    /// Four 32-bit floats.
    Float32x4,
    /// Four unsigned bytes.
    Uint8x4,
    /// Four unsigned normalized bytes.
    Unorm8x4,
}

impl VertexFormat {
    /// Number of scalar components.
    pub const fn component_count(&self) -> u32 {
        match self {
            VertexFormat::Float32 => 1,
            VertexFormat::Float32x2 => 2,
            VertexFormat::Float32x3 => 3,
            VertexFormat::Float32x4 | VertexFormat::Uint8x4 | VertexFormat::Unorm8x4 => 4,
        }
    }

    /// Total byte size of the attribute.
    pub const fn byte_size(&self) -> u32 {
        match self {
            VertexFormat::Float32 => 4,
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
            VertexFormat::Uint8x4 | VertexFormat::Unorm8x4 => 4,
        }
    }

    /// Whether integer data should be normalized to `[0, 1]` on fetch.
    pub const fn is_normalized(&self) -> bool {
        matches!(self, VertexFormat::Unorm8x4)
    }
}

/// One attribute within an interleaved vertex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexElement {
    /// What the attribute means.
    pub semantic: VertexSemantic,
    /// Component layout of the attribute.
    pub format: VertexFormat,
    /// Byte offset from the start of the vertex.
    pub offset: u32,
}
