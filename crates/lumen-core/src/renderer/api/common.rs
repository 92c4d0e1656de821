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

//! Common enums shared across the fixed-function state and resource APIs.

use crate::lumen_bitflags;

/// Maximum number of color attachments an off-screen framebuffer can carry.
pub const MAX_COLOR_ATTACHMENTS: usize = 8;

/// Identifies a programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Processes each vertex.
    Vertex,
    /// Processes each rasterized fragment.
    Fragment,
    /// General-purpose compute work.
    Compute,
}

impl ShaderStage {
    /// Dense index of the stage, usable as an array slot.
    pub const fn index(&self) -> usize {
        match self {
            ShaderStage::Vertex => 0,
            ShaderStage::Fragment => 1,
            ShaderStage::Compute => 2,
        }
    }

    /// Short label used in compiler diagnostics.
    pub const fn desc_label(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VS",
            ShaderStage::Fragment => "VS",
            ShaderStage::Compute => "CS",
        }
    }
}

/// What a [`GpuBuffer`](crate::renderer::GpuBuffer) stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Per-vertex attribute data.
    Vertex,
    /// Index data referencing vertices.
    Index,
}

/// Expected update frequency of a buffer's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Uploaded once and drawn many times.
    Static,
    /// Re-uploaded frequently, possibly every frame.
    Dynamic,
}

/// Comparison function for depth and stencil tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    /// Never passes.
    Never,
    /// Passes if new value < existing value.
    Less,
    /// Passes if new value == existing value.
    Equal,
    /// Passes if new value <= existing value.
    LessEqual,
    /// Passes if new value > existing value.
    Greater,
    /// Passes if new value != existing value.
    NotEqual,
    /// Passes if new value >= existing value.
    GreaterEqual,
    /// Always passes.
    #[default]
    Always,
}

/// Multiplier applied to a source or destination color during blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// 0.0
    Zero,
    /// 1.0
    One,
    /// Source color.
    SrcColor,
    /// 1 - source color.
    OneMinusSrcColor,
    /// Source alpha.
    SrcAlpha,
    /// 1 - source alpha.
    OneMinusSrcAlpha,
    /// Destination color.
    DstColor,
    /// 1 - destination color.
    OneMinusDstColor,
    /// Destination alpha.
    DstAlpha,
    /// 1 - destination alpha.
    OneMinusDstAlpha,
    /// The constant blend color.
    Constant,
    /// 1 - the constant blend color.
    OneMinusConstant,
    /// min(source alpha, 1 - destination alpha).
    SrcAlphaSaturated,
}

/// Operation combining the weighted source and destination colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendOperation {
    /// src + dst
    #[default]
    Add,
    /// src - dst
    Subtract,
    /// dst - src
    ReverseSubtract,
    /// min(src, dst)
    Min,
    /// max(src, dst)
    Max,
}

/// Action applied to the stencil buffer after a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOperation {
    /// Keep the current value.
    #[default]
    Keep,
    /// Set the value to zero.
    Zero,
    /// Replace with the reference value.
    Replace,
    /// Bitwise invert the current value.
    Invert,
    /// Increment, clamping at the maximum.
    IncrementClamp,
    /// Decrement, clamping at zero.
    DecrementClamp,
    /// Increment with wraparound.
    IncrementWrap,
    /// Decrement with wraparound.
    DecrementWrap,
}

/// Which triangle faces are discarded before rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// Cull front-facing triangles.
    Front,
    /// Cull back-facing triangles.
    #[default]
    Back,
}

/// Winding order that defines the front face of a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrontFace {
    /// Counter-clockwise winding is front-facing.
    #[default]
    Ccw,
    /// Clockwise winding is front-facing.
    Cw,
}

/// How polygons are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonMode {
    /// Filled polygons.
    #[default]
    Fill,
    /// Edges only.
    Line,
    /// Vertices only.
    Point,
}

/// Primitive assembly mode for draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Isolated points.
    PointList,
    /// Isolated line segments.
    LineList,
    /// Connected line segments.
    LineStrip,
    /// Isolated triangles.
    #[default]
    TriangleList,
    /// Connected triangles sharing an edge.
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Number of whole primitives produced by `element_count` elements.
    pub const fn primitive_count(&self, element_count: u32) -> u32 {
        match self {
            PrimitiveTopology::PointList => element_count,
            PrimitiveTopology::LineList => element_count / 2,
            PrimitiveTopology::LineStrip => element_count.saturating_sub(1),
            PrimitiveTopology::TriangleList => element_count / 3,
            PrimitiveTopology::TriangleStrip => element_count.saturating_sub(2),
        }
    }
}

/// Element width of an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// 8-bit indices.
    Uint8,
    /// 16-bit indices.
    Uint16,
    /// 32-bit indices.
    Uint32,
}

impl IndexFormat {
    /// Derives the format from a per-index byte stride. Strides other than
    /// 4 or 2 fall back to 8-bit indices.
    pub const fn from_stride(stride: u32) -> Self {
        match stride {
            4 => IndexFormat::Uint32,
            2 => IndexFormat::Uint16,
            _ => IndexFormat::Uint8,
        }
    }

    /// Byte size of a single index.
    pub const fn byte_size(&self) -> u32 {
        match self {
            IndexFormat::Uint8 => 1,
            IndexFormat::Uint16 => 2,
            IndexFormat::Uint32 => 4,
        }
    }
}

/// Texture filtering used when a texture is sampled at a different scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Nearest-texel lookup.
    Nearest,
    /// Linear interpolation between texels.
    #[default]
    Linear,
}

/// Filtering between mipmap levels for minification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MipFilter {
    /// Mipmaps are not sampled.
    #[default]
    None,
    /// The nearest mipmap level is selected.
    Nearest,
    /// The two nearest levels are interpolated.
    Linear,
}

/// Behavior of texture coordinates outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    /// Coordinates wrap around.
    #[default]
    Repeat,
    /// Coordinates mirror on each repetition.
    Mirror,
    /// Coordinates clamp to the edge texel.
    Clamp,
    /// Out-of-range coordinates return the border color.
    Border,
}

/// Texture coordinate axis a wrap mode applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureAxis {
    /// Horizontal (s) axis.
    U,
    /// Vertical (t) axis.
    V,
    /// Depth (r) axis.
    W,
}

/// High-level category of a texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// A plain 2D sampled texture.
    D2,
    /// A six-face cube map.
    Cube,
    /// A 2D texture intended as a framebuffer attachment.
    Render,
}

/// Which face of a triangle a stencil setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilFace {
    /// The front-facing side.
    Front,
    /// The back-facing side.
    Back,
}

/// A framebuffer attachment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentPoint {
    /// Color attachment 0.
    Color0,
    /// Color attachment 1.
    Color1,
    /// Color attachment 2.
    Color2,
    /// Color attachment 3.
    Color3,
    /// Color attachment 4.
    Color4,
    /// Color attachment 5.
    Color5,
    /// Color attachment 6.
    Color6,
    /// Color attachment 7.
    Color7,
    /// The combined depth-stencil attachment.
    DepthStencil,
}

impl AttachmentPoint {
    /// All color attachment points in slot order.
    pub const COLORS: [AttachmentPoint; MAX_COLOR_ATTACHMENTS] = [
        AttachmentPoint::Color0,
        AttachmentPoint::Color1,
        AttachmentPoint::Color2,
        AttachmentPoint::Color3,
        AttachmentPoint::Color4,
        AttachmentPoint::Color5,
        AttachmentPoint::Color6,
        AttachmentPoint::Color7,
    ];

    /// The color slot index, or `None` for the depth-stencil point.
    pub const fn color_index(&self) -> Option<usize> {
        match self {
            AttachmentPoint::Color0 => Some(0),
            AttachmentPoint::Color1 => Some(1),
            AttachmentPoint::Color2 => Some(2),
            AttachmentPoint::Color3 => Some(3),
            AttachmentPoint::Color4 => Some(4),
            AttachmentPoint::Color5 => Some(5),
            AttachmentPoint::Color6 => Some(6),
            AttachmentPoint::Color7 => Some(7),
            AttachmentPoint::DepthStencil => None,
        }
    }
}

lumen_bitflags! {
    /// Per-channel color write mask.
    pub struct ColorWrites: u32 {
        /// Write the red channel.
        const RED = 1 << 0;
        /// Write the green channel.
        const GREEN = 1 << 1;
        /// Write the blue channel.
        const BLUE = 1 << 2;
        /// Write the alpha channel.
        const ALPHA = 1 << 3;
    }
}

impl ColorWrites {
    /// All color channels without alpha.
    pub const COLOR: Self = ColorWrites::RED.with(ColorWrites::GREEN).with(ColorWrites::BLUE);
    /// Every channel.
    pub const ALL: Self = ColorWrites::COLOR.with(ColorWrites::ALPHA);
}
