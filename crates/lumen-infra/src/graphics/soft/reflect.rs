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

//! Source-scanning reflection for the soft driver.
//!
//! Real drivers reflect the compiled binary; this backend scans declaration
//! lines instead. Array uniforms are reported with a `[0]` suffix and their
//! declared length, matching what hardware reflection APIs produce.

use lumen_core::renderer::{UniformReflection, UniformType};

fn uniform_type(keyword: &str) -> Option<UniformType> {
    match keyword {
        "float" => Some(UniformType::Float),
        "vec2" => Some(UniformType::Vec2),
        "vec3" => Some(UniformType::Vec3),
        "vec4" => Some(UniformType::Vec4),
        "int" => Some(UniformType::Int),
        "mat4" => Some(UniformType::Mat4),
        "sampler2D" | "samplerCube" => Some(UniformType::Texture),
        _ => None,
    }
}

/// Splits `name` or `name[N]` into the base name and array length.
fn parse_name(token: &str) -> Option<(&str, u32)> {
    let token = token.trim_end_matches(';');
    match token.find('[') {
        Some(open) => {
            let close = token.find(']')?;
            let count: u32 = token[open + 1..close].parse().ok()?;
            Some((&token[..open], count))
        }
        None => Some((token, 1)),
    }
}

/// Scans `source` for `uniform <type> <name>;` declarations.
pub(crate) fn scan_uniforms(source: &str) -> Vec<UniformReflection> {
    let mut uniforms = Vec::new();
    for line in source.lines() {
        let mut tokens = line.trim().split_whitespace();
        if tokens.next() != Some("uniform") {
            continue;
        }
        let Some(ty) = tokens.next().and_then(uniform_type) else {
            continue;
        };
        let Some((name, count)) = tokens.next().and_then(parse_name) else {
            continue;
        };
        let reported = if count > 1 {
            format!("{name}[0]")
        } else {
            name.to_string()
        };
        uniforms.push(UniformReflection {
            name: reported,
            ty,
            array_count: count,
        });
    }
    uniforms
}

/// Scans `source` for `attribute <type> <name>;` declarations.
pub(crate) fn scan_attributes(source: &str) -> Vec<String> {
    let mut attributes = Vec::new();
    for line in source.lines() {
        let mut tokens = line.trim().split_whitespace();
        if tokens.next() != Some("attribute") {
            continue;
        }
        if tokens.next().is_none() {
            continue;
        }
        if let Some((name, _)) = tokens.next().and_then(parse_name) {
            attributes.push(name.to_string());
        }
    }
    attributes
}
