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

//! GPU texture resources.

use std::sync::Arc;

use crate::renderer::api::{TextureId, TextureKind};
use crate::renderer::error::ResourceError;
use crate::renderer::traits::GraphicsDriver;

/// A driver-side texture with allocated storage.
#[derive(Debug)]
pub struct Texture {
    name: String,
    kind: TextureKind,
    id: TextureId,
    width: u32,
    height: u32,
    driver: Arc<dyn GraphicsDriver>,
}

impl Texture {
    /// Creates a texture and allocates `width * height` storage for it.
    pub fn new(
        driver: Arc<dyn GraphicsDriver>,
        name: impl Into<String>,
        kind: TextureKind,
        width: u32,
        height: u32,
    ) -> Result<Self, ResourceError> {
        let id = driver.create_texture(kind)?;
        driver.allocate_texture_storage(id, width, height)?;
        Ok(Self {
            name: name.into(),
            kind,
            id,
            width,
            height,
            driver,
        })
    }

    /// Reallocates storage at a new size. Contents are undefined afterwards.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ResourceError> {
        self.driver.allocate_texture_storage(self.id, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Dimensions of one mipmap level, clamped to at least 1x1.
    pub fn mip_dimensions(&self, level: u32) -> (u32, u32) {
        ((self.width >> level).max(1), (self.height >> level).max(1))
    }

    /// Debug name of the texture.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// High-level category of the texture.
    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    /// The driver-side texture handle.
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.driver.destroy_texture(self.id);
    }
}
