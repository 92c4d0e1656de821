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

//! Off-screen and window render targets.

use std::sync::Arc;

use crate::math::LinearRgba;
use crate::renderer::api::{AttachmentPoint, FrameBufferId, TextureId, MAX_COLOR_ATTACHMENTS};
use crate::renderer::error::ResourceError;
use crate::renderer::renderer::Renderer;
use crate::renderer::texture::Texture;
use crate::renderer::traits::GraphicsDriver;

/// The textures attached to an off-screen framebuffer.
///
/// The framebuffer owns its attachments; detaching hands the texture back.
#[derive(Debug)]
pub struct Attachments {
    /// Color attachments by slot.
    pub color: [Option<Texture>; MAX_COLOR_ATTACHMENTS],
    /// The combined depth-stencil attachment.
    pub depth_stencil: Option<Texture>,
}

impl Default for Attachments {
    fn default() -> Self {
        Self {
            color: std::array::from_fn(|_| None),
            depth_stencil: None,
        }
    }
}

impl Attachments {
    /// Iterates the occupied color slots as `(slot, texture)` pairs.
    pub fn occupied_color_slots(&self) -> impl Iterator<Item = (usize, &Texture)> {
        self.color
            .iter()
            .enumerate()
            .filter_map(|(slot, tex)| tex.as_ref().map(|t| (slot, t)))
    }

    /// Number of attached textures, color and depth-stencil combined.
    pub fn count(&self) -> usize {
        self.occupied_color_slots().count() + usize::from(self.depth_stencil.is_some())
    }
}

/// What gets cleared when a render target begins a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearConfig {
    /// Whether color attachments are cleared.
    pub clear_color: bool,
    /// Per-slot clear colors.
    pub colors: [LinearRgba; MAX_COLOR_ATTACHMENTS],
    /// Whether the depth plane is cleared.
    pub clear_depth: bool,
    /// Depth clear value.
    pub depth: f32,
    /// Whether the stencil plane is cleared.
    pub clear_stencil: bool,
    /// Stencil clear value.
    pub stencil: u32,
}

impl Default for ClearConfig {
    fn default() -> Self {
        Self {
            clear_color: true,
            colors: [LinearRgba::BLACK; MAX_COLOR_ATTACHMENTS],
            clear_depth: true,
            depth: 1.0,
            clear_stencil: true,
            stencil: 0,
        }
    }
}

/// Pixel data read back from a render target.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// 8-bit-per-channel RGBA color data.
    Rgba8 {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Tightly packed RGBA rows.
        data: Vec<u8>,
    },
    /// 32-bit float depth data.
    DepthF32 {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Tightly packed depth rows.
        data: Vec<f32>,
    },
}

/// An off-screen render target owning its attachment textures.
///
/// Attachment handles are pushed to the driver lazily: [`begin`] diffs the
/// desired attachments against what the driver-side object currently holds
/// and re-attaches only the slots that changed.
///
/// [`begin`]: FrameBufferOffScreen::begin
#[derive(Debug)]
pub struct FrameBufferOffScreen {
    id: FrameBufferId,
    driver: Arc<dyn GraphicsDriver>,
    attachments: Attachments,
    bound_color: [Option<TextureId>; MAX_COLOR_ATTACHMENTS],
    bound_depth_stencil: Option<TextureId>,
    width: u32,
    height: u32,
    clear: ClearConfig,
}

impl FrameBufferOffScreen {
    /// Creates an off-screen framebuffer with no attachments.
    pub fn new(
        driver: Arc<dyn GraphicsDriver>,
        width: u32,
        height: u32,
    ) -> Result<Self, ResourceError> {
        let id = driver.create_framebuffer()?;
        Ok(Self {
            id,
            driver,
            attachments: Attachments::default(),
            bound_color: [None; MAX_COLOR_ATTACHMENTS],
            bound_depth_stencil: None,
            width,
            height,
            clear: ClearConfig::default(),
        })
    }

    /// Attaches a color texture, returning the displaced one if any.
    ///
    /// An out-of-range slot is rejected with an error log and the texture
    /// is handed back.
    pub fn attach_color(&mut self, slot: usize, texture: Texture) -> Option<Texture> {
        match self.attachments.color.get_mut(slot) {
            Some(entry) => entry.replace(texture),
            None => {
                log::error!("Color attachment slot {slot} is out of range");
                Some(texture)
            }
        }
    }

    /// Detaches and returns the color texture in `slot`.
    pub fn detach_color(&mut self, slot: usize) -> Option<Texture> {
        match self.attachments.color.get_mut(slot) {
            Some(entry) => entry.take(),
            None => {
                log::error!("Color attachment slot {slot} is out of range");
                None
            }
        }
    }

    /// Attaches the depth-stencil texture, returning the displaced one.
    pub fn attach_depth_stencil(&mut self, texture: Texture) -> Option<Texture> {
        self.attachments.depth_stencil.replace(texture)
    }

    /// Detaches and returns the depth-stencil texture.
    pub fn detach_depth_stencil(&mut self) -> Option<Texture> {
        self.attachments.depth_stencil.take()
    }

    /// The current attachments.
    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    /// The clear configuration applied by [`begin`](Self::begin).
    pub fn clear(&self) -> &ClearConfig {
        &self.clear
    }

    /// Mutable access to the clear configuration.
    pub fn clear_mut(&mut self) -> &mut ClearConfig {
        &mut self.clear
    }

    /// Target dimensions.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Binds this framebuffer for rendering, synchronizing attachments,
    /// setting the viewport, and applying the configured clears.
    ///
    /// Fails when no texture is attached or the attachments disagree on
    /// size. Returns `true` when the target is ready to draw into.
    pub fn begin(&mut self) -> bool {
        if self.attachments.count() == 0 {
            log::error!("Cannot begin off-screen pass with no attachments");
            return false;
        }
        for (slot, texture) in self.attachments.occupied_color_slots() {
            if (texture.width(), texture.height()) != (self.width, self.height) {
                log::error!(
                    "Color attachment {} is {}x{}, expected {}x{}",
                    slot,
                    texture.width(),
                    texture.height(),
                    self.width,
                    self.height
                );
                return false;
            }
        }
        if let Some(ds) = &self.attachments.depth_stencil {
            if (ds.width(), ds.height()) != (self.width, self.height) {
                log::error!(
                    "Depth-stencil attachment is {}x{}, expected {}x{}",
                    ds.width(),
                    ds.height(),
                    self.width,
                    self.height
                );
                return false;
            }
        }

        self.driver.bind_framebuffer(Some(self.id));

        for slot in 0..MAX_COLOR_ATTACHMENTS {
            let desired = self.attachments.color[slot].as_ref().map(Texture::id);
            if desired != self.bound_color[slot] {
                self.driver.attach_framebuffer_texture(
                    self.id,
                    AttachmentPoint::COLORS[slot],
                    desired,
                );
                self.bound_color[slot] = desired;
            }
        }
        let desired_ds = self.attachments.depth_stencil.as_ref().map(Texture::id);
        if desired_ds != self.bound_depth_stencil {
            self.driver
                .attach_framebuffer_texture(self.id, AttachmentPoint::DepthStencil, desired_ds);
            self.bound_depth_stencil = desired_ds;
        }

        let draw_slots: Vec<usize> = self
            .attachments
            .occupied_color_slots()
            .map(|(slot, _)| slot)
            .collect();
        self.driver.set_draw_buffers(&draw_slots);

        #[cfg(debug_assertions)]
        if let Err(err) = self.driver.check_framebuffer_complete() {
            log::error!("Off-screen framebuffer incomplete: {err}");
            self.driver.bind_framebuffer(None);
            return false;
        }

        self.driver.set_viewport(0, 0, self.width, self.height);

        if self.clear.clear_color {
            for (slot, _) in self.attachments.occupied_color_slots() {
                self.driver.clear_color_slot(slot, self.clear.colors[slot]);
            }
        }
        if self.attachments.depth_stencil.is_some()
            && (self.clear.clear_depth || self.clear.clear_stencil)
        {
            self.driver.clear_depth_stencil(
                self.clear.clear_depth.then_some(self.clear.depth),
                self.clear.clear_stencil.then_some(self.clear.stencil),
            );
        }

        true
    }

    /// Ends the pass. The target stays bound until another target begins.
    pub fn end(&self) -> bool {
        true
    }

    /// Resizes the target and every attachment texture.
    pub fn on_size(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        for texture in self.attachments.color.iter_mut().flatten() {
            if let Err(err) = texture.resize(width, height) {
                log::error!("Failed to resize color attachment '{}': {err}", texture.name());
            }
        }
        if let Some(ds) = &mut self.attachments.depth_stencil {
            if let Err(err) = ds.resize(width, height) {
                log::error!("Failed to resize depth-stencil attachment: {err}");
            }
        }
        self.width = width;
        self.height = height;
    }

    /// Reads back the contents of one attachment point.
    ///
    /// Color readbacks are sized from the attachment. Depth readbacks are
    /// sized from the renderer's window dimensions.
    pub fn read_pixels(&self, renderer: &Renderer, point: AttachmentPoint) -> Option<PixelBuffer> {
        self.driver.bind_framebuffer(Some(self.id));
        match point.color_index() {
            Some(slot) => {
                let texture = self.attachments.color[slot].as_ref()?;
                let (width, height) = (texture.width(), texture.height());
                match self.driver.read_color_pixels(slot, width, height) {
                    Ok(data) => Some(PixelBuffer::Rgba8 {
                        width,
                        height,
                        data,
                    }),
                    Err(err) => {
                        log::error!("Color readback failed: {err}");
                        None
                    }
                }
            }
            None => {
                self.attachments.depth_stencil.as_ref()?;
                let (width, height) = renderer.window_size();
                match self.driver.read_depth_pixels(width, height) {
                    Ok(data) => Some(PixelBuffer::DepthF32 {
                        width,
                        height,
                        data,
                    }),
                    Err(err) => {
                        log::error!("Depth readback failed: {err}");
                        None
                    }
                }
            }
        }
    }
}

impl Drop for FrameBufferOffScreen {
    fn drop(&mut self) {
        self.driver.destroy_framebuffer(self.id);
    }
}

/// The window's default render target.
#[derive(Debug)]
pub struct FrameBufferWindow {
    driver: Arc<dyn GraphicsDriver>,
    clear: ClearConfig,
}

impl FrameBufferWindow {
    /// Creates the window render target.
    pub fn new(driver: Arc<dyn GraphicsDriver>) -> Self {
        Self {
            driver,
            clear: ClearConfig::default(),
        }
    }

    /// The clear configuration applied by [`begin`](Self::begin).
    pub fn clear(&self) -> &ClearConfig {
        &self.clear
    }

    /// Mutable access to the clear configuration.
    pub fn clear_mut(&mut self) -> &mut ClearConfig {
        &mut self.clear
    }

    /// Binds the window surface, sets the full-window viewport, and applies
    /// the configured clears.
    pub fn begin(&mut self, renderer: &Renderer) -> bool {
        let (width, height) = renderer.window_size();
        self.driver.bind_framebuffer(None);
        self.driver.set_viewport(0, 0, width, height);

        if self.clear.clear_color {
            self.driver.clear_color_slot(0, self.clear.colors[0]);
        }
        if self.clear.clear_depth || self.clear.clear_stencil {
            self.driver.clear_depth_stencil(
                self.clear.clear_depth.then_some(self.clear.depth),
                self.clear.clear_stencil.then_some(self.clear.stencil),
            );
        }
        true
    }

    /// Ends the pass.
    pub fn end(&self) -> bool {
        true
    }

    /// Reads back the window surface.
    ///
    /// Only [`AttachmentPoint::Color0`] and [`AttachmentPoint::DepthStencil`]
    /// are meaningful for the window target.
    pub fn read_pixels(&self, renderer: &Renderer, point: AttachmentPoint) -> Option<PixelBuffer> {
        let (width, height) = renderer.window_size();
        self.driver.bind_framebuffer(None);
        match point {
            AttachmentPoint::Color0 => match self.driver.read_color_pixels(0, width, height) {
                Ok(data) => Some(PixelBuffer::Rgba8 {
                    width,
                    height,
                    data,
                }),
                Err(err) => {
                    log::error!("Window color readback failed: {err}");
                    None
                }
            },
            AttachmentPoint::DepthStencil => {
                match self.driver.read_depth_pixels(width, height) {
                    Ok(data) => Some(PixelBuffer::DepthF32 {
                        width,
                        height,
                        data,
                    }),
                    Err(err) => {
                        log::error!("Window depth readback failed: {err}");
                        None
                    }
                }
            }
            _ => {
                log::warn!("Window target has no attachment at {point:?}");
                None
            }
        }
    }
}
