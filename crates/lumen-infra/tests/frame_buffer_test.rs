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

//! Off-screen and window render target behavior.

use std::sync::Arc;

use lumen_core::math::LinearRgba;
use lumen_core::renderer::{
    AttachmentPoint, FrameBufferOffScreen, FrameBufferWindow, PixelBuffer, Renderer,
    RendererSettings, Texture, TextureKind,
};
use lumen_infra::SoftDriver;

fn setup() -> (Arc<SoftDriver>, Renderer) {
    let _ = env_logger::builder().is_test(true).try_init();
    let driver = Arc::new(SoftDriver::new());
    let renderer = Renderer::new(driver.clone(), RendererSettings::default());
    (driver, renderer)
}

fn render_texture(driver: &Arc<SoftDriver>, name: &str, width: u32, height: u32) -> Texture {
    Texture::new(driver.clone(), name, TextureKind::Render, width, height).unwrap()
}

#[test]
fn single_color_attachment_clears_and_reads_back() {
    let (driver, renderer) = setup();
    let mut target = FrameBufferOffScreen::new(driver.clone(), 64, 64).unwrap();
    target.attach_color(0, render_texture(&driver, "color0", 64, 64));
    target.clear_mut().colors[0] = LinearRgba::GREEN;

    assert!(target.begin());
    assert!(target.end());

    let Some(PixelBuffer::Rgba8 {
        width,
        height,
        data,
    }) = target.read_pixels(&renderer, AttachmentPoint::Color0)
    else {
        panic!("expected color readback");
    };
    assert_eq!((width, height), (64, 64));
    assert_eq!(data.len(), 64 * 64 * 4);
    assert_eq!(&data[..4], &[0, 255, 0, 255]);
}

#[test]
fn begin_fails_with_no_attachments() {
    let (driver, _renderer) = setup();
    let mut target = FrameBufferOffScreen::new(driver, 64, 64).unwrap();
    assert!(!target.begin());
}

#[test]
fn begin_fails_when_attachment_sizes_disagree() {
    let (driver, _renderer) = setup();
    let mut target = FrameBufferOffScreen::new(driver.clone(), 64, 64).unwrap();
    target.attach_color(0, render_texture(&driver, "color0", 64, 64));
    target.attach_color(1, render_texture(&driver, "color1", 32, 32));
    assert!(!target.begin());
}

#[test]
fn multiple_color_attachments_clear_per_slot_colors() {
    let (driver, renderer) = setup();
    let mut target = FrameBufferOffScreen::new(driver.clone(), 16, 16).unwrap();
    target.attach_color(0, render_texture(&driver, "albedo", 16, 16));
    target.attach_color(3, render_texture(&driver, "normal", 16, 16));
    target.clear_mut().colors[0] = LinearRgba::RED;
    target.clear_mut().colors[3] = LinearRgba::BLUE;

    assert!(target.begin());

    let Some(PixelBuffer::Rgba8 { data: slot0, .. }) =
        target.read_pixels(&renderer, AttachmentPoint::Color0)
    else {
        panic!("expected slot 0 readback");
    };
    let Some(PixelBuffer::Rgba8 { data: slot3, .. }) =
        target.read_pixels(&renderer, AttachmentPoint::Color3)
    else {
        panic!("expected slot 3 readback");
    };
    assert_eq!(&slot0[..4], &[255, 0, 0, 255]);
    assert_eq!(&slot3[..4], &[0, 0, 255, 255]);
}

#[test]
fn out_of_range_color_slot_hands_the_texture_back() {
    let (driver, _renderer) = setup();
    let mut target = FrameBufferOffScreen::new(driver.clone(), 16, 16).unwrap();

    let rejected = target.attach_color(8, render_texture(&driver, "extra", 16, 16));
    assert!(rejected.is_some());
    assert_eq!(target.attachments().count(), 0);
    assert!(target.detach_color(8).is_none());
}

#[test]
fn reading_an_unattached_slot_yields_nothing() {
    let (driver, renderer) = setup();
    let mut target = FrameBufferOffScreen::new(driver.clone(), 16, 16).unwrap();
    target.attach_color(0, render_texture(&driver, "color0", 16, 16));
    assert!(target.begin());
    assert!(target.read_pixels(&renderer, AttachmentPoint::Color5).is_none());
}

#[test]
fn depth_readback_is_sized_from_the_window() {
    let (driver, renderer) = setup();
    let mut target = FrameBufferOffScreen::new(driver.clone(), 64, 64).unwrap();
    target.attach_color(0, render_texture(&driver, "color0", 64, 64));
    target.attach_depth_stencil(render_texture(&driver, "depth", 64, 64));

    assert!(target.begin());

    // The returned buffer uses window dimensions even though the
    // attachment is 64x64; pixels outside the attachment read as 0.
    let Some(PixelBuffer::DepthF32 {
        width,
        height,
        data,
    }) = target.read_pixels(&renderer, AttachmentPoint::DepthStencil)
    else {
        panic!("expected depth readback");
    };
    assert_eq!((width, height), renderer.window_size());
    assert_eq!(data.len(), (width * height) as usize);
    assert_eq!(data[0], 1.0);
    assert_eq!(data[(width * height - 1) as usize], 0.0);
}

#[test]
fn resizing_reallocates_every_attachment() {
    let (driver, _renderer) = setup();
    let mut target = FrameBufferOffScreen::new(driver.clone(), 32, 32).unwrap();
    target.attach_color(0, render_texture(&driver, "color0", 32, 32));
    target.attach_depth_stencil(render_texture(&driver, "depth", 32, 32));

    target.on_size(128, 128);

    assert_eq!(target.size(), (128, 128));
    let color = target.attachments().color[0].as_ref().unwrap();
    assert_eq!((color.width(), color.height()), (128, 128));
    assert!(target.begin());
}

#[test]
fn window_target_clears_the_surface() {
    let (driver, renderer) = setup();
    let mut window = FrameBufferWindow::new(driver.clone());
    window.clear_mut().colors[0] = LinearRgba::WHITE;

    assert!(window.begin(&renderer));
    assert!(window.end());

    let Some(PixelBuffer::Rgba8 { data, .. }) =
        window.read_pixels(&renderer, AttachmentPoint::Color0)
    else {
        panic!("expected window readback");
    };
    assert_eq!(&data[..4], &[255, 255, 255, 255]);
    assert_eq!(driver.fixed_state().viewport, (0, 0, 1280, 720));
}

#[test]
fn window_target_rejects_secondary_color_points() {
    let (driver, renderer) = setup();
    let window = FrameBufferWindow::new(driver);
    assert!(window.read_pixels(&renderer, AttachmentPoint::Color2).is_none());
}

#[test]
fn window_depth_clear_reads_back() {
    let (driver, renderer) = setup();
    let mut window = FrameBufferWindow::new(driver);
    window.clear_mut().depth = 0.25;

    assert!(window.begin(&renderer));
    let Some(PixelBuffer::DepthF32 { data, .. }) =
        window.read_pixels(&renderer, AttachmentPoint::DepthStencil)
    else {
        panic!("expected depth readback");
    };
    assert_eq!(data[0], 0.25);
}
