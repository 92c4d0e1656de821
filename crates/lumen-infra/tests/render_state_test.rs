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

//! Fixed-function state activation and diffing behavior.

use std::sync::Arc;

use lumen_core::renderer::{
    BlendState, BlendStateDesc, ColorWrites, DepthStencilState, DepthStencilStateDesc,
    RasterizerState, RasterizerStateDesc, Renderer, RendererSettings, SamplerStateDesc,
};
use lumen_infra::SoftDriver;

fn setup() -> (Arc<SoftDriver>, Renderer) {
    let _ = env_logger::builder().is_test(true).try_init();
    let driver = Arc::new(SoftDriver::new());
    let renderer = Renderer::new(driver.clone(), RendererSettings::default());
    (driver, renderer)
}

#[test]
fn first_blend_activation_applies_every_setting() {
    let (driver, mut renderer) = setup();
    driver.clear_transition_log();

    renderer.set_blend_state(Arc::new(BlendState::new(BlendStateDesc::alpha_blend())));

    assert_eq!(driver.transition_count(), 6);
    let log = driver.transition_log();
    assert!(log.contains(&"blend.enabled".to_string()));
    assert!(log.contains(&"blend.func".to_string()));
    assert!(log.contains(&"blend.write_mask".to_string()));
}

#[test]
fn reactivating_the_same_blend_state_is_free() {
    let (driver, mut renderer) = setup();
    let state = Arc::new(BlendState::new(BlendStateDesc::alpha_blend()));

    renderer.set_blend_state(state.clone());
    driver.clear_transition_log();
    renderer.set_blend_state(state);

    assert_eq!(driver.transition_count(), 0);
}

#[test]
fn switching_blend_states_emits_only_differing_settings() {
    let (driver, mut renderer) = setup();
    let base = BlendStateDesc::alpha_blend();
    renderer.set_blend_state(Arc::new(BlendState::new(base)));

    driver.clear_transition_log();
    let mut disabled = base;
    disabled.enabled = false;
    renderer.set_blend_state(Arc::new(BlendState::new(disabled)));

    assert_eq!(driver.transition_log(), vec!["blend.enabled"]);
}

#[test]
fn first_depth_stencil_activation_covers_both_faces() {
    let (driver, mut renderer) = setup();
    driver.clear_transition_log();

    renderer.set_depth_stencil_state(Arc::new(DepthStencilState::new(
        DepthStencilStateDesc::default(),
    )));

    // 3 depth settings plus enable, func, and op for each face.
    assert_eq!(driver.transition_count(), 9);
}

#[test]
fn changing_only_the_stencil_reference_reissues_one_compound() {
    let (driver, mut renderer) = setup();
    let base = DepthStencilStateDesc::default();
    renderer.set_depth_stencil_state(Arc::new(DepthStencilState::new(base)));

    driver.clear_transition_log();
    let mut changed = base;
    changed.front.reference = 7;
    renderer.set_depth_stencil_state(Arc::new(DepthStencilState::new(changed)));

    assert_eq!(driver.transition_log(), vec!["stencil.front.func"]);
}

#[test]
fn first_rasterizer_activation_emits_five_transitions() {
    let (driver, mut renderer) = setup();
    driver.clear_transition_log();

    renderer.set_rasterizer_state(Arc::new(RasterizerState::new(
        RasterizerStateDesc::default(),
    )));

    // Polygon mode is consumed at draw time and never reaches the driver.
    assert_eq!(driver.transition_count(), 5);
    assert!(!driver
        .transition_log()
        .iter()
        .any(|label| label.contains("polygon_mode")));
}

#[test]
fn polygon_offset_fields_change_as_one_unit() {
    let (driver, mut renderer) = setup();
    let base = RasterizerStateDesc::default();
    renderer.set_rasterizer_state(Arc::new(RasterizerState::new(base)));

    driver.clear_transition_log();
    let mut biased = base;
    biased.polygon_offset_enabled = true;
    biased.polygon_offset_factor = 1.5;
    biased.polygon_offset_units = 4.0;
    renderer.set_rasterizer_state(Arc::new(RasterizerState::new(biased)));

    assert_eq!(driver.transition_log(), vec!["raster.polygon_offset"]);
}

#[test]
fn sampler_pool_deduplicates_by_descriptor() {
    let (_driver, mut renderer) = setup();
    let desc = SamplerStateDesc::default();

    let first = renderer.sampler_state(desc);
    let second = renderer.sampler_state(desc);
    assert!(Arc::ptr_eq(&first, &second));

    let mut nearest = desc;
    nearest.min_filter = lumen_core::renderer::FilterMode::Nearest;
    let third = renderer.sampler_state(nearest);
    assert!(!Arc::ptr_eq(&first, &third));
}

#[test]
fn alpha_write_is_forced_on_without_independent_masking() {
    let _ = env_logger::builder().is_test(true).try_init();
    let driver = Arc::new(SoftDriver::with_capabilities(false));
    let mut renderer = Renderer::new(driver.clone(), RendererSettings::default());

    let mut desc = BlendStateDesc::default();
    desc.write_mask = ColorWrites::COLOR;
    renderer.set_blend_state(Arc::new(BlendState::new(desc)));

    assert!(driver.fixed_state().color_write_mask.contains(ColorWrites::ALPHA));
}

#[test]
fn alpha_write_mask_is_honored_with_independent_masking() {
    let (driver, mut renderer) = setup();

    let mut desc = BlendStateDesc::default();
    desc.write_mask = ColorWrites::COLOR;
    renderer.set_blend_state(Arc::new(BlendState::new(desc)));

    assert!(!driver.fixed_state().color_write_mask.contains(ColorWrites::ALPHA));
}
