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

//! Sampler state object.

use crate::renderer::api::{AddressMode, FilterMode, MipFilter, TextureAxis};
use crate::renderer::traits::GraphicsDriver;

/// Describes how a texture is filtered and addressed when sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerStateDesc {
    /// Minification filter.
    pub min_filter: FilterMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
    /// Mipmap selection filter.
    pub mip_filter: MipFilter,
    /// Wrap mode along u.
    pub address_u: AddressMode,
    /// Wrap mode along v.
    pub address_v: AddressMode,
    /// Wrap mode along w.
    pub address_w: AddressMode,
}

impl Default for SamplerStateDesc {
    fn default() -> Self {
        Self {
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            mip_filter: MipFilter::None,
            address_u: AddressMode::Repeat,
            address_v: AddressMode::Repeat,
            address_w: AddressMode::Repeat,
        }
    }
}

/// An immutable sampler state that can be activated on a driver.
///
/// Activation applies to whichever texture is bound on the active slot at
/// the time of the call.
#[derive(Debug)]
pub struct SamplerState {
    desc: SamplerStateDesc,
}

impl SamplerState {
    /// Creates a sampler state from a descriptor.
    pub fn new(desc: SamplerStateDesc) -> Self {
        Self { desc }
    }

    /// The descriptor this state was created from.
    pub fn desc(&self) -> &SamplerStateDesc {
        &self.desc
    }

    /// Applies this state, diffing against the previously active descriptor.
    pub fn activate(&self, driver: &dyn GraphicsDriver, previous: Option<&SamplerStateDesc>) {
        let d = &self.desc;

        if previous.map_or(true, |p| (p.min_filter, p.mip_filter) != (d.min_filter, d.mip_filter))
        {
            driver.set_texture_min_filter(d.min_filter, d.mip_filter);
        }
        if previous.map_or(true, |p| p.mag_filter != d.mag_filter) {
            driver.set_texture_mag_filter(d.mag_filter);
        }
        if previous.map_or(true, |p| p.address_u != d.address_u) {
            driver.set_texture_wrap(TextureAxis::U, d.address_u);
        }
        if previous.map_or(true, |p| p.address_v != d.address_v) {
            driver.set_texture_wrap(TextureAxis::V, d.address_v);
        }
        if previous.map_or(true, |p| p.address_w != d.address_w) {
            driver.set_texture_wrap(TextureAxis::W, d.address_w);
        }
    }
}
