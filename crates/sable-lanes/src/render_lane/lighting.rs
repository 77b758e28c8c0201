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

//! Main directional light selection and its shader parameters.

use sable_core::{
    math::Vec4,
    renderer::{params, ShaderParameters, VisibleLight},
};

/// The shader-facing values of the main directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLightParams {
    /// The light's final color.
    pub color: Vec4,
    /// The normalized direction towards the light, `w = 0`.
    pub direction: Vec4,
}

impl DirectionalLightParams {
    /// Derives the parameters from a visible light.
    pub fn from_light(light: &VisibleLight) -> Self {
        Self {
            color: light.final_color.to_vec4(),
            direction: light.shading_direction(),
        }
    }
}

/// Returns the parameters of the first directional light in `lights`.
///
/// Lights are scanned in order and the scan stops at the first match, so
/// later directional lights never contribute.
pub fn find_main_light(lights: &[VisibleLight]) -> Option<DirectionalLightParams> {
    lights
        .iter()
        .find(|light| light.is_directional())
        .map(DirectionalLightParams::from_light)
}

/// Pushes the main directional light into `params`.
///
/// Writes [`params::LIGHT_COLOR`] and [`params::LIGHT_DIRECTION`] and returns
/// what was pushed. When no directional light is visible nothing is written
/// and `params` keeps its previous values.
pub fn setup_directional_light(
    lights: &[VisibleLight],
    params: &mut ShaderParameters,
) -> Option<DirectionalLightParams> {
    let main_light = find_main_light(lights)?;
    params.set_global_vector(params::LIGHT_COLOR, main_light.color);
    params.set_global_vector(params::LIGHT_DIRECTION, main_light.direction);
    log::debug!(
        "Main light pushed: color={:?}, direction={:?}",
        main_light.color,
        main_light.direction
    );
    Some(main_light)
}
