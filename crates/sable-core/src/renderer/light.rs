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

//! Light data as seen by the frame loop after culling.

use crate::math::{LinearRgba, Mat4, Vec3, Vec4};

/// The kind of a light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightKind {
    /// An infinitely distant light with parallel rays (sun-like).
    #[default]
    Directional,
    /// An omni-directional light with distance falloff.
    Point,
    /// A cone-shaped light with distance and angular falloff.
    Spot,
}

/// A light that survived culling for a viewpoint.
///
/// The transform is the light's local-to-world matrix. A light shines along
/// its local `+Z` axis, so column 2 of `local_to_world` is its forward axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleLight {
    /// The kind of light.
    pub kind: LightKind,
    /// The final linear color, intensity already applied.
    pub final_color: LinearRgba,
    /// The light's local-to-world transform.
    pub local_to_world: Mat4,
    /// The range of influence in world units. Unused for directional lights.
    pub range: f32,
}

impl VisibleLight {
    /// Creates a directional light with the given color and transform.
    pub fn directional(final_color: LinearRgba, local_to_world: Mat4) -> Self {
        Self {
            kind: LightKind::Directional,
            final_color,
            local_to_world,
            range: f32::INFINITY,
        }
    }

    /// Creates a point light at `position`.
    pub fn point(final_color: LinearRgba, position: Vec3, range: f32) -> Self {
        Self {
            kind: LightKind::Point,
            final_color,
            local_to_world: Mat4::from_translation(position),
            range,
        }
    }

    /// Creates a spot light with the given transform.
    pub fn spot(final_color: LinearRgba, local_to_world: Mat4, range: f32) -> Self {
        Self {
            kind: LightKind::Spot,
            final_color,
            local_to_world,
            range,
        }
    }

    /// Returns `true` for directional lights.
    #[inline]
    pub fn is_directional(&self) -> bool {
        self.kind == LightKind::Directional
    }

    /// The light's forward axis in world space (column 2 of the transform).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.local_to_world.get_column(2).truncate()
    }

    /// The light's world position (column 3 of the transform).
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.local_to_world.get_column(3).truncate()
    }

    /// The shader-facing direction *towards* the light.
    ///
    /// This is the normalized negated forward axis with `w = 0`, which marks
    /// the vector as a direction rather than a position.
    pub fn shading_direction(&self) -> Vec4 {
        Vec4::from_vec3((-self.forward()).normalize(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, FRAC_PI_2};

    #[test]
    fn test_shading_direction_negates_forward_axis() {
        let light = VisibleLight::directional(LinearRgba::WHITE, Mat4::IDENTITY);
        assert_eq!(light.forward(), Vec3::Z);
        assert_eq!(light.shading_direction(), Vec4::new(0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn test_shading_direction_is_normalized() {
        let scaled = Mat4::from_cols(Vec4::X, Vec4::Y, Vec4::new(0.0, 3.0, 4.0, 0.0), Vec4::W);
        let light = VisibleLight::directional(LinearRgba::WHITE, scaled);
        let dir = light.shading_direction();
        assert!(approx_eq(dir.truncate().length(), 1.0));
        assert!(approx_eq(dir.y, -0.6));
        assert!(approx_eq(dir.z, -0.8));
        assert_eq!(dir.w, 0.0);
    }

    #[test]
    fn test_shading_direction_follows_rotation() {
        let light = VisibleLight::directional(LinearRgba::WHITE, Mat4::from_rotation_y(FRAC_PI_2));
        let dir = light.shading_direction();
        assert!(approx_eq(dir.x, -1.0));
        assert!(approx_eq(dir.z, 0.0));
    }

    #[test]
    fn test_constructors_set_kind() {
        assert!(VisibleLight::directional(LinearRgba::WHITE, Mat4::IDENTITY).is_directional());
        let point = VisibleLight::point(LinearRgba::RED, Vec3::new(1.0, 2.0, 3.0), 5.0);
        assert_eq!(point.kind, LightKind::Point);
        assert_eq!(point.position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(!point.is_directional());
        assert_eq!(
            VisibleLight::spot(LinearRgba::BLUE, Mat4::IDENTITY, 2.0).kind,
            LightKind::Spot
        );
    }
}
