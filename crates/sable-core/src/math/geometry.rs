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

//! Bounding volumes used for visibility tests.

use super::{Mat4, Vec3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// The corner with the smallest coordinates.
    pub min: Vec3,
    /// The corner with the largest coordinates.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two corners, sorting the components so `min <= max`.
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box from its center and half extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = Vec3::new(half_extents.x.abs(), half_extents.y.abs(), half_extents.z.abs());
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns the center of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half extents of the box.
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Returns the box enclosing this one after an affine transform.
    ///
    /// Projects the half extents onto the absolute value of the transformed
    /// axes instead of transforming all eight corners.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        let center = matrix.transform_point(self.center());
        let h = self.half_extents();
        let abs_col = |i: usize| {
            let c = matrix.cols[i];
            Vec3::new(c.x.abs(), c.y.abs(), c.z.abs())
        };
        let extents = abs_col(0) * h.x + abs_col(1) * h.y + abs_col(2) * h.z;
        Self::from_center_half_extents(center, extents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, FRAC_PI_4};

    #[test]
    fn test_from_min_max_sorts_corners() {
        let aabb = Aabb::from_min_max(Vec3::new(1.0, -1.0, 4.0), Vec3::new(-1.0, 1.0, 2.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, -1.0, 2.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 1.0, 4.0));
    }

    #[test]
    fn test_center_and_half_extents() {
        let aabb = Aabb::from_center_half_extents(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
        assert_eq!(aabb.center(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(aabb.half_extents(), Vec3::ONE);
    }

    #[test]
    fn test_transform_translation() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let moved = aabb.transform(&Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)));
        assert_eq!(moved.center(), Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(moved.half_extents(), Vec3::ONE);
    }

    #[test]
    fn test_transform_rotation_grows_box() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let rotated = aabb.transform(&Mat4::from_rotation_y(FRAC_PI_4));
        let expected = std::f32::consts::SQRT_2;
        assert!(approx_eq(rotated.half_extents().x, expected));
        assert!(approx_eq(rotated.half_extents().y, 1.0));
    }
}
