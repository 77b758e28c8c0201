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

//! Defines the column-major `Mat4` type.

use super::{Vec3, Vec4, EPSILON};
use std::ops::Mul;

/// A 4x4 column-major matrix, used for transforms, view and projection.
///
/// The layout matches what modern graphics APIs expect. For an affine
/// transform, columns 0..=2 are the local X (right), Y (up) and Z axes
/// expressed in the parent space, and column 3 is the translation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns a column of the matrix.
    ///
    /// # Panics
    /// Panics if `index` is greater than 3.
    #[inline]
    pub fn get_column(&self, index: usize) -> Vec4 {
        self.cols[index]
    }

    /// Returns a row of the matrix.
    ///
    /// # Panics
    /// Panics if `index` is greater than 3.
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
            self.cols[3][index],
        )
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::from_vec3(v, 1.0))
    }

    /// Creates a matrix for a rotation around the X-axis.
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::X,
            Vec4::new(0.0, c, s, 0.0),
            Vec4::new(0.0, -s, c, 0.0),
            Vec4::W,
        )
    }

    /// Creates a matrix for a right-handed rotation around the Y-axis.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::new(c, 0.0, -s, 0.0),
            Vec4::Y,
            Vec4::new(s, 0.0, c, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed perspective projection matrix with a [0, 1] depth range.
    ///
    /// The caller is responsible for passing sane parameters
    /// (`0 < fov_y_radians < PI`, `0 < z_near < z_far`, `aspect_ratio > 0`).
    #[inline]
    pub fn perspective_rh_zo(fov_y_radians: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        let f = 1.0 / (fov_y_radians * 0.5).tan();
        let range = z_near - z_far;
        Self::from_cols(
            Vec4::new(f / aspect_ratio, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, z_far / range, -1.0),
            Vec4::new(0.0, 0.0, (z_near * z_far) / range, 0.0),
        )
    }

    /// Creates a right-handed orthographic projection matrix with a [0, 1] depth range.
    #[inline]
    pub fn orthographic_rh_zo(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let rml = right - left;
        let tmb = top - bottom;
        let fmn = z_far - z_near;
        Self::from_cols(
            Vec4::new(2.0 / rml, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 / tmb, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -1.0 / fmn, 0.0),
            Vec4::new(-(right + left) / rml, -(top + bottom) / tmb, -z_near / fmn, 1.0),
        )
    }

    /// Creates a camera-to-world transform placed at `eye` and looking at `target`.
    ///
    /// The camera looks down its local `-Z` axis (right-handed convention).
    /// Returns `None` if `eye` and `target` coincide or `up` is parallel to
    /// the view direction.
    pub fn look_at_rh_inverse(eye: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        let forward = target - eye;
        if forward.length_squared() < EPSILON * EPSILON {
            return None;
        }
        let f = forward.normalize();
        let s = f.cross(up);
        if s.length_squared() < EPSILON * EPSILON {
            return None;
        }
        let s = s.normalize();
        let u = s.cross(f);
        Some(Self::from_cols(
            Vec4::from_vec3(s, 0.0),
            Vec4::from_vec3(u, 0.0),
            Vec4::from_vec3(-f, 0.0),
            Vec4::from_vec3(eye, 1.0),
        ))
    }

    /// Transforms a point (`w = 1`) and performs the perspective divide when needed.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let v = *self * Vec4::from_vec3(point, 1.0);
        if v.w.abs() > EPSILON && (v.w - 1.0).abs() > EPSILON {
            v.truncate() / v.w
        } else {
            v.truncate()
        }
    }

    /// Returns `true` if no element is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.cols
            .iter()
            .all(|c| c.x.is_finite() && c.y.is_finite() && c.z.is_finite() && c.w.is_finite())
    }

    /// Computes the inverse of an affine transform (rotation, scale, translation).
    ///
    /// Returns `None` if the upper 3x3 part is singular or any element is
    /// NaN or infinite.
    pub fn affine_inverse(&self) -> Option<Self> {
        if !self.is_finite() {
            return None;
        }
        let c0 = self.cols[0].truncate();
        let c1 = self.cols[1].truncate();
        let c2 = self.cols[2].truncate();
        let t = self.cols[3].truncate();

        let r0 = c1.cross(c2);
        let r1 = c2.cross(c0);
        let r2 = c0.cross(c1);
        let det = c0.dot(r0);
        if !det.is_finite() || det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        // Rows of the inverse 3x3 are the scaled cofactor vectors.
        let r0 = r0 * inv_det;
        let r1 = r1 * inv_det;
        let r2 = r2 * inv_det;

        Some(Self::from_cols(
            Vec4::new(r0.x, r1.x, r2.x, 0.0),
            Vec4::new(r0.y, r1.y, r2.y, 0.0),
            Vec4::new(r0.z, r1.z, r2.z, 0.0),
            Vec4::new(-r0.dot(t), -r1.dot(t), -r2.dot(t), 1.0),
        ))
    }
}

impl Default for Mat4 {
    /// Returns the identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        Self::from_cols(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}
