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

//! Defines the `Viewpoint`, the camera a frame is rendered from.

use crate::math::{Mat4, Vec3};

/// A rectangle of the output target, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport anchored at the origin.
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Returns `width / height`, or `None` when the viewport has no area.
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.width > 0.0 && self.height > 0.0).then(|| self.width / self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_size(1280.0, 720.0)
    }
}

/// The projection model of a viewpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// The vertical field of view in radians.
        fov_y_radians: f32,
    },
    /// Orthographic projection.
    Orthographic {
        /// The height of the view volume in world units. The width follows the aspect ratio.
        height: f32,
    },
}

/// A camera-like frustum and transform used to render one image.
///
/// Owned by the caller and read-only to the renderer. The camera looks down
/// its local `-Z` axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewpoint {
    /// An optional name, used in logs.
    pub label: Option<String>,
    /// The camera's local-to-world transform.
    pub camera_to_world: Mat4,
    /// How the view volume is projected.
    pub projection: Projection,
    /// Distance to the near clipping plane.
    pub z_near: f32,
    /// Distance to the far clipping plane.
    pub z_far: f32,
    /// The output rectangle.
    pub viewport: Viewport,
}

impl Viewpoint {
    /// Creates a perspective viewpoint.
    pub fn perspective(
        camera_to_world: Mat4,
        fov_y_radians: f32,
        z_near: f32,
        z_far: f32,
        viewport: Viewport,
    ) -> Self {
        Self {
            label: None,
            camera_to_world,
            projection: Projection::Perspective { fov_y_radians },
            z_near,
            z_far,
            viewport,
        }
    }

    /// Creates an orthographic viewpoint.
    pub fn orthographic(
        camera_to_world: Mat4,
        height: f32,
        z_near: f32,
        z_far: f32,
        viewport: Viewport,
    ) -> Self {
        Self {
            label: None,
            camera_to_world,
            projection: Projection::Orthographic { height },
            z_near,
            z_far,
            viewport,
        }
    }

    /// Sets the label used in logs.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the label, or `"<unnamed>"`.
    pub fn name(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }

    /// The camera position in world space.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.camera_to_world.get_column(3).truncate()
    }

    /// The direction the camera looks at, in world space.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        (-self.camera_to_world.get_column(2).truncate()).normalize()
    }

    /// The world-to-view matrix, or `None` if the camera transform is singular.
    pub fn view_matrix(&self) -> Option<Mat4> {
        self.camera_to_world.affine_inverse()
    }

    /// The view-to-clip matrix (right-handed, [0, 1] depth).
    ///
    /// The caller should validate the parameters first; a viewport without
    /// area falls back to an aspect ratio of `1.0`.
    pub fn projection_matrix(&self) -> Mat4 {
        let aspect = self.viewport.aspect_ratio().unwrap_or(1.0);
        match self.projection {
            Projection::Perspective { fov_y_radians } => {
                Mat4::perspective_rh_zo(fov_y_radians, aspect, self.z_near, self.z_far)
            }
            Projection::Orthographic { height } => {
                let half_h = height * 0.5;
                let half_w = half_h * aspect;
                Mat4::orthographic_rh_zo(-half_w, half_w, -half_h, half_h, self.z_near, self.z_far)
            }
        }
    }

    /// The combined world-to-clip matrix.
    pub fn view_projection_matrix(&self) -> Option<Mat4> {
        self.view_matrix().map(|view| self.projection_matrix() * view)
    }
}

impl Default for Viewpoint {
    /// A 60° perspective camera at the origin looking down `-Z`.
    fn default() -> Self {
        Self::perspective(
            Mat4::IDENTITY,
            60.0_f32.to_radians(),
            0.1,
            1000.0,
            Viewport::default(),
        )
    }
}
