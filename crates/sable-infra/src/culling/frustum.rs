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

//! Frustum culling over an in-memory scene.

use sable_core::{
    math::{Aabb, Mat4, Vec3, Vec4, EPSILON, PI},
    renderer::{
        CullingError, CullingService, LightKind, Projection, RenderableHandle, Viewpoint,
        VisibleLight, VisibleRenderer, VisibleSet,
    },
};

/// The six planes bounding a view volume.
///
/// Each plane is stored as `(nx, ny, nz, d)` with a unit normal pointing
/// inwards, so a point `p` is inside the plane when `n·p + d >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extracts the planes of a world-to-clip matrix with `[0, 1]` depth
    /// (Gribb/Hartmann).
    pub fn from_view_projection(view_proj: &Mat4) -> Self {
        let r0 = view_proj.get_row(0);
        let r1 = view_proj.get_row(1);
        let r2 = view_proj.get_row(2);
        let r3 = view_proj.get_row(3);

        let planes = [
            r3 + r0, // left
            r3 - r0, // right
            r3 + r1, // bottom
            r3 - r1, // top
            r2,      // near
            r3 - r2, // far
        ]
        .map(normalize_plane);

        Self { planes }
    }

    /// The planes, in left, right, bottom, top, near, far order.
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    /// Returns `true` if the point lies inside or on the frustum.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| signed_distance(plane, point) >= 0.0)
    }

    /// Conservative box test: `false` only when the box lies entirely
    /// outside one of the planes.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|plane| {
            // The corner furthest along the plane normal.
            let positive = Vec3::new(
                if plane.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if plane.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if plane.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            signed_distance(plane, positive) >= 0.0
        })
    }

    /// Conservative sphere test.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| signed_distance(plane, center) >= -radius)
    }
}

fn normalize_plane(plane: Vec4) -> Vec4 {
    let length = plane.truncate().length();
    if length > EPSILON {
        plane * (1.0 / length)
    } else {
        plane
    }
}

#[inline]
fn signed_distance(plane: &Vec4, point: Vec3) -> f32 {
    plane.truncate().dot(point) + plane.w
}

/// A renderable object of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    /// The handle reported in visible sets.
    pub handle: RenderableHandle,
    /// World-space bounds.
    pub bounds: Aabb,
    /// The render queue the object's material draws in.
    pub render_queue: u32,
    /// Identifies the object's material, for state-change sorting.
    pub material_key: u32,
}

/// A light of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLight {
    /// The light as it is reported when visible.
    pub light: VisibleLight,
    /// Disabled lights are never reported.
    pub enabled: bool,
}

/// An in-memory collection of renderable objects and lights.
///
/// Insertion order is preserved and becomes the culling order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    lights: Vec<SceneLight>,
    next_handle: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and returns its handle.
    pub fn add_object(&mut self, bounds: Aabb, render_queue: u32, material_key: u32) -> RenderableHandle {
        self.next_handle += 1;
        let handle = RenderableHandle(self.next_handle);
        self.objects.push(SceneObject {
            handle,
            bounds,
            render_queue,
            material_key,
        });
        handle
    }

    /// Removes an object. Returns `false` if the handle is unknown.
    pub fn remove_object(&mut self, handle: RenderableHandle) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.handle != handle);
        self.objects.len() != before
    }

    /// Adds an enabled light and returns its index.
    pub fn add_light(&mut self, light: VisibleLight) -> usize {
        self.lights.push(SceneLight {
            light,
            enabled: true,
        });
        self.lights.len() - 1
    }

    /// Enables or disables the light at `index`. Returns `false` if out of range.
    pub fn set_light_enabled(&mut self, index: usize, enabled: bool) -> bool {
        match self.lights.get_mut(index) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// The objects, in insertion order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// The lights, in insertion order.
    pub fn lights(&self) -> &[SceneLight] {
        &self.lights
    }
}

/// A [`CullingService`] testing a [`Scene`] against the viewpoint frustum.
#[derive(Debug, Clone, Default)]
pub struct FrustumCuller {
    scene: Scene,
}

impl FrustumCuller {
    /// Creates a culler over `scene`.
    pub fn new(scene: Scene) -> Self {
        Self { scene }
    }

    /// The culled scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the culled scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Checks the viewpoint parameters and returns its world-to-clip matrix.
    pub fn validate(viewpoint: &Viewpoint) -> Result<Mat4, CullingError> {
        let viewport = &viewpoint.viewport;
        let has_area = viewport.width > 0.0 && viewport.height > 0.0;
        if !(has_area && viewport.width.is_finite() && viewport.height.is_finite()) {
            return Err(CullingError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let near_ok = match viewpoint.projection {
            Projection::Perspective { .. } => viewpoint.z_near > 0.0,
            Projection::Orthographic { .. } => viewpoint.z_near.is_finite(),
        };
        if !near_ok || !(viewpoint.z_far > viewpoint.z_near) || !viewpoint.z_far.is_finite() {
            return Err(CullingError::InvalidClipPlanes {
                near: viewpoint.z_near,
                far: viewpoint.z_far,
            });
        }

        match viewpoint.projection {
            Projection::Perspective { fov_y_radians } if !(fov_y_radians > 0.0 && fov_y_radians < PI) => {
                return Err(CullingError::InvalidProjection(format!(
                    "vertical field of view {fov_y_radians} rad is outside (0, π)"
                )));
            }
            Projection::Orthographic { height } if !(height > 0.0 && height.is_finite()) => {
                return Err(CullingError::InvalidProjection(format!(
                    "orthographic height {height} must be positive"
                )));
            }
            _ => {}
        }

        viewpoint
            .view_projection_matrix()
            .ok_or(CullingError::DegenerateTransform)
    }

    fn light_is_visible(frustum: &Frustum, light: &VisibleLight) -> bool {
        match light.kind {
            LightKind::Directional => true,
            LightKind::Point | LightKind::Spot => {
                frustum.intersects_sphere(light.position(), light.range)
            }
        }
    }
}

impl CullingService for FrustumCuller {
    fn cull(&self, viewpoint: &Viewpoint) -> Result<VisibleSet, CullingError> {
        let view_proj = Self::validate(viewpoint)?;
        let frustum = Frustum::from_view_projection(&view_proj);

        let renderers: Vec<VisibleRenderer> = self
            .scene
            .objects
            .iter()
            .filter(|object| frustum.intersects_aabb(&object.bounds))
            .map(|object| VisibleRenderer {
                handle: object.handle,
                render_queue: object.render_queue,
                material_key: object.material_key,
                bounds_center: object.bounds.center(),
            })
            .collect();

        let lights: Vec<VisibleLight> = self
            .scene
            .lights
            .iter()
            .filter(|entry| entry.enabled && Self::light_is_visible(&frustum, &entry.light))
            .map(|entry| entry.light)
            .collect();

        log::trace!(
            "Culled viewpoint '{}': {}/{} renderers, {}/{} lights",
            viewpoint.name(),
            renderers.len(),
            self.scene.objects.len(),
            lights.len(),
            self.scene.lights.len()
        );

        Ok(VisibleSet { renderers, lights })
    }
}
