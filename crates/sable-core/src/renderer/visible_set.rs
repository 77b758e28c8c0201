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

//! Defines the `VisibleSet`, the per-viewpoint result of culling.

use super::light::VisibleLight;
use crate::math::Vec3;

/// Well-known render queue values. Lower queues draw first.
pub mod render_queue {
    /// Backgrounds drawn before anything else.
    pub const BACKGROUND: u32 = 1000;
    /// Default queue for opaque geometry.
    pub const GEOMETRY: u32 = 2000;
    /// Alpha-tested geometry, still part of the opaque range.
    pub const ALPHA_TEST: u32 = 2450;
    /// Blended geometry, drawn back-to-front.
    pub const TRANSPARENT: u32 = 3000;
    /// Overlays drawn last.
    pub const OVERLAY: u32 = 4000;
}

/// An opaque handle to a renderable object owned by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderableHandle(pub u64);

/// An inclusive range of render queue values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderQueueRange {
    /// Lowest queue included.
    pub min: u32,
    /// Highest queue included.
    pub max: u32,
}

impl RenderQueueRange {
    /// Every queue.
    pub const ALL: Self = Self { min: 0, max: 5000 };
    /// The opaque queues (`0..=2500`).
    pub const OPAQUE: Self = Self { min: 0, max: 2500 };
    /// The transparent queues (`2501..=5000`).
    pub const TRANSPARENT: Self = Self {
        min: 2501,
        max: 5000,
    };

    /// Returns `true` if `queue` lies inside the range.
    #[inline]
    pub fn contains(&self, queue: u32) -> bool {
        (self.min..=self.max).contains(&queue)
    }
}

/// A renderable object that survived culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRenderer {
    /// The scene handle of the object.
    pub handle: RenderableHandle,
    /// The render queue the object's material belongs to.
    pub render_queue: u32,
    /// A key identifying the material/pipeline state, used to batch state changes.
    pub material_key: u32,
    /// The world-space center of the object's bounds, used for depth sorting.
    pub bounds_center: Vec3,
}

impl VisibleRenderer {
    /// Creates an opaque renderer in the geometry queue.
    pub fn opaque(handle: RenderableHandle, bounds_center: Vec3) -> Self {
        Self {
            handle,
            render_queue: render_queue::GEOMETRY,
            material_key: 0,
            bounds_center,
        }
    }
}

/// The renderables and lights visible from one viewpoint.
///
/// Produced fresh for every viewpoint of every frame and dropped at the end
/// of that viewpoint's work. Both sequences keep the order the culling
/// service produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleSet {
    /// Visible renderables, in culling order.
    pub renderers: Vec<VisibleRenderer>,
    /// Visible lights, in culling order.
    pub lights: Vec<VisibleLight>,
}

impl VisibleSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty() && self.lights.is_empty()
    }

    /// The first directional light, in light order.
    pub fn first_directional_light(&self) -> Option<&VisibleLight> {
        self.lights.iter().find(|light| light.is_directional())
    }

    /// Iterates over the renderers whose queue lies inside `range`.
    pub fn renderers_in(
        &self,
        range: RenderQueueRange,
    ) -> impl Iterator<Item = &VisibleRenderer> + '_ {
        self.renderers
            .iter()
            .filter(move |r| range.contains(r.render_queue))
    }
}
