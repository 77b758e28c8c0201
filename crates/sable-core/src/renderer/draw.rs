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

//! Draw settings: which shader pass, which queues, and in which order.

use super::visible_set::{RenderQueueRange, VisibleRenderer, VisibleSet};
use crate::math::Vec3;
use crate::sable_bitflags;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Size, in world units, of one depth bucket used by
/// [`SortFlags::QUANTIZED_FRONT_TO_BACK`].
pub const DEPTH_BUCKET_SIZE: f32 = 8.0;

/// The name of the shader pass a draw selects in each material.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderPassName(pub Cow<'static, str>);

impl ShaderPassName {
    /// The single pass used by the basic forward renderer.
    pub const BASIC: Self = Self(Cow::Borrowed("BasicPass"));

    /// Creates a pass name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The pass name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

sable_bitflags! {
    /// Criteria used to order renderers before drawing. Applied in the
    /// order the constants are declared.
    pub struct SortFlags: u32 {
        /// Lower render queues first.
        const RENDER_QUEUE = 1 << 0;
        /// Coarse front-to-back order (depth buckets), to help early depth rejection.
        const QUANTIZED_FRONT_TO_BACK = 1 << 1;
        /// Group renderers sharing a material key, to minimize state changes.
        const OPTIMIZE_STATE_CHANGES = 1 << 2;
        /// Typical ordering for opaque geometry.
        const COMMON_OPAQUE = (1 << 0) | (1 << 1) | (1 << 2);
    }
}

/// Selects the shader pass and ordering of a `draw_renderers` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSettings {
    /// The shader pass to render with.
    pub pass: ShaderPassName,
    /// The order to draw in.
    pub sorting: SortFlags,
}

impl DrawSettings {
    /// Creates draw settings for `pass` with the given ordering.
    pub fn new(pass: ShaderPassName, sorting: SortFlags) -> Self {
        Self { pass, sorting }
    }

    /// Sorts `renderers` in place as seen from `camera_position`.
    ///
    /// The sort is stable, so renderers that compare equal keep their
    /// culling order.
    pub fn sort(&self, renderers: &mut [VisibleRenderer], camera_position: Vec3) {
        let flags = self.sorting;
        if flags.is_empty() {
            return;
        }
        renderers.sort_by(|a, b| {
            let da = a.bounds_center.distance(camera_position);
            let db = b.bounds_center.distance(camera_position);
            let mut order = Ordering::Equal;
            if flags.contains(SortFlags::RENDER_QUEUE) {
                order = order.then(a.render_queue.cmp(&b.render_queue));
            }
            if flags.contains(SortFlags::QUANTIZED_FRONT_TO_BACK) {
                order = order.then(depth_bucket(da).cmp(&depth_bucket(db)));
            }
            if flags.contains(SortFlags::OPTIMIZE_STATE_CHANGES) {
                order = order.then(a.material_key.cmp(&b.material_key));
            }
            if flags.contains(SortFlags::QUANTIZED_FRONT_TO_BACK) {
                order = order.then(da.total_cmp(&db));
            }
            order
        });
    }
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self::new(ShaderPassName::BASIC, SortFlags::COMMON_OPAQUE)
    }
}

/// Restricts a `draw_renderers` call to a subset of the visible renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    /// Only renderers whose queue lies in this range are drawn.
    pub queue_range: RenderQueueRange,
}

impl FilterSettings {
    /// Keeps only the opaque queues.
    pub const OPAQUE: Self = Self {
        queue_range: RenderQueueRange::OPAQUE,
    };
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self::OPAQUE
    }
}

/// Builds the ordered list of renderers a draw call should submit.
pub fn build_draw_list(
    visible_set: &VisibleSet,
    draw: &DrawSettings,
    filter: &FilterSettings,
    camera_position: Vec3,
) -> Vec<VisibleRenderer> {
    let mut list: Vec<VisibleRenderer> = visible_set
        .renderers_in(filter.queue_range)
        .copied()
        .collect();
    draw.sort(&mut list, camera_position);
    list
}

fn depth_bucket(distance: f32) -> u32 {
    (distance.max(0.0) / DEPTH_BUCKET_SIZE) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::visible_set::{render_queue, RenderableHandle};

    fn renderer(id: u64, queue: u32, material: u32, z: f32) -> VisibleRenderer {
        VisibleRenderer {
            handle: RenderableHandle(id),
            render_queue: queue,
            material_key: material,
            bounds_center: Vec3::new(0.0, 0.0, z),
        }
    }

    fn ids(list: &[VisibleRenderer]) -> Vec<u64> {
        list.iter().map(|r| r.handle.0).collect()
    }

    #[test]
    fn test_basic_pass_name() {
        assert_eq!(ShaderPassName::BASIC.as_str(), "BasicPass");
        assert_eq!(ShaderPassName::new("BasicPass"), ShaderPassName::BASIC);
    }

    #[test]
    fn test_common_opaque_composition() {
        let flags = SortFlags::COMMON_OPAQUE;
        assert!(flags.contains(SortFlags::RENDER_QUEUE));
        assert!(flags.contains(SortFlags::QUANTIZED_FRONT_TO_BACK));
        assert!(flags.contains(SortFlags::OPTIMIZE_STATE_CHANGES));
        assert_eq!(
            format!("{:?}", flags),
            "SortFlags { RENDER_QUEUE | QUANTIZED_FRONT_TO_BACK | OPTIMIZE_STATE_CHANGES }"
        );
    }

    #[test]
    fn test_opaque_sort_is_front_to_back() {
        let mut list = vec![
            renderer(1, render_queue::GEOMETRY, 0, -90.0),
            renderer(2, render_queue::GEOMETRY, 0, -5.0),
            renderer(3, render_queue::GEOMETRY, 0, -40.0),
        ];
        DrawSettings::default().sort(&mut list, Vec3::ZERO);
        assert_eq!(ids(&list), vec![2, 3, 1]);
    }

    #[test]
    fn test_opaque_sort_groups_materials_within_depth_bucket() {
        let mut list = vec![
            renderer(1, render_queue::GEOMETRY, 7, -1.0),
            renderer(2, render_queue::GEOMETRY, 3, -2.0),
            renderer(3, render_queue::GEOMETRY, 7, -3.0),
        ];
        DrawSettings::default().sort(&mut list, Vec3::ZERO);
        assert_eq!(ids(&list), vec![2, 1, 3]);
    }

    #[test]
    fn test_render_queue_dominates_depth() {
        let mut list = vec![
            renderer(1, render_queue::ALPHA_TEST, 0, -1.0),
            renderer(2, render_queue::GEOMETRY, 0, -100.0),
        ];
        DrawSettings::default().sort(&mut list, Vec3::ZERO);
        assert_eq!(ids(&list), vec![2, 1]);
    }

    #[test]
    fn test_empty_flags_keep_culling_order() {
        let mut list = vec![
            renderer(1, render_queue::GEOMETRY, 0, -50.0),
            renderer(2, render_queue::GEOMETRY, 0, -1.0),
        ];
        DrawSettings::new(ShaderPassName::BASIC, SortFlags::EMPTY).sort(&mut list, Vec3::ZERO);
        assert_eq!(ids(&list), vec![1, 2]);
    }

    #[test]
    fn test_build_draw_list_filters_and_sorts() {
        let set = VisibleSet {
            renderers: vec![
                renderer(1, render_queue::TRANSPARENT, 0, -1.0),
                renderer(2, render_queue::GEOMETRY, 0, -30.0),
                renderer(3, render_queue::GEOMETRY, 0, -2.0),
            ],
            lights: Vec::new(),
        };
        let list = build_draw_list(
            &set,
            &DrawSettings::default(),
            &FilterSettings::OPAQUE,
            Vec3::ZERO,
        );
        assert_eq!(ids(&list), vec![3, 2]);
    }
}
