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

//! Rendering lane - hot path for frame submission

use sable_core::renderer::{CullingService, FrameStats, RenderContext, RenderError, Viewpoint};

mod asset;
mod forward_frame_lane;
pub mod lighting;

pub use asset::*;
pub use forward_frame_lane::*;

/// A trait defining the behavior of a render pipeline.
///
/// A pipeline turns a list of viewpoints into submitted frames. It talks to
/// the outside world only through the collaborators it is handed, a
/// [`CullingService`] to compute what is visible and a [`RenderContext`] to
/// record and submit work, so it never depends on a concrete backend.
pub trait RenderPipeline: Send {
    /// Returns a human-readable identifier for this pipeline.
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &'static str;

    /// Renders one frame made of `viewpoints`, in order.
    ///
    /// # Arguments
    ///
    /// * `ctx`: The execution context receiving binds, commands and draws.
    /// * `culler`: Computes the visible set of each viewpoint.
    /// * `viewpoints`: The cameras to render from.
    ///
    /// # Returns
    ///
    /// Per-frame statistics, or the first fatal [`RenderError`].
    fn render_frame(
        &mut self,
        ctx: &mut dyn RenderContext,
        culler: &dyn CullingService,
        viewpoints: &[Viewpoint],
    ) -> Result<FrameStats, RenderError>;

    /// Releases the resources owned by the pipeline.
    ///
    /// Must be safe to call more than once. Returns `true` if anything was
    /// released by this call.
    fn dispose(&mut self) -> bool;
}
