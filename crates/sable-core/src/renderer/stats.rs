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

//! Counters collected while rendering one frame.

/// Statistics for a single call to a pipeline's `render_frame`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// A sequential counter for rendered frames, starting at 1.
    pub frame_number: u64,
    /// Viewpoints that went through the full pass.
    pub viewpoints_rendered: u32,
    /// Viewpoints skipped because culling failed.
    pub viewpoints_skipped: u32,
    /// Directional light parameter pushes.
    pub light_pushes: u32,
    /// Draw submissions (opaque and background).
    pub draw_calls: u32,
}

impl FrameStats {
    /// The number of viewpoints the frame was asked to render.
    pub fn viewpoints_requested(&self) -> u32 {
        self.viewpoints_rendered + self.viewpoints_skipped
    }
}
