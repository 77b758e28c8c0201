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

use crate::renderer::command::CommandStream;
use crate::renderer::draw::{DrawSettings, FilterSettings};
use crate::renderer::error::RenderError;
use crate::renderer::params::ShaderParameters;
use crate::renderer::view::Viewpoint;
use crate::renderer::visible_set::VisibleSet;

/// The execution context a frame is rendered into.
///
/// Calls are queued until [`submit`](Self::submit) flushes them to the
/// device. Every method can fail with a [`RenderError`], which the frame
/// loop treats as fatal.
pub trait RenderContext {
    /// Binds the viewpoint's view/projection matrices and viewport to the output target.
    fn bind_viewpoint(&mut self, viewpoint: &Viewpoint) -> Result<(), RenderError>;

    /// Queues the commands currently recorded in `stream`.
    ///
    /// The stream is borrowed; the caller keeps ownership and may clear and
    /// reuse it afterwards.
    fn execute_commands(&mut self, stream: &CommandStream) -> Result<(), RenderError>;

    /// Draws the renderers of `visible_set` that pass `filter`, ordered as
    /// `draw` requests, with `params` bound as shader parameters.
    fn draw_renderers(
        &mut self,
        visible_set: &VisibleSet,
        draw: &DrawSettings,
        filter: &FilterSettings,
        params: &ShaderParameters,
    ) -> Result<(), RenderError>;

    /// Draws the full-screen background (sky) for `viewpoint`.
    fn draw_background(&mut self, viewpoint: &Viewpoint) -> Result<(), RenderError>;

    /// Flushes everything queued so far.
    fn submit(&mut self) -> Result<(), RenderError>;
}
