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

//! A headless `RenderContext` that records every call it receives.

use sable_core::{
    math::{LinearRgba, Vec3},
    renderer::{
        build_draw_list, CommandStream, CommandStreamId, DrawSettings, FilterSettings,
        RenderCommand, RenderContext, RenderError, RenderableHandle, ShaderParameters,
        ShaderPassName, Viewpoint, Viewport, VisibleSet,
    },
};

/// One call received by a [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContextEvent {
    /// A viewpoint was bound to the output target.
    BindViewpoint {
        /// The viewpoint's name.
        label: String,
        /// The output rectangle.
        viewport: Viewport,
    },
    /// A command stream was executed.
    ExecuteCommands {
        /// The executed stream.
        stream: CommandStreamId,
        /// A copy of the stream's commands at execution time.
        commands: Vec<RenderCommand>,
    },
    /// Renderers were drawn.
    DrawRenderers {
        /// The selected shader pass.
        pass: ShaderPassName,
        /// The renderers actually drawn, after filtering, in draw order.
        drawn: Vec<RenderableHandle>,
        /// A copy of the parameters bound for the draw.
        params: ShaderParameters,
        /// The parameters packed as the uniform buffer a device would receive.
        uniforms: Vec<u8>,
    },
    /// The background was drawn.
    DrawBackground {
        /// The viewpoint's name.
        label: String,
    },
    /// The accumulated work was flushed.
    Submit {
        /// The submitted frame number, starting at 1.
        frame: u64,
    },
}

/// The state of the render target as seen by the headless device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetState {
    /// The last color written by a clear, if any.
    pub color: Option<LinearRgba>,
    /// The last depth written by a clear, if any.
    pub depth: Option<f32>,
}

/// A [`RenderContext`] with no device behind it.
///
/// Calls are validated the way a real backend would (nothing can be
/// executed or drawn before a viewpoint is bound) and appended to an event
/// log. Draws are filtered and sorted like a real backend would, so the log
/// shows the renderers in the order they would reach the GPU.
#[derive(Debug, Default)]
pub struct RecordingContext {
    events: Vec<ContextEvent>,
    bound_camera: Option<Vec3>,
    target: TargetState,
    submitted_frames: u64,
    draw_calls: u64,
    fail_on_submit: bool,
}

impl RecordingContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `submit` fail with [`RenderError::SubmissionFailed`].
    pub fn set_fail_on_submit(&mut self, fail: bool) {
        self.fail_on_submit = fail;
    }

    /// The recorded events, oldest first.
    pub fn events(&self) -> &[ContextEvent] {
        &self.events
    }

    /// Removes and returns the recorded events.
    pub fn take_events(&mut self) -> Vec<ContextEvent> {
        std::mem::take(&mut self.events)
    }

    /// The number of successful submissions.
    pub fn submitted_frames(&self) -> u64 {
        self.submitted_frames
    }

    /// The number of draws (renderers and background) received.
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    /// The render target state left by the last executed clear.
    pub fn target(&self) -> TargetState {
        self.target
    }

    fn require_bound(&self, operation: &str) -> Result<Vec3, String> {
        self.bound_camera
            .ok_or_else(|| format!("{operation} without a bound viewpoint"))
    }
}

impl RenderContext for RecordingContext {
    fn bind_viewpoint(&mut self, viewpoint: &Viewpoint) -> Result<(), RenderError> {
        if viewpoint.viewport.aspect_ratio().is_none() {
            return Err(RenderError::BindFailed(format!(
                "viewpoint '{}' has an empty viewport",
                viewpoint.name()
            )));
        }
        self.bound_camera = Some(viewpoint.position());
        self.events.push(ContextEvent::BindViewpoint {
            label: viewpoint.name().to_string(),
            viewport: viewpoint.viewport,
        });
        Ok(())
    }

    fn execute_commands(&mut self, stream: &CommandStream) -> Result<(), RenderError> {
        self.require_bound("execute_commands")
            .map_err(RenderError::ExecutionFailed)?;
        for command in stream.commands() {
            match *command {
                RenderCommand::ClearRenderTarget {
                    clear_depth,
                    clear_color,
                    color,
                    depth,
                } => {
                    if clear_color {
                        self.target.color = Some(color);
                    }
                    if clear_depth {
                        self.target.depth = Some(depth);
                    }
                }
            }
        }
        self.events.push(ContextEvent::ExecuteCommands {
            stream: stream.id(),
            commands: stream.commands().to_vec(),
        });
        Ok(())
    }

    fn draw_renderers(
        &mut self,
        visible_set: &VisibleSet,
        draw_settings: &DrawSettings,
        filter_settings: &FilterSettings,
        params: &ShaderParameters,
    ) -> Result<(), RenderError> {
        let camera = self
            .require_bound("draw_renderers")
            .map_err(RenderError::DrawFailed)?;
        let drawn: Vec<RenderableHandle> =
            build_draw_list(visible_set, draw_settings, filter_settings, camera)
                .iter()
                .map(|r| r.handle)
                .collect();
        log::trace!(
            "Headless draw '{}': {} renderer(s)",
            draw_settings.pass.as_str(),
            drawn.len()
        );
        self.draw_calls += 1;
        self.events.push(ContextEvent::DrawRenderers {
            pass: draw_settings.pass.clone(),
            drawn,
            params: params.clone(),
            uniforms: params.to_uniform_bytes(),
        });
        Ok(())
    }

    fn draw_background(&mut self, viewpoint: &Viewpoint) -> Result<(), RenderError> {
        self.require_bound("draw_background")
            .map_err(RenderError::DrawFailed)?;
        self.draw_calls += 1;
        self.events.push(ContextEvent::DrawBackground {
            label: viewpoint.name().to_string(),
        });
        Ok(())
    }

    fn submit(&mut self) -> Result<(), RenderError> {
        if self.fail_on_submit {
            log::error!("Headless submission failed (injected)");
            return Err(RenderError::SubmissionFailed(
                "injected failure".to_string(),
            ));
        }
        self.submitted_frames += 1;
        self.bound_camera = None;
        self.events.push(ContextEvent::Submit {
            frame: self.submitted_frames,
        });
        Ok(())
    }
}
