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

//! Implements the basic forward frame loop.
//!
//! The `ForwardFrameRenderer` draws every viewpoint it is handed in a single
//! pass: cull, bind, clear, push the main directional light, draw the opaque
//! queue, draw the background, and submit. A viewpoint whose culling fails is
//! skipped; any other failure aborts the frame.
//!
//! # Clear color
//!
//! The render target is always cleared to opaque black. The configured clear
//! color is stored and exposed through [`ForwardFrameRenderer::clear_color`]
//! but does not take part in the clear.

use super::{lighting, RenderPipeline};
use sable_core::{
    math::LinearRgba,
    renderer::{
        CommandStream, CommandStreamId, CullingService, DrawSettings, FilterSettings, FrameStats,
        RenderContext, RenderError, ShaderParameters, Viewpoint, VisibleSet,
    },
};

/// The color written to the render target at the start of every viewpoint.
pub const FIXED_CLEAR_COLOR: LinearRgba = LinearRgba::BLACK;
/// The depth written to the depth target at the start of every viewpoint.
pub const CLEAR_DEPTH: f32 = 1.0;

const COMMAND_STREAM_LABEL: &str = "Forward Frame Commands";

/// A single-pass forward renderer.
///
/// Owns one [`CommandStream`], allocated on the first rendered viewpoint and
/// reused (cleared, never recreated) for every viewpoint after that. The
/// stream is released by [`dispose`](Self::dispose) or when the renderer is
/// dropped, whichever comes first.
#[derive(Debug)]
pub struct ForwardFrameRenderer {
    clear_color: LinearRgba,
    draw_settings: DrawSettings,
    filter_settings: FilterSettings,
    command_stream: Option<CommandStream>,
    shader_params: ShaderParameters,
    frame_count: u64,
    disposed: bool,
}

impl ForwardFrameRenderer {
    /// Creates a renderer configured with `clear_color`.
    ///
    /// No resource is allocated here.
    pub fn new(clear_color: LinearRgba) -> Self {
        Self {
            clear_color,
            draw_settings: DrawSettings::default(),
            filter_settings: FilterSettings::OPAQUE,
            command_stream: None,
            shader_params: ShaderParameters::new(),
            frame_count: 0,
            disposed: false,
        }
    }

    /// The configured clear color.
    pub fn clear_color(&self) -> LinearRgba {
        self.clear_color
    }

    /// The shader parameters handed to the opaque draw.
    ///
    /// Values persist across viewpoints and frames until overwritten.
    pub fn shader_parameters(&self) -> &ShaderParameters {
        &self.shader_params
    }

    /// The id of the owned command stream, if it is currently allocated.
    pub fn command_stream_id(&self) -> Option<CommandStreamId> {
        self.command_stream.as_ref().map(CommandStream::id)
    }

    /// The number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Renders every viewpoint in `viewpoints`, in order.
    ///
    /// A viewpoint that `culler` rejects is logged and skipped. Errors from
    /// `ctx` abort the frame and are returned as-is.
    pub fn render_frame(
        &mut self,
        ctx: &mut dyn RenderContext,
        culler: &dyn CullingService,
        viewpoints: &[Viewpoint],
    ) -> Result<FrameStats, RenderError> {
        if self.disposed {
            log::warn!("ForwardFrameRenderer: render_frame called after dispose");
            return Err(RenderError::Disposed);
        }
        if viewpoints.is_empty() {
            return Ok(FrameStats::default());
        }

        self.frame_count += 1;
        let mut stats = FrameStats {
            frame_number: self.frame_count,
            ..Default::default()
        };

        for viewpoint in viewpoints {
            let visible_set = match culler.cull(viewpoint) {
                Ok(set) => set,
                Err(e) => {
                    log::warn!(
                        "Skipping viewpoint '{}': culling failed: {}",
                        viewpoint.name(),
                        e
                    );
                    stats.viewpoints_skipped += 1;
                    continue;
                }
            };
            self.render_viewpoint(ctx, viewpoint, &visible_set, &mut stats)?;
            stats.viewpoints_rendered += 1;
        }

        log::debug!(
            "Frame {}: {} viewpoint(s) rendered, {} skipped, {} draw call(s)",
            stats.frame_number,
            stats.viewpoints_rendered,
            stats.viewpoints_skipped,
            stats.draw_calls
        );
        Ok(stats)
    }

    /// Releases the command stream.
    ///
    /// Returns `true` if a stream was released by this call. Further calls
    /// are no-ops returning `false`.
    pub fn dispose(&mut self) -> bool {
        self.disposed = true;
        match self.command_stream.take() {
            Some(stream) => {
                stream.release();
                log::info!("ForwardFrameRenderer disposed");
                true
            }
            None => false,
        }
    }

    fn render_viewpoint(
        &mut self,
        ctx: &mut dyn RenderContext,
        viewpoint: &Viewpoint,
        visible_set: &VisibleSet,
        stats: &mut FrameStats,
    ) -> Result<(), RenderError> {
        log::trace!("Rendering viewpoint '{}'", viewpoint.name());
        ctx.bind_viewpoint(viewpoint)?;

        let stream = self
            .command_stream
            .get_or_insert_with(|| CommandStream::new(COMMAND_STREAM_LABEL));
        stream.clear();
        stream.clear_render_target(true, true, FIXED_CLEAR_COLOR, CLEAR_DEPTH);
        ctx.execute_commands(stream)?;

        if lighting::setup_directional_light(&visible_set.lights, &mut self.shader_params)
            .is_some()
        {
            stats.light_pushes += 1;
        }

        ctx.draw_renderers(
            visible_set,
            &self.draw_settings,
            &self.filter_settings,
            &self.shader_params,
        )?;
        ctx.draw_background(viewpoint)?;
        stats.draw_calls += 2;

        ctx.submit()?;
        log::trace!("Viewpoint '{}' submitted", viewpoint.name());
        Ok(())
    }
}

impl Default for ForwardFrameRenderer {
    fn default() -> Self {
        Self::new(LinearRgba::BLACK)
    }
}

impl RenderPipeline for ForwardFrameRenderer {
    fn name(&self) -> &'static str {
        "ForwardFrame"
    }

    fn render_frame(
        &mut self,
        ctx: &mut dyn RenderContext,
        culler: &dyn CullingService,
        viewpoints: &[Viewpoint],
    ) -> Result<FrameStats, RenderError> {
        ForwardFrameRenderer::render_frame(self, ctx, culler, viewpoints)
    }

    fn dispose(&mut self) -> bool {
        ForwardFrameRenderer::dispose(self)
    }
}

impl Drop for ForwardFrameRenderer {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::renderer::{CullingError, RenderCommand};

    #[derive(Default)]
    struct CountingContext {
        binds: usize,
        clears: Vec<RenderCommand>,
        stream_ids: Vec<CommandStreamId>,
        draws: usize,
        backgrounds: usize,
        submits: usize,
    }

    impl RenderContext for CountingContext {
        fn bind_viewpoint(&mut self, _viewpoint: &Viewpoint) -> Result<(), RenderError> {
            self.binds += 1;
            Ok(())
        }

        fn execute_commands(&mut self, stream: &CommandStream) -> Result<(), RenderError> {
            self.stream_ids.push(stream.id());
            self.clears.extend_from_slice(stream.commands());
            Ok(())
        }

        fn draw_renderers(
            &mut self,
            _visible_set: &VisibleSet,
            _draw_settings: &DrawSettings,
            _filter_settings: &FilterSettings,
            _params: &ShaderParameters,
        ) -> Result<(), RenderError> {
            self.draws += 1;
            Ok(())
        }

        fn draw_background(&mut self, _viewpoint: &Viewpoint) -> Result<(), RenderError> {
            self.backgrounds += 1;
            Ok(())
        }

        fn submit(&mut self) -> Result<(), RenderError> {
            self.submits += 1;
            Ok(())
        }
    }

    struct EmptyCuller;

    impl CullingService for EmptyCuller {
        fn cull(&self, _viewpoint: &Viewpoint) -> Result<VisibleSet, CullingError> {
            Ok(VisibleSet::default())
        }
    }

    #[test]
    fn test_new_allocates_nothing() {
        let renderer = ForwardFrameRenderer::new(LinearRgba::GREEN);
        assert_eq!(renderer.clear_color(), LinearRgba::GREEN);
        assert!(renderer.command_stream_id().is_none());
        assert_eq!(renderer.frame_count(), 0);
    }

    #[test]
    fn test_clear_ignores_configured_color() {
        let mut renderer = ForwardFrameRenderer::new(LinearRgba::GREEN);
        let mut ctx = CountingContext::default();
        renderer
            .render_frame(&mut ctx, &EmptyCuller, &[Viewpoint::default()])
            .unwrap();
        assert_eq!(
            ctx.clears,
            vec![RenderCommand::ClearRenderTarget {
                clear_depth: true,
                clear_color: true,
                color: LinearRgba::BLACK,
                depth: 1.0,
            }]
        );
    }

    #[test]
    fn test_stream_holds_one_clear_per_viewpoint() {
        let mut renderer = ForwardFrameRenderer::default();
        let mut ctx = CountingContext::default();
        let viewpoints = vec![Viewpoint::default(); 3];
        let stats = renderer
            .render_frame(&mut ctx, &EmptyCuller, &viewpoints)
            .unwrap();
        assert_eq!(ctx.clears.len(), 3);
        assert!(ctx.stream_ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(renderer.command_stream_id(), Some(ctx.stream_ids[0]));
        assert_eq!(ctx.binds, 3);
        assert_eq!(ctx.draws, 3);
        assert_eq!(ctx.backgrounds, 3);
        assert_eq!(ctx.submits, 3);
        assert_eq!(stats.viewpoints_rendered, 3);
        assert_eq!(stats.draw_calls, 6);
        assert_eq!(stats.light_pushes, 0);
    }

    #[test]
    fn test_frame_numbers_increase() {
        let mut renderer = ForwardFrameRenderer::default();
        let mut ctx = CountingContext::default();
        let vp = [Viewpoint::default()];
        let first = renderer.render_frame(&mut ctx, &EmptyCuller, &vp).unwrap();
        let second = renderer.render_frame(&mut ctx, &EmptyCuller, &vp).unwrap();
        assert_eq!(first.frame_number, 1);
        assert_eq!(second.frame_number, 2);
    }

    #[test]
    fn test_dispose_before_render_releases_nothing() {
        let mut renderer = ForwardFrameRenderer::default();
        assert!(!renderer.dispose());
        assert!(renderer.is_disposed());
        let mut ctx = CountingContext::default();
        let result = renderer.render_frame(&mut ctx, &EmptyCuller, &[Viewpoint::default()]);
        assert!(matches!(result, Err(RenderError::Disposed)));
        assert_eq!(ctx.binds, 0);
        assert!(renderer.command_stream_id().is_none());
    }

    #[test]
    fn test_trait_object_dispatch() {
        let mut pipeline: Box<dyn RenderPipeline> = Box::new(ForwardFrameRenderer::default());
        let mut ctx = CountingContext::default();
        assert_eq!(pipeline.name(), "ForwardFrame");
        pipeline
            .render_frame(&mut ctx, &EmptyCuller, &[Viewpoint::default()])
            .unwrap();
        assert!(pipeline.dispose());
        assert!(!pipeline.dispose());
    }
}
