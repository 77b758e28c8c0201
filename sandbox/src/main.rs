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

//! Renders a small demo scene through the headless backend and logs what
//! reached the context.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use sable_core::{
    math::{Aabb, LinearRgba, Mat4, Vec3, FRAC_PI_4},
    renderer::{render_queue, Projection, Viewpoint, Viewport, VisibleLight},
};
use sable_infra::{ContextEvent, FrustumCuller, RecordingContext, Scene};
use sable_lanes::{BasicPipelineAsset, RenderPipeline};

#[derive(Parser, Debug)]
#[command(name = "sandbox", version, about = "Headless forward frame demo")]
struct Cli {
    /// Pipeline asset (RON). The built-in default is used when omitted.
    #[arg(long)]
    asset: Option<PathBuf>,

    /// Number of frames to render.
    #[arg(long, default_value_t = 3)]
    frames: u32,

    /// Make the headless context fail on submit.
    #[arg(long, default_value_t = false)]
    fail_submit: bool,
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();
    for i in 0..5 {
        let z = -5.0 - 10.0 * i as f32;
        scene.add_object(
            Aabb::from_center_half_extents(Vec3::new(i as f32 - 2.0, 0.0, z), Vec3::ONE),
            render_queue::GEOMETRY,
            i % 2,
        );
    }
    scene.add_object(
        Aabb::from_center_half_extents(Vec3::new(0.0, 2.0, -12.0), Vec3::ONE * 0.5),
        render_queue::TRANSPARENT,
        7,
    );
    scene.add_object(
        Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, 40.0), Vec3::ONE),
        render_queue::GEOMETRY,
        0,
    );
    scene.add_light(VisibleLight::point(
        LinearRgba::rgb(1.0, 0.6, 0.2),
        Vec3::new(0.0, 3.0, -10.0),
        8.0,
    ));
    scene.add_light(VisibleLight::directional(
        LinearRgba::WHITE,
        Mat4::from_rotation_x(-FRAC_PI_4),
    ));
    scene
}

fn build_viewpoints() -> Vec<Viewpoint> {
    let main = Viewpoint::default().with_label("main");
    let overhead = Mat4::look_at_rh_inverse(
        Vec3::new(0.0, 30.0, -20.0),
        Vec3::new(0.0, 0.0, -20.0),
        Vec3::new(0.0, 0.0, -1.0),
    )
    .map(|camera_to_world| {
        Viewpoint::orthographic(camera_to_world, 60.0, 0.1, 100.0, Viewport::from_size(512.0, 512.0))
            .with_label("overhead")
    });
    // A viewpoint that culling rejects, to show the skip path.
    let mut broken = Viewpoint::default().with_label("broken");
    broken.projection = Projection::Perspective { fov_y_radians: 0.0 };

    let mut viewpoints = vec![main];
    viewpoints.extend(overhead);
    viewpoints.push(broken);
    viewpoints
}

fn summarize(events: &[ContextEvent]) {
    for event in events {
        match event {
            ContextEvent::BindViewpoint { label, viewport } => {
                log::info!("  bind '{}' ({}x{})", label, viewport.width, viewport.height)
            }
            ContextEvent::ExecuteCommands { stream, commands } => {
                log::info!("  execute {:?}: {} command(s)", stream, commands.len())
            }
            ContextEvent::DrawRenderers {
                pass,
                drawn,
                params,
                uniforms,
            } => log::info!(
                "  draw '{}': {:?} with {} parameter(s), {} uniform byte(s)",
                pass.as_str(),
                drawn.iter().map(|h| h.0).collect::<Vec<_>>(),
                params.len(),
                uniforms.len()
            ),
            ContextEvent::DrawBackground { label } => log::info!("  background '{}'", label),
            ContextEvent::Submit { frame } => log::info!("  submit #{}", frame),
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let asset = match &cli.asset {
        Some(path) => BasicPipelineAsset::load(path)
            .with_context(|| format!("loading pipeline asset {}", path.display()))?,
        None => BasicPipelineAsset::default(),
    };
    log::info!("Configured clear color: {:?}", asset.clear_color);

    let culler = FrustumCuller::new(build_scene());
    let viewpoints = build_viewpoints();
    let mut ctx = RecordingContext::new();
    ctx.set_fail_on_submit(cli.fail_submit);

    let mut pipeline: Box<dyn RenderPipeline> = Box::new(asset.create_pipeline());
    log::info!("Rendering {} frame(s) with '{}'", cli.frames, pipeline.name());

    for _ in 0..cli.frames {
        let stats = pipeline
            .render_frame(&mut ctx, &culler, &viewpoints)
            .context("rendering frame")?;
        log::info!(
            "Frame {}: {}/{} viewpoint(s) rendered, {} light push(es), {} draw call(s)",
            stats.frame_number,
            stats.viewpoints_rendered,
            stats.viewpoints_requested(),
            stats.light_pushes,
            stats.draw_calls
        );
        summarize(&ctx.take_events());
    }

    pipeline.dispose();
    log::info!(
        "Done: {} submission(s), target cleared to {:?}",
        ctx.submitted_frames(),
        ctx.target().color
    );
    Ok(())
}
