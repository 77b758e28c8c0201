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

//! Drives the forward renderer end to end through the frustum culler and the
//! recording context.

use approx::assert_relative_eq;
use sable_core::{
    math::{Aabb, LinearRgba, Mat4, Vec3, Vec4},
    renderer::{
        params, render_queue, RenderCommand, RenderError, RenderableHandle, Viewpoint, Viewport,
        VisibleLight,
    },
};
use sable_infra::{ContextEvent, FrustumCuller, RecordingContext, Scene};
use sable_lanes::{BasicPipelineAsset, ForwardFrameRenderer};

fn unit_box(center: Vec3) -> Aabb {
    Aabb::from_center_half_extents(center, Vec3::ONE * 0.5)
}

/// Three opaque boxes in front of the default camera, one transparent box,
/// one box behind the camera, and a sun pointing along +Z.
fn demo_scene() -> (Scene, Vec<RenderableHandle>) {
    let mut scene = Scene::new();
    let opaque = vec![
        scene.add_object(unit_box(Vec3::new(0.0, 0.0, -30.0)), render_queue::GEOMETRY, 1),
        scene.add_object(unit_box(Vec3::new(1.0, 0.0, -5.0)), render_queue::GEOMETRY, 2),
        scene.add_object(unit_box(Vec3::new(-1.0, 0.0, -60.0)), render_queue::ALPHA_TEST, 1),
    ];
    scene.add_object(unit_box(Vec3::new(0.0, 1.0, -8.0)), render_queue::TRANSPARENT, 3);
    scene.add_object(unit_box(Vec3::new(0.0, 0.0, 20.0)), render_queue::GEOMETRY, 1);
    scene.add_light(VisibleLight::directional(LinearRgba::WHITE, Mat4::IDENTITY));
    (scene, opaque)
}

fn count(events: &[ContextEvent], pred: impl Fn(&ContextEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

#[test]
fn test_single_viewpoint_scenario() {
    let (scene, opaque) = demo_scene();
    let culler = FrustumCuller::new(scene);
    let mut ctx = RecordingContext::new();
    let mut renderer = ForwardFrameRenderer::new(LinearRgba::GREEN);

    let stats = renderer
        .render_frame(&mut ctx, &culler, &[Viewpoint::default().with_label("main")])
        .unwrap();

    let events = ctx.events();
    assert_eq!(events.len(), 5);
    assert!(matches!(&events[0], ContextEvent::BindViewpoint { label, .. } if label == "main"));
    assert!(matches!(
        &events[1],
        ContextEvent::ExecuteCommands { commands, .. }
            if commands == &vec![RenderCommand::ClearRenderTarget {
                clear_depth: true,
                clear_color: true,
                color: LinearRgba::BLACK,
                depth: 1.0,
            }]
    ));
    match &events[2] {
        ContextEvent::DrawRenderers {
            pass,
            drawn,
            params: shader_params,
            uniforms,
        } => {
            // Two vec4 parameters: light color and light direction.
            assert_eq!(uniforms.len(), 32);
            assert_eq!(pass.as_str(), "BasicPass");
            // Geometry before alpha test, then near to far.
            assert_eq!(drawn, &vec![opaque[1], opaque[0], opaque[2]]);
            let dir = shader_params.get_vector(params::LIGHT_DIRECTION).unwrap();
            assert_relative_eq!(dir.z, -1.0);
            assert_relative_eq!(dir.w, 0.0);
            assert_eq!(
                shader_params.get_vector(params::LIGHT_COLOR),
                Some(Vec4::new(1.0, 1.0, 1.0, 1.0))
            );
        }
        other => panic!("expected a draw, got {other:?}"),
    }
    assert!(matches!(&events[3], ContextEvent::DrawBackground { label } if label == "main"));
    assert_eq!(events[4], ContextEvent::Submit { frame: 1 });

    // The configured clear color never reaches the target.
    assert_eq!(ctx.target().color, Some(LinearRgba::BLACK));
    assert_eq!(stats.light_pushes, 1);
    assert_eq!(ctx.draw_calls(), 2);
}

#[test]
fn test_degenerate_viewpoint_is_skipped() {
    let (scene, _) = demo_scene();
    let culler = FrustumCuller::new(scene);
    let mut ctx = RecordingContext::new();
    let mut renderer = ForwardFrameRenderer::default();

    let mut broken = Viewpoint::default().with_label("broken");
    broken.z_far = 0.0;
    let viewpoints = [broken, Viewpoint::default().with_label("ok")];

    let stats = renderer.render_frame(&mut ctx, &culler, &viewpoints).unwrap();

    assert_eq!(stats.viewpoints_skipped, 1);
    assert_eq!(stats.viewpoints_rendered, 1);
    let events = ctx.events();
    assert_eq!(count(events, |e| matches!(e, ContextEvent::BindViewpoint { .. })), 1);
    assert!(matches!(&events[0], ContextEvent::BindViewpoint { label, .. } if label == "ok"));
    assert_eq!(ctx.submitted_frames(), 1);
}

#[test]
fn test_multiple_viewpoints_share_one_stream() {
    let (scene, _) = demo_scene();
    let culler = FrustumCuller::new(scene);
    let mut ctx = RecordingContext::new();
    let mut renderer = ForwardFrameRenderer::default();
    let side = Viewpoint::perspective(
        Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2),
        1.0,
        0.1,
        100.0,
        Viewport::from_size(640.0, 480.0),
    )
    .with_label("side");
    let viewpoints = [Viewpoint::default().with_label("main"), side];

    for _ in 0..2 {
        renderer.render_frame(&mut ctx, &culler, &viewpoints).unwrap();
    }

    let streams: Vec<_> = ctx
        .events()
        .iter()
        .filter_map(|e| match e {
            ContextEvent::ExecuteCommands { stream, .. } => Some(*stream),
            _ => None,
        })
        .collect();
    assert_eq!(streams.len(), 4);
    assert!(streams.iter().all(|s| *s == streams[0]));
    assert_eq!(ctx.submitted_frames(), 4);
}

#[test]
fn test_submit_failure_propagates() {
    let (scene, _) = demo_scene();
    let culler = FrustumCuller::new(scene);
    let mut ctx = RecordingContext::new();
    ctx.set_fail_on_submit(true);
    let mut renderer = BasicPipelineAsset::default().create_pipeline();

    let result = renderer.render_frame(
        &mut ctx,
        &culler,
        &[Viewpoint::default(), Viewpoint::default()],
    );

    assert!(matches!(result, Err(RenderError::SubmissionFailed(_))));
    assert_eq!(
        count(ctx.events(), |e| matches!(e, ContextEvent::BindViewpoint { .. })),
        1
    );
    assert_eq!(ctx.submitted_frames(), 0);
}

#[test]
fn test_no_visible_sun_keeps_parameters_empty() {
    let mut scene = Scene::new();
    scene.add_object(unit_box(Vec3::new(0.0, 0.0, -10.0)), render_queue::GEOMETRY, 0);
    scene.add_light(VisibleLight::point(LinearRgba::RED, Vec3::new(0.0, 0.0, 500.0), 2.0));
    let culler = FrustumCuller::new(scene);
    let mut ctx = RecordingContext::new();
    let mut renderer = ForwardFrameRenderer::default();

    let stats = renderer
        .render_frame(&mut ctx, &culler, &[Viewpoint::default()])
        .unwrap();

    assert_eq!(stats.light_pushes, 0);
    assert!(ctx.events().iter().any(|e| matches!(
        e,
        ContextEvent::DrawRenderers { params, drawn, .. } if params.is_empty() && drawn.len() == 1
    )));
}

#[test]
fn test_non_finite_viewpoint_is_skipped() {
    let (scene, _) = demo_scene();
    let culler = FrustumCuller::new(scene);
    let mut ctx = RecordingContext::new();
    let mut renderer = ForwardFrameRenderer::default();

    let mut wide = Viewpoint::default().with_label("wide");
    wide.viewport = Viewport::from_size(f32::INFINITY, 10.0);
    let lost = Viewpoint {
        camera_to_world: Mat4::from_translation(Vec3::new(f32::NAN, 0.0, 0.0)),
        ..Viewpoint::default()
    }
    .with_label("lost");

    let stats = renderer
        .render_frame(&mut ctx, &culler, &[wide, lost, Viewpoint::default().with_label("ok")])
        .unwrap();

    assert_eq!(stats.viewpoints_skipped, 2);
    assert_eq!(stats.viewpoints_rendered, 1);
    assert_eq!(
        count(ctx.events(), |e| matches!(e, ContextEvent::BindViewpoint { .. })),
        1
    );
}
