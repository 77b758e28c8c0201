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

//! Defines the error types of the rendering subsystem.
//!
//! Two classes exist. A [`CullingError`] is recoverable: the frame loop skips
//! the offending viewpoint and moves on. A [`RenderError`] is fatal for the
//! frame and is propagated to the caller.

use thiserror::Error;

/// Culling parameters for a viewpoint could not be derived.
///
/// Returned by a [`CullingService`](crate::renderer::traits::CullingService)
/// when the viewpoint describes a degenerate frustum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CullingError {
    /// The viewport has no area.
    #[error("viewport has no area ({width}x{height})")]
    EmptyViewport {
        /// Viewport width in pixels.
        width: f32,
        /// Viewport height in pixels.
        height: f32,
    },
    /// The near/far clip planes do not bound a volume.
    #[error("invalid clip planes: near={near}, far={far}")]
    InvalidClipPlanes {
        /// Distance to the near plane.
        near: f32,
        /// Distance to the far plane.
        far: f32,
    },
    /// The projection parameters are out of range (field of view or ortho size).
    #[error("invalid projection: {0}")]
    InvalidProjection(String),
    /// The camera transform cannot be inverted into a view matrix.
    #[error("camera transform is not invertible")]
    DegenerateTransform,
}

/// A fatal error raised by the execution context or draw submission.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pipeline was used after its resources were released.
    #[error("the render pipeline has been disposed")]
    Disposed,
    /// Binding the viewpoint state to the output target failed.
    #[error("failed to bind viewpoint: {0}")]
    BindFailed(String),
    /// Executing a command stream failed.
    #[error("failed to execute command stream: {0}")]
    ExecutionFailed(String),
    /// Submitting a draw failed.
    #[error("draw submission failed: {0}")]
    DrawFailed(String),
    /// Flushing the queued work to the device failed.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),
    /// Culling failed and the caller chose to treat it as fatal.
    #[error("culling failed: {0}")]
    Culling(#[from] CullingError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn culling_error_display() {
        let err = CullingError::InvalidClipPlanes { near: 1.0, far: 0.5 };
        assert_eq!(format!("{err}"), "invalid clip planes: near=1, far=0.5");

        let err = CullingError::EmptyViewport {
            width: 0.0,
            height: 720.0,
        };
        assert_eq!(format!("{err}"), "viewport has no area (0x720)");
    }

    #[test]
    fn render_error_wraps_culling_error() {
        let render_err: RenderError = CullingError::DegenerateTransform.into();
        assert_eq!(
            format!("{render_err}"),
            "culling failed: camera transform is not invertible"
        );
        assert!(render_err.source().is_some());
    }

    #[test]
    fn render_error_display() {
        let err = RenderError::SubmissionFailed("device lost".to_string());
        assert_eq!(format!("{err}"), "submission failed: device lost");
        assert_eq!(
            format!("{}", RenderError::Disposed),
            "the render pipeline has been disposed"
        );
    }
}
