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

//! Provides the public, backend-agnostic contracts of the forward frame loop.
//!
//! This module defines the data that flows through a frame (viewpoints,
//! visible sets, lights, command streams, shader parameters, draw settings),
//! the error types, and the collaborator traits a backend implements.
//!
//! The frame loop itself lives in `sable-lanes`; reference implementations of
//! the collaborators live in `sable-infra`.

pub mod command;
pub mod draw;
pub mod error;
pub mod light;
pub mod params;
pub mod stats;
pub mod traits;
pub mod view;
pub mod visible_set;

// Re-export the most important traits and types for easier use.
pub use self::command::{CommandStream, CommandStreamId, RenderCommand};
pub use self::draw::{build_draw_list, DrawSettings, FilterSettings, ShaderPassName, SortFlags};
pub use self::error::{CullingError, RenderError};
pub use self::light::{LightKind, VisibleLight};
pub use self::params::ShaderParameters;
pub use self::stats::FrameStats;
pub use self::traits::{CullingService, RenderContext};
pub use self::view::{Projection, Viewpoint, Viewport};
pub use self::visible_set::{
    render_queue, RenderQueueRange, RenderableHandle, VisibleRenderer, VisibleSet,
};
