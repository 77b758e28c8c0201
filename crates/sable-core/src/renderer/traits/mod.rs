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

//! Defines the collaborator contracts of the frame loop.
//!
//! - [`CullingService`]: turns a viewpoint into a [`VisibleSet`](crate::renderer::VisibleSet).
//! - [`RenderContext`]: binds state, executes command streams, draws and submits.
//!
//! The frame loop in `sable-lanes` only talks to these traits; concrete
//! implementations live in `sable-infra` or in the host application.

mod culling_service;
mod render_context;

pub use self::culling_service::CullingService;
pub use self::render_context::RenderContext;
