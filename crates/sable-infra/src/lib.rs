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

//! # Sable Infra
//!
//! Concrete implementations of the collaborator traits declared in
//! `sable-core`: a frustum culler over an in-memory scene and a headless
//! execution context that records what it is asked to do.

#![warn(missing_docs)]

#[cfg(feature = "culling")]
pub mod culling;
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(feature = "culling")]
pub use culling::{Frustum, FrustumCuller, Scene, SceneLight, SceneObject};
#[cfg(feature = "graphics")]
pub use graphics::headless::{ContextEvent, RecordingContext, TargetState};
