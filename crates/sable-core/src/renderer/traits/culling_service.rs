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

use crate::renderer::error::CullingError;
use crate::renderer::view::Viewpoint;
use crate::renderer::visible_set::VisibleSet;

/// A service that determines what is visible from a viewpoint.
///
/// The scene the service culls against is owned by the implementation.
pub trait CullingService {
    /// Computes the visible renderers and lights for `viewpoint`.
    ///
    /// Returns a [`CullingError`] when no culling parameters can be derived
    /// from the viewpoint (degenerate frustum, empty viewport...). Callers
    /// are expected to skip the viewpoint in that case.
    fn cull(&self, viewpoint: &Viewpoint) -> Result<VisibleSet, CullingError>;
}
