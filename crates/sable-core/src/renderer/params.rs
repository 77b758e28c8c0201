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

//! An explicit set of named shader parameters.
//!
//! Draw submission receives a [`ShaderParameters`] value directly instead of
//! reading process-wide global shader state, which keeps the frame loop
//! testable.

use crate::math::Vec4;
use std::borrow::Cow;

/// Parameter holding the color of the main directional light.
pub const LIGHT_COLOR: &str = "_LightColor0";
/// Parameter holding the direction towards the main directional light (`w = 0`).
pub const LIGHT_DIRECTION: &str = "_WorldSpaceLightPos0";

/// A set of named `Vec4` parameters, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderParameters {
    entries: Vec<(Cow<'static, str>, Vec4)>,
}

impl ShaderParameters {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, overwriting any previous value in place.
    pub fn set_global_vector(&mut self, name: impl Into<Cow<'static, str>>, value: Vec4) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value of `name`, if it was set.
    pub fn get_vector(&self, name: &str) -> Option<Vec4> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec4)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_ref(), *v))
    }

    /// The number of parameters set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every parameter.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Packs the values, in insertion order, into a byte buffer ready for a
    /// uniform upload (16 bytes per parameter).
    pub fn to_uniform_bytes(&self) -> Vec<u8> {
        let values: Vec<Vec4> = self.entries.iter().map(|(_, v)| *v).collect();
        bytemuck::cast_slice(&values).to_vec()
    }
}
