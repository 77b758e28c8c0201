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

//! The serializable configuration of the forward renderer and its factory.

use super::ForwardFrameRenderer;
use sable_core::math::LinearRgba;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or saving a [`BasicPipelineAsset`].
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset file could not be read.
    #[error("failed to read pipeline asset '{path}': {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The asset text is not valid RON for this asset.
    #[error("failed to parse pipeline asset: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The asset could not be serialized.
    #[error("failed to serialize pipeline asset: {0}")]
    Serialize(#[from] ron::Error),
}

/// Configuration for a [`ForwardFrameRenderer`].
///
/// Stored as RON, for example `(clear_color: (r: 0.0, g: 1.0, b: 0.0, a: 1.0))`.
/// Missing fields take their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicPipelineAsset {
    /// The clear color handed to the renderer.
    pub clear_color: LinearRgba,
}

impl Default for BasicPipelineAsset {
    fn default() -> Self {
        Self {
            clear_color: LinearRgba::GREEN,
        }
    }
}

impl BasicPipelineAsset {
    /// Creates an asset with the given clear color.
    pub fn new(clear_color: LinearRgba) -> Self {
        Self { clear_color }
    }

    /// Parses an asset from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, AssetError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads and parses an asset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let asset = Self::from_ron_str(&text)?;
        log::debug!("Loaded pipeline asset from '{}'", path.display());
        Ok(asset)
    }

    /// Serializes the asset to pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, AssetError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Builds the renderer this asset describes.
    pub fn create_pipeline(&self) -> ForwardFrameRenderer {
        log::info!(
            "Creating ForwardFrameRenderer with clear color {:?}",
            self.clear_color
        );
        ForwardFrameRenderer::new(self.clear_color)
    }
}
