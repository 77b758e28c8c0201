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

//! Defines the reusable `CommandStream` and the commands it records.

use crate::math::LinearRgba;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STREAM_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier for a [`CommandStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandStreamId(pub u64);

/// A command recorded into a [`CommandStream`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Clears the bound render target.
    ClearRenderTarget {
        /// Whether the depth buffer is cleared.
        clear_depth: bool,
        /// Whether the color buffer is cleared.
        clear_color: bool,
        /// The color written when `clear_color` is set.
        color: LinearRgba,
        /// The depth written when `clear_depth` is set.
        depth: f32,
    },
}

/// A mutable, reusable buffer of queued GPU commands.
///
/// A stream is meant to be allocated once and then cleared between uses:
/// [`clear`](Self::clear) drops the recorded commands but keeps the backing
/// storage. Executing a stream does not consume or reset it.
#[derive(Debug)]
pub struct CommandStream {
    id: CommandStreamId,
    label: String,
    commands: Vec<RenderCommand>,
}

impl CommandStream {
    /// Allocates a new, empty stream with a fresh id.
    pub fn new(label: impl Into<String>) -> Self {
        let id = CommandStreamId(NEXT_STREAM_ID.fetch_add(1, Ordering::Relaxed));
        let label = label.into();
        log::debug!("Allocated command stream '{}' ({:?})", label, id);
        Self {
            id,
            label,
            commands: Vec::new(),
        }
    }

    /// The stream's identifier. Stable for the whole life of the stream.
    #[inline]
    pub fn id(&self) -> CommandStreamId {
        self.id
    }

    /// The debug label given at allocation.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Drops every recorded command, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Records a clear of the bound render target.
    pub fn clear_render_target(
        &mut self,
        clear_depth: bool,
        clear_color: bool,
        color: LinearRgba,
        depth: f32,
    ) {
        self.commands.push(RenderCommand::ClearRenderTarget {
            clear_depth,
            clear_color,
            color,
            depth,
        });
    }

    /// The recorded commands, in recording order.
    #[inline]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// The number of recorded commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when no command is recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Releases the stream and its storage.
    ///
    /// Taking `self` by value makes a second release of the same stream
    /// impossible.
    pub fn release(self) {
        log::debug!(
            "Released command stream '{}' ({:?})",
            self.label,
            self.id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = CommandStream::new("a");
        let b = CommandStream::new("b");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.label(), "a");
    }

    #[test]
    fn test_clear_keeps_identity_and_storage() {
        let mut stream = CommandStream::new("frame");
        let id = stream.id();
        for _ in 0..8 {
            stream.clear_render_target(true, true, LinearRgba::BLACK, 1.0);
        }
        let capacity = stream.commands.capacity();
        stream.clear();
        assert!(stream.is_empty());
        assert_eq!(stream.id(), id);
        assert_eq!(stream.commands.capacity(), capacity);
    }

    #[test]
    fn test_clear_render_target_is_recorded() {
        let mut stream = CommandStream::new("frame");
        stream.clear_render_target(true, false, LinearRgba::RED, 0.5);
        assert_eq!(stream.len(), 1);
        assert_eq!(
            stream.commands()[0],
            RenderCommand::ClearRenderTarget {
                clear_depth: true,
                clear_color: false,
                color: LinearRgba::RED,
                depth: 0.5,
            }
        );
        stream.release();
    }
}
