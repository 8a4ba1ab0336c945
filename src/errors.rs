//! Error Types
//!
//! This module defines the error type shared by the bake pipeline and the
//! playback runtime.
//!
//! # Overview
//!
//! [`AnimTexError`] covers two families of failures:
//! - Bake-time errors (`ClipNotFound`, `NoClipsAvailable`, `EmptyClip`,
//!   `TooManyFrames`, `VertexCountMismatch`) abort the bake of the dataset
//!   they occur in.
//! - Recoverable conditions (`ClipIndexOutOfRange`, `TooManyClips`) are never
//!   returned through `Err`. The operation clamps or truncates, logs, and hands
//!   the condition back next to its successful result.
//!
//! # Usage
//!
//! ```rust,ignore
//! use anim_texture::errors::{AnimTexError, Result};
//!
//! fn bake_one() -> Result<()> {
//!     Err(AnimTexError::NoClipsAvailable)
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum AnimTexError {
    // ========================================================================
    // Bake Errors
    // ========================================================================
    /// No clip with the requested name exists on the evaluator.
    #[error("Animation clip not found: {0}")]
    ClipNotFound(String),

    /// The evaluator exposes no clips at all.
    #[error("No animation clips available on the evaluator")]
    NoClipsAvailable,

    /// The clip evaluates to zero frames (zero length or zero frame rate).
    #[error("Animation clip '{clip}' is empty (length {length}s at {frame_rate} fps)")]
    EmptyClip {
        clip: String,
        length: f32,
        frame_rate: f32,
    },

    /// The clip needs more texture rows than [`MAX_FRAME_COUNT`](crate::settings::MAX_FRAME_COUNT).
    #[error("Animation clip '{clip}' needs {frames} frames, at most {max} fit in a texture")]
    TooManyFrames { clip: String, frames: f32, max: u32 },

    /// Vertex data does not match the vertex count the texture width was fixed to.
    #[error("Vertex count mismatch in '{context}': expected {expected}, found {found}")]
    VertexCountMismatch {
        /// Clip or frame being processed
        context: String,
        expected: usize,
        found: usize,
    },

    // ========================================================================
    // Recoverable Conditions
    // ========================================================================
    /// A clip index outside the dataset's slots was requested; playback clamps.
    #[error("Clip index ({index}) out of range, clamped to {clamped} (valid: 0 ~ {max})")]
    ClipIndexOutOfRange { index: i32, clamped: usize, max: usize },

    /// More clips than texture slots were supplied; the extra clips are dropped.
    #[error("{supplied} animation clips supplied, only the first {kept} are used")]
    TooManyClips { supplied: usize, kept: usize },

    // ========================================================================
    // Storage Errors
    // ========================================================================
    /// No dataset is stored under the given key or handle.
    #[error("Animation dataset not found: {0}")]
    DatasetNotFound(String),

    /// A descriptor refers to a texture missing from the store.
    #[error("Texture not found: {0}")]
    TextureNotFound(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON encoding or parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AnimTexError {
    /// Returns `true` for conditions that are reported but never abort an operation.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnimTexError::ClipIndexOutOfRange { .. } | AnimTexError::TooManyClips { .. }
        )
    }
}

/// Alias for `Result<T, AnimTexError>`.
pub type Result<T> = std::result::Result<T, AnimTexError>;
