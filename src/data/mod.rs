//! Baked data model
//!
//! - [`ClipDescriptor`]: one clip's textures and timing
//! - [`AnimationDataset`]: the per-mesh artifact holding up to four clips

pub mod clip;
pub mod dataset;

pub use clip::ClipDescriptor;
pub use dataset::{AnimationDataset, Assembled};
