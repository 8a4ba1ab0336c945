//! Bake pipeline
//!
//! Frame sampling → texel packing → clip descriptor → dataset, driven by [`Baker`].

pub mod baker;
pub mod descriptor;
pub mod packer;
pub mod sampler;

pub use baker::{BakeReport, Baker};
pub use descriptor::build_clip_descriptor;
pub use packer::{Texel, TexelBuffer};
pub use sampler::{FrameSampler, SampledClip, frame_layout, resolve_clip};
