//! Runtime side of a baked dataset
//!
//! - [`PlaybackState`]: clip selection and the `animParams` vector
//! - [`BindingTable`]: fixed shader parameter names
//! - [`AnimatedInstance`]: material set-up and per-frame play
//! - [`decode`]: CPU reconstruction of baked vertices

pub mod bindings;
pub mod decode;
pub mod instance;
pub mod state;

pub use bindings::{BindingTable, ClipSlotBinding};
pub use decode::{VertexSample, decode_frame, decode_playback, decode_vertex};
pub use instance::{AnimatedInstance, AnimationInstanceData, InstanceMaterial};
pub use state::PlaybackState;
