#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Bakes skinned mesh animation into position/normal lookup textures.
//!
//! A [`Baker`] drives an [`AnimationEvaluator`] through up to four clips, packs
//! every frame's vertices into RGBA16F textures and stores the result as an
//! [`AnimationDataset`]. At runtime an [`AnimatedInstance`] binds the dataset
//! into a material and feeds the shader one parameter vector per frame.

pub mod animation;
pub mod assets;
pub mod bake;
pub mod data;
pub mod errors;
pub mod playback;
pub mod resources;
pub mod settings;

pub use animation::{AnimationEvaluator, ClipInfo, MeshInfo, SkinnedEvaluator, VertexFrame};
pub use assets::{BakeStore, DatasetHandle, TextureHandle};
pub use bake::{BakeReport, Baker};
pub use data::{AnimationDataset, ClipDescriptor};
pub use errors::{AnimTexError, Result};
pub use playback::{AnimatedInstance, PlaybackState};
pub use resources::{Material, MeshHandle, Texture};
pub use settings::{BakeSettings, MAX_CLIP_SLOTS};
