//! Resource definitions
//!
//! CPU-side data handed to the renderer, independent of any GPU backend:
//! - Image: immutable pixel data
//! - Texture: image plus sampler state
//! - Material: shader parameter block
//! - MeshHandle: reference to the static mesh instances draw

pub mod image;
pub mod material;
pub mod mesh;
pub mod texture;

pub use image::Image;
pub use material::Material;
pub use mesh::MeshHandle;
pub use texture::{Texture, TextureSampler};
