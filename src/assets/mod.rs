//! Asset storage
//!
//! - [`AssetStorage`]: lock-protected slotmap with string-key lookup
//! - [`BakeStore`]: texture and dataset storages of a bake, key scheme and export

pub mod storage;
pub mod store;

use slotmap::new_key_type;

new_key_type! {
    pub struct TextureHandle;
    pub struct DatasetHandle;
}

pub use storage::AssetStorage;
pub use store::{BakeStore, ClipManifest, DatasetManifest, TextureChannel};
