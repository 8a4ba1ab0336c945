//! Bake output storage.
//!
//! Holds the textures and datasets a bake produces under deterministic string
//! keys, and exports a stored dataset to disk as a JSON manifest plus one raw
//! RGBA16F file per texture.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::assets::storage::AssetStorage;
use crate::assets::{DatasetHandle, TextureHandle};
use crate::data::AnimationDataset;
use crate::errors::{AnimTexError, Result};
use crate::resources::{Material, Texture};
use crate::settings::{BakeSettings, DEFAULT_ASSET_ROOT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureChannel {
    Position,
    Normal,
}

impl TextureChannel {
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            TextureChannel::Position => "pos",
            TextureChannel::Normal => "norm",
        }
    }
}

pub struct BakeStore {
    root: String,
    pub textures: AssetStorage<TextureHandle, Texture>,
    pub datasets: AssetStorage<DatasetHandle, AnimationDataset>,
}

impl Default for BakeStore {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_ROOT)
    }
}

impl BakeStore {
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self {
            root: root.trim_end_matches('/').to_string(),
            textures: AssetStorage::new(),
            datasets: AssetStorage::new(),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &BakeSettings) -> Self {
        Self::new(&settings.asset_root)
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn texture_key(&self, mesh_name: &str, clip_index: usize, clip_name: &str, channel: TextureChannel) -> String {
        format!(
            "{}/{mesh_name}/clip_{clip_index}_{clip_name}_{}",
            self.root,
            channel.suffix()
        )
    }

    #[must_use]
    pub fn dataset_key(&self, mesh_name: &str) -> String {
        format!("{}/{mesh_name}/AnimationDataset_{mesh_name}", self.root)
    }

    pub fn store_texture(&self, key: &str, texture: Texture) -> TextureHandle {
        let (handle, replaced) = self.textures.insert_or_replace(key, texture);
        if replaced {
            log::debug!("Overwrote texture {key}");
        }
        handle
    }

    /// Create-or-update of the dataset for its mesh.
    ///
    /// A dataset already stored for the mesh keeps its handle and its material
    /// override, rebound to the new clips; everything else is replaced. Returns whether an entry existed.
    pub fn store_dataset(&self, mut dataset: AnimationDataset) -> (DatasetHandle, bool) {
        let key = self.dataset_key(&dataset.mesh_name);
        if let Some(previous) = self.datasets.get_by_key(&key) {
            dataset.inherit_override(&previous);
        }
        self.datasets.insert_or_replace(&key, dataset)
    }

    /// Drops textures stored under the dataset's mesh that none of its clips reference.
    ///
    /// Returns how many were removed.
    pub fn prune_textures(&self, dataset: &AnimationDataset) -> usize {
        let prefix = format!("{}/{}/", self.root, dataset.mesh_name);
        let referenced: FxHashSet<TextureHandle> = dataset
            .clip_datas
            .iter()
            .flat_map(|clip| [clip.position_texture, clip.normal_texture])
            .collect();

        let mut removed = 0;
        for key in self.textures.keys_with_prefix(&prefix) {
            let stale = self
                .textures
                .handle_for_key(&key)
                .is_some_and(|handle| !referenced.contains(&handle));
            if stale && self.textures.remove_by_key(&key).is_some() {
                log::debug!("Removed unreferenced texture {key}");
                removed += 1;
            }
        }
        removed
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<Arc<Texture>> {
        self.textures.get(handle)
    }

    pub fn dataset(&self, handle: DatasetHandle) -> Option<Arc<AnimationDataset>> {
        self.datasets.get(handle)
    }

    pub fn dataset_for_mesh(&self, mesh_name: &str) -> Option<Arc<AnimationDataset>> {
        self.datasets.get_by_key(&self.dataset_key(mesh_name))
    }

    /// Assigns (or clears) the material every instance of the dataset shares.
    ///
    /// The dataset's textures and texel size are bound into the material before
    /// it is shared, since instances never write to a shared material.
    pub fn set_material_override(&self, handle: DatasetHandle, material: Option<Material>) -> Result<()> {
        let current = self
            .dataset(handle)
            .ok_or_else(|| AnimTexError::DatasetNotFound(format!("{handle:?}")))?;
        let mut dataset = (*current).clone();
        let material_override = material.map(|mut material| {
            dataset.binding_table().bind(&dataset, &mut material);
            Arc::new(material)
        });
        dataset.material_override = material_override;
        self.datasets
            .insert_or_replace(&self.dataset_key(&dataset.mesh_name), dataset);
        Ok(())
    }

    /// Writes `<dir>/<mesh>.json` and the raw texel files of every clip.
    ///
    /// Returns the manifest path.
    pub fn export_dataset(&self, handle: DatasetHandle, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dataset = self
            .dataset(handle)
            .ok_or_else(|| AnimTexError::DatasetNotFound(format!("{handle:?}")))?;
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut clips = Vec::with_capacity(dataset.clip_count());
        for clip in &dataset.clip_datas {
            let position_file = self.write_texture(clip.position_texture, dir)?;
            let normal_file = self.write_texture(clip.normal_texture, dir)?;
            clips.push(ClipManifest {
                clip_name: clip.clip_name.clone(),
                frame_count: clip.frame_count,
                frame_rate: clip.frame_rate,
                is_looping: clip.is_looping,
                animation_length: clip.animation_length(),
                position_texture: position_file,
                normal_texture: normal_file,
            });
        }

        let manifest = DatasetManifest {
            mesh_name: dataset.mesh_name.clone(),
            vertex_count: dataset.vertex_count,
            texel_size: dataset.texel_size(),
            texture_format: "rgba16float".to_string(),
            clips,
        };

        let path = dir.join(format!("{}.json", dataset.mesh_name));
        std::fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        log::info!("Exported animation dataset '{}' to {}", dataset.mesh_name, path.display());
        Ok(path)
    }

    fn write_texture(&self, handle: TextureHandle, dir: &Path) -> Result<String> {
        let texture = self
            .texture(handle)
            .ok_or_else(|| AnimTexError::TextureNotFound(format!("{handle:?}")))?;
        let stem = texture.name.rsplit('/').next().unwrap_or(&texture.name);
        let file_name = format!("{stem}.rgba16f");
        std::fs::write(dir.join(&file_name), &texture.image.data)?;
        Ok(file_name)
    }
}

/// On-disk description of an exported dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub mesh_name: String,
    pub vertex_count: u32,
    pub texel_size: f32,
    pub texture_format: String,
    pub clips: Vec<ClipManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipManifest {
    pub clip_name: String,
    pub frame_count: u32,
    pub frame_rate: u32,
    pub is_looping: f32,
    pub animation_length: f32,
    /// File names relative to the manifest.
    pub position_texture: String,
    pub normal_texture: String,
}

impl DatasetManifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
