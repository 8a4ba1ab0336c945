use std::sync::Arc;

use crate::animation::evaluator::AnimationEvaluator;
use crate::assets::{BakeStore, DatasetHandle};
use crate::bake::descriptor::build_clip_descriptor;
use crate::bake::sampler::FrameSampler;
use crate::data::AnimationDataset;
use crate::errors::{AnimTexError, Result};
use crate::resources::Material;
use crate::settings::{BakeSettings, MAX_CLIP_SLOTS};

/// Outcome of a successful bake.
#[derive(Debug)]
pub struct BakeReport {
    pub handle: DatasetHandle,
    pub dataset: Arc<AnimationDataset>,
    /// An earlier dataset for the same mesh was overwritten.
    pub replaced: bool,
    /// Non-fatal conditions, e.g. `TooManyClips`.
    pub warnings: Vec<AnimTexError>,
}

/// Runs sampler, packer and descriptor builder per clip, then stores the dataset.
///
/// A bake is synchronous and must not run concurrently with another bake of
/// the same mesh. A failing clip aborts the bake: textures already written for
/// earlier clips stay in the store and no dataset is written. A successful
/// re-bake drops the mesh's textures the new dataset no longer references.
pub struct Baker<'a> {
    store: &'a BakeStore,
    settings: BakeSettings,
    fallback_material: Option<Arc<Material>>,
}

impl<'a> Baker<'a> {
    #[must_use]
    pub fn new(store: &'a BakeStore, settings: BakeSettings) -> Self {
        Self {
            store,
            settings,
            fallback_material: None,
        }
    }

    /// Material assigned as the dataset's fallback instead of the lazily built default.
    #[must_use]
    pub fn with_fallback_material(mut self, material: Arc<Material>) -> Self {
        self.fallback_material = Some(material);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &BakeSettings {
        &self.settings
    }

    /// Bakes every clip the evaluator exposes, in order.
    pub fn bake_all<E>(&self, evaluator: &mut E) -> Result<BakeReport>
    where
        E: AnimationEvaluator + ?Sized,
    {
        let names: Vec<String> = evaluator.clips().into_iter().map(|c| c.name).collect();
        if names.is_empty() {
            return Err(AnimTexError::NoClipsAvailable);
        }
        self.bake(evaluator, names.as_slice())
    }

    /// Bakes the named clips into slots 0.. in the given order.
    ///
    /// An empty name selects the evaluator's first clip. Clips past the fourth
    /// are dropped with a `TooManyClips` warning.
    pub fn bake<E, S>(&self, evaluator: &mut E, clip_names: &[S]) -> Result<BakeReport>
    where
        E: AnimationEvaluator + ?Sized,
        S: AsRef<str>,
    {
        let mesh = evaluator.mesh();
        if mesh.vertex_count == 0 {
            return Err(AnimTexError::VertexCountMismatch {
                context: format!("mesh '{}' has no vertices", mesh.name),
                expected: 1,
                found: 0,
            });
        }

        let mut warnings = Vec::new();
        let mut clip_names = clip_names;
        if clip_names.len() > MAX_CLIP_SLOTS {
            let warning = AnimTexError::TooManyClips {
                supplied: clip_names.len(),
                kept: MAX_CLIP_SLOTS,
            };
            log::warn!("{warning}");
            warnings.push(warning);
            clip_names = &clip_names[..MAX_CLIP_SLOTS];
        }

        let sampler = FrameSampler::new(&self.settings);
        let mut descriptors = Vec::with_capacity(clip_names.len());
        for (clip_index, name) in clip_names.iter().enumerate() {
            let sampled = sampler.sample(evaluator, name.as_ref())?;
            let descriptor = build_clip_descriptor(self.store, &mesh.name, clip_index, &sampled)?;
            log::debug!(
                "Baked clip {clip_index} '{}' of {}: {}x{} texels",
                descriptor.clip_name,
                mesh.name,
                descriptor.vertex_count,
                descriptor.frame_count
            );
            descriptors.push(descriptor);
        }

        let assembled = AnimationDataset::assemble(&mesh, descriptors, &self.settings)?;
        warnings.extend(assembled.warnings);
        let mut dataset = assembled.dataset;
        if let Some(material) = &self.fallback_material {
            dataset.set_fallback_material(material.clone());
        }

        let (handle, replaced) = self.store.store_dataset(dataset);
        let dataset = self
            .store
            .dataset(handle)
            .ok_or_else(|| AnimTexError::DatasetNotFound(self.store.dataset_key(&mesh.name)))?;
        if replaced {
            self.store.prune_textures(&dataset);
        }

        log::info!(
            "Baked {} clip(s) for mesh '{}' ({} vertices){}",
            dataset.clip_count(),
            mesh.name,
            mesh.vertex_count,
            if replaced { ", replacing the previous bake" } else { "" }
        );

        Ok(BakeReport {
            handle,
            dataset,
            replaced,
            warnings,
        })
    }
}
