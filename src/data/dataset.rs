use std::sync::{Arc, OnceLock};

use crate::animation::evaluator::MeshInfo;
use crate::data::clip::ClipDescriptor;
use crate::errors::{AnimTexError, Result};
use crate::playback::bindings::BindingTable;
use crate::resources::{Material, MeshHandle};
use crate::settings::{BakeSettings, MAX_CLIP_SLOTS};

/// The baked artifact for one mesh: up to four clips sharing one texture width.
///
/// Immutable once baked and shared between instances through `Arc`; instances
/// never copy texel data.
#[derive(Debug, Clone)]
pub struct AnimationDataset {
    pub mesh_name: String,
    pub mesh: MeshHandle,
    /// Texture width, equal to the bake-time mesh vertex count.
    pub vertex_count: u32,
    /// Indexed by clip slot.
    pub clip_datas: Vec<ClipDescriptor>,

    /// When set, every instance binds this shared material.
    pub material_override: Option<Arc<Material>>,

    fallback_shader: String,
    fallback_material: OnceLock<Arc<Material>>,
    binding_table: OnceLock<BindingTable>,
}

/// Result of [`AnimationDataset::assemble`] with the non-fatal conditions met on the way.
#[derive(Debug)]
pub struct Assembled {
    pub dataset: AnimationDataset,
    pub warnings: Vec<AnimTexError>,
}

impl AnimationDataset {
    /// Groups baked clips into a dataset.
    ///
    /// More than [`MAX_CLIP_SLOTS`] clips are truncated with a `TooManyClips`
    /// warning. A clip baked against a different vertex count is an error.
    pub fn assemble(mesh: &MeshInfo, mut clips: Vec<ClipDescriptor>, settings: &BakeSettings) -> Result<Assembled> {
        let mut warnings = Vec::new();

        if clips.len() > MAX_CLIP_SLOTS {
            let warning = AnimTexError::TooManyClips {
                supplied: clips.len(),
                kept: MAX_CLIP_SLOTS,
            };
            log::warn!("{warning}");
            clips.truncate(MAX_CLIP_SLOTS);
            warnings.push(warning);
        }

        for clip in &clips {
            if clip.vertex_count as usize != mesh.vertex_count {
                return Err(AnimTexError::VertexCountMismatch {
                    context: format!("{}/{}", mesh.name, clip.clip_name),
                    expected: mesh.vertex_count,
                    found: clip.vertex_count as usize,
                });
            }
        }

        let dataset = Self {
            mesh_name: mesh.name.clone(),
            mesh: mesh.handle.clone(),
            vertex_count: mesh.vertex_count as u32,
            clip_datas: clips,
            material_override: None,
            fallback_shader: settings.fallback_shader.clone(),
            fallback_material: OnceLock::new(),
            binding_table: OnceLock::new(),
        };

        Ok(Assembled { dataset, warnings })
    }

    /// `1 / vertex_count`: U distance between neighbouring vertices.
    #[must_use]
    pub fn texel_size(&self) -> f32 {
        1.0 / self.vertex_count as f32
    }

    #[must_use]
    pub fn clip_count(&self) -> usize {
        self.clip_datas.len()
    }

    #[must_use]
    pub fn clip(&self, index: usize) -> Option<&ClipDescriptor> {
        self.clip_datas.get(index)
    }

    #[must_use]
    pub fn clip_index(&self, name: &str) -> Option<usize> {
        self.clip_datas.iter().position(|c| c.clip_name == name)
    }

    /// Highest selectable slot, `None` for a dataset without clips.
    #[must_use]
    pub fn max_clip_index(&self) -> Option<usize> {
        self.clip_count().min(MAX_CLIP_SLOTS).checked_sub(1)
    }

    #[must_use]
    pub fn fallback_shader(&self) -> &str {
        &self.fallback_shader
    }

    /// Default material, created from the fallback shader on first access.
    ///
    /// Every read returns the same instance until
    /// [`set_fallback_material`](Self::set_fallback_material) replaces it.
    pub fn fallback_material(&self) -> Arc<Material> {
        self.fallback_material
            .get_or_init(|| {
                log::debug!("Creating fallback material '{}' for {}", self.fallback_shader, self.mesh_name);
                Arc::new(Material::new(&self.fallback_shader).with_name(&format!("{}_Fallback", self.mesh_name)))
            })
            .clone()
    }

    pub fn set_fallback_material(&mut self, material: Arc<Material>) {
        self.fallback_material = OnceLock::from(material);
    }

    /// Shader parameter names for this dataset's clip slots, built on first use.
    pub fn binding_table(&self) -> &BindingTable {
        self.binding_table
            .get_or_init(|| BindingTable::for_clip_count(self.clip_count()))
    }

    /// A re-bake rewrites clip data and the fallback material but keeps the
    /// material override assigned to the earlier artifact.
    ///
    /// The inherited override is a copy rebound to this dataset's textures and
    /// texel size; the earlier artifact's material is left untouched.
    pub(crate) fn inherit_override(&mut self, previous: &AnimationDataset) {
        if self.material_override.is_some() {
            return;
        }
        if let Some(inherited) = &previous.material_override {
            let mut material = Material::clone(inherited);
            self.binding_table().bind(self, &mut material);
            self.material_override = Some(Arc::new(material));
        }
    }
}
