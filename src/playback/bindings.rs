//! Shader binding convention.
//!
//! The sampling shader addresses clips statically: four named position/normal
//! texture pairs, a texel size and one parameter vector. Names are fixed so a
//! [`BindingTable`] is pure data derived from the clip count.

use crate::data::AnimationDataset;
use crate::resources::Material;
use crate::settings::MAX_CLIP_SLOTS;

pub const POSITION_TEXTURE_NAMES: [&str; MAX_CLIP_SLOTS] = [
    "positionTexture0",
    "positionTexture1",
    "positionTexture2",
    "positionTexture3",
];

pub const NORMAL_TEXTURE_NAMES: [&str; MAX_CLIP_SLOTS] = [
    "normalTexture0",
    "normalTexture1",
    "normalTexture2",
    "normalTexture3",
];

/// `1 / vertex_count`.
pub const TEXEL_SIZE_NAME: &str = "texelSize";

/// `(clip index, clip start time, 1 / animation length, is looping)`.
pub const ANIM_PARAMS_NAME: &str = "animParams";

/// Texture parameter names for one clip slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSlotBinding {
    pub slot: usize,
    pub position: &'static str,
    pub normal: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable {
    pub clip_slots: Vec<ClipSlotBinding>,
    pub texel_size: &'static str,
    pub anim_params: &'static str,
}

impl BindingTable {
    /// Table for a dataset with `clip_count` clips; slots past the fourth are not addressable.
    #[must_use]
    pub fn for_clip_count(clip_count: usize) -> Self {
        let clip_slots = (0..clip_count.min(MAX_CLIP_SLOTS))
            .map(|slot| ClipSlotBinding {
                slot,
                position: POSITION_TEXTURE_NAMES[slot],
                normal: NORMAL_TEXTURE_NAMES[slot],
            })
            .collect();

        Self {
            clip_slots,
            texel_size: TEXEL_SIZE_NAME,
            anim_params: ANIM_PARAMS_NAME,
        }
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&ClipSlotBinding> {
        self.clip_slots.get(index)
    }

    /// Binds every clip's textures and the texel size of `dataset` into `material`.
    ///
    /// Slots the dataset does not fill are unbound, so a material rebound to a
    /// smaller dataset keeps no textures of an earlier one.
    pub fn bind(&self, dataset: &AnimationDataset, material: &mut Material) {
        for (slot, clip) in self.clip_slots.iter().zip(&dataset.clip_datas) {
            material.set_texture(slot.position, clip.position_texture);
            material.set_texture(slot.normal, clip.normal_texture);
        }
        for slot in self.clip_slots.len().min(dataset.clip_count())..MAX_CLIP_SLOTS {
            material.remove_texture(POSITION_TEXTURE_NAMES[slot]);
            material.remove_texture(NORMAL_TEXTURE_NAMES[slot]);
        }
        material.set_float(self.texel_size, dataset.texel_size());
    }
}
