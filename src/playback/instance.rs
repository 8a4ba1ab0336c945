use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crate::data::AnimationDataset;
use crate::errors::AnimTexError;
use crate::playback::state::PlaybackState;
use crate::resources::Material;

/// Per-instance GPU record for instanced drawing of one dataset.
///
/// Matches the WGSL struct produced by [`wgsl_struct_def`](Self::wgsl_struct_def).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct AnimationInstanceData {
    pub anim_params: Vec4,   // 16
    pub texel_size: f32,     // 4
    pub _padding: [f32; 3],  // -> 32 bytes
}

impl AnimationInstanceData {
    #[must_use]
    pub fn wgsl_struct_def(struct_name: &str) -> String {
        let mut code = format!("struct {struct_name} {{\n");
        code.push_str("    anim_params: vec4<f32>,\n");
        code.push_str("    texel_size: f32,\n");
        code.push_str("};");
        code
    }
}

/// Material an instance draws with.
#[derive(Debug, Clone)]
pub enum InstanceMaterial {
    /// The dataset's override, bound once and shared by every instance.
    Shared(Arc<Material>),
    /// A private copy the instance writes its clip parameters into.
    Owned(Material),
}

impl InstanceMaterial {
    #[must_use]
    pub fn get(&self) -> &Material {
        match self {
            InstanceMaterial::Shared(material) => material.as_ref(),
            InstanceMaterial::Owned(material) => material,
        }
    }

    #[must_use]
    pub fn is_shared(&self) -> bool {
        matches!(self, InstanceMaterial::Shared(_))
    }
}

/// One rendered object playing clips of a shared dataset.
#[derive(Debug, Clone)]
pub struct AnimatedInstance {
    dataset: Arc<AnimationDataset>,
    material: InstanceMaterial,
    playback: PlaybackState,
}

impl AnimatedInstance {
    /// Sets up an instance and starts clip 0 at `now`.
    ///
    /// With a material override on the dataset the instance shares it.
    /// Otherwise it copies `existing`, or the dataset's fallback material when
    /// none is given, and binds the clip textures and texel size into the copy.
    pub fn new(dataset: Arc<AnimationDataset>, existing: Option<&Material>, now: f32) -> Self {
        let material = if let Some(shared) = &dataset.material_override {
            InstanceMaterial::Shared(shared.clone())
        } else {
            let mut material = match existing {
                Some(material) => material.instantiate(),
                None => dataset.fallback_material().instantiate(),
            };
            dataset.binding_table().bind(&dataset, &mut material);
            InstanceMaterial::Owned(material)
        };

        let mut instance = Self {
            dataset,
            material,
            playback: PlaybackState::default(),
        };
        instance.play(0, now, true);
        instance
    }

    /// Selects clip `index` at `now`; see [`PlaybackState::select_clip`].
    ///
    /// Meant to be called every frame. An out-of-range index is clamped and
    /// reported, never fatal.
    pub fn play(&mut self, index: i32, now: f32, force_restart: bool) -> Option<AnimTexError> {
        let error = self
            .playback
            .select_clip(&self.dataset, index, now, force_restart);
        self.write_params();
        error
    }

    /// Plays the first clip called `name`; unknown names leave playback untouched.
    pub fn play_named(&mut self, name: &str, now: f32, force_restart: bool) -> Option<AnimTexError> {
        let Some(index) = self.dataset.clip_index(name) else {
            let error = AnimTexError::ClipNotFound(name.to_string());
            log::warn!("{error} in dataset '{}'", self.dataset.mesh_name);
            return Some(error);
        };
        self.play(index as i32, now, force_restart)
    }

    /// Advances the instance clock.
    pub fn tick(&mut self, now: f32) {
        self.playback.advance(now);
    }

    fn write_params(&mut self) {
        let params = self.playback.params();
        let name = self.dataset.binding_table().anim_params;
        if let InstanceMaterial::Owned(material) = &mut self.material {
            material.set_vector(name, params);
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Arc<AnimationDataset> {
        &self.dataset
    }

    #[must_use]
    pub fn material(&self) -> &InstanceMaterial {
        &self.material
    }

    #[must_use]
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    #[must_use]
    pub fn instance_data(&self) -> AnimationInstanceData {
        AnimationInstanceData {
            anim_params: self.playback.params(),
            texel_size: self.dataset.texel_size(),
            _padding: [0.0; 3],
        }
    }
}
