use glam::Vec4;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::assets::TextureHandle;

/// Shader parameter block: a shader name plus named texture, float and vector inputs.
///
/// Every mutation bumps [`version`](Self::version) so a renderer can tell when
/// the GPU-side copy is stale.
#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: String,
    pub shader: String,

    textures: FxHashMap<String, TextureHandle>,
    floats: FxHashMap<String, f32>,
    vectors: FxHashMap<String, Vec4>,

    version: u64,
}

impl Material {
    #[must_use]
    pub fn new(shader: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: shader.to_string(),
            shader: shader.to_string(),
            textures: FxHashMap::default(),
            floats: FxHashMap::default(),
            vectors: FxHashMap::default(),
            version: 0,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Per-instance copy: same parameters, new identity.
    #[must_use]
    pub fn instantiate(&self) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: format!("{} (Instance)", self.name),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn set_texture(&mut self, name: &str, texture: TextureHandle) {
        self.textures.insert(name.to_string(), texture);
        self.changed();
    }

    pub fn remove_texture(&mut self, name: &str) -> Option<TextureHandle> {
        let removed = self.textures.remove(name);
        if removed.is_some() {
            self.changed();
        }
        removed
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
        self.changed();
    }

    pub fn set_vector(&mut self, name: &str, value: Vec4) {
        self.vectors.insert(name.to_string(), value);
        self.changed();
    }

    #[must_use]
    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.textures.get(name).copied()
    }

    #[must_use]
    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    #[must_use]
    pub fn vector(&self, name: &str) -> Option<Vec4> {
        self.vectors.get(name).copied()
    }

    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn changed(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
