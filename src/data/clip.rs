use serde::{Deserialize, Serialize};
use wgpu::AddressMode;

use crate::assets::TextureHandle;

/// One baked clip: two `vertex_count × frame_count` textures plus the timing
/// needed to address them.
///
/// Row `f` of either texture holds every vertex at clip time `f / frame_rate`;
/// row 0 is clip time 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDescriptor {
    pub clip_name: String,
    /// Texture height.
    pub frame_count: u32,
    pub frame_rate: u32,
    /// 0.0 or 1.0, kept as a float so it feeds the shader parameter vector as-is.
    pub is_looping: f32,
    /// Texture width the clip was baked against.
    pub vertex_count: u32,

    pub position_texture: TextureHandle,
    pub normal_texture: TextureHandle,
}

impl ClipDescriptor {
    #[must_use]
    pub fn frame_time(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Length covered by the texture rows, in seconds.
    #[must_use]
    pub fn animation_length(&self) -> f32 {
        self.frame_count as f32 * self.frame_time()
    }

    #[must_use]
    pub fn animation_length_inv(&self) -> f32 {
        self.frame_rate as f32 / self.frame_count as f32
    }

    #[must_use]
    pub fn looping(&self) -> bool {
        self.is_looping > 0.5
    }

    /// Repeat for looping clips, clamp otherwise; shared by both textures.
    #[must_use]
    pub fn wrap_mode(&self) -> AddressMode {
        if self.looping() {
            AddressMode::Repeat
        } else {
            AddressMode::ClampToEdge
        }
    }

    /// `(width, height)` of both textures.
    #[must_use]
    pub fn texture_size(&self) -> (u32, u32) {
        (self.vertex_count, self.frame_count)
    }
}
