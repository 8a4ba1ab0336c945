//! Bake Settings
//!
//! Configuration for a bake run. Settings are plain data: they can be built in
//! code with struct-update syntax or loaded from a JSON file.
//!
//! ```rust,ignore
//! use anim_texture::BakeSettings;
//!
//! let settings = BakeSettings {
//!     asset_root: "Assets/Baked".into(),
//!     sample_final_frame: true,
//!     ..Default::default()
//! };
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Maximum number of clips a dataset can hold.
///
/// Fixed by the shader binding convention: four position/normal texture pairs.
pub const MAX_CLIP_SLOTS: usize = 4;

/// Maximum number of rows a clip texture can have.
///
/// Matches wgpu's default `max_texture_dimension_2d`.
pub const MAX_FRAME_COUNT: u32 = 8192;

/// Shader used for a dataset's default material when none was supplied.
pub const DEFAULT_FALLBACK_SHADER: &str = "anim_texture/texture_animation";

/// Default root under which baked textures and datasets are keyed.
pub const DEFAULT_ASSET_ROOT: &str = "AnimationTexture";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeSettings {
    /// Root of the storage keys (`{asset_root}/{mesh}/...`).
    pub asset_root: String,

    /// Shader name the lazily created fallback material is built from.
    pub fallback_shader: String,

    /// Sample one extra frame at exactly `clip.length`.
    ///
    /// Off by default: looping clips are assumed to author their last frame as a
    /// copy of the first. Turn it on for clips whose final pose differs.
    pub sample_final_frame: bool,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
            fallback_shader: DEFAULT_FALLBACK_SHADER.to_string(),
            sample_final_frame: false,
        }
    }
}

impl BakeSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
