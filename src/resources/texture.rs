use uuid::Uuid;
use wgpu::{AddressMode, FilterMode, MipmapFilterMode, TextureFormat};

use crate::resources::image::Image;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSampler {
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub mipmap_filter: MipmapFilterMode,
}

impl Default for TextureSampler {
    fn default() -> Self {
        Self {
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: MipmapFilterMode::Nearest,
        }
    }
}

impl TextureSampler {
    /// Sampler for a baked animation texture.
    ///
    /// Always bilinear so playback blends between neighbouring frames. The wrap
    /// mode follows the clip: a looping clip wraps back to frame 0, a one-shot
    /// clip holds its final pose.
    #[must_use]
    pub fn vertex_animation(is_looping: bool) -> Self {
        let wrap = if is_looping {
            AddressMode::Repeat
        } else {
            AddressMode::ClampToEdge
        };
        Self {
            address_mode_u: wrap,
            address_mode_v: wrap,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,
    pub image: Image,
    pub sampler: TextureSampler,
}

impl Texture {
    #[must_use]
    pub fn new(name: &str, image: Image) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            image,
            sampler: TextureSampler::default(),
        }
    }

    /// Creates a 2D texture (the Image is created alongside).
    #[must_use]
    pub fn new_2d(name: &str, width: u32, height: u32, data: Vec<u8>, format: TextureFormat) -> Self {
        let image = Image::new(Some(name), width, height, format, data);
        Self::new(name, image)
    }

    #[must_use]
    pub fn with_sampler(mut self, sampler: TextureSampler) -> Self {
        self.sampler = sampler;
        self
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height
    }
}
