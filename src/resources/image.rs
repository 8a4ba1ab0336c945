use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

// Global Image ID generator (uses u64 for cheap map lookups)
static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub struct ImageInner {
    pub id: u64,
    pub uuid: Uuid,
    label: Cow<'static, str>,

    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,

    // Pixel bytes, tightly packed rows
    pub data: Vec<u8>,
}

impl ImageInner {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Immutable CPU-side pixel data, shared by reference.
#[derive(Debug, Clone)]
pub struct Image(Arc<ImageInner>);

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}
impl Eq for Image {}
impl std::hash::Hash for Image {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl Image {
    #[must_use]
    pub fn new(label: Option<&str>, width: u32, height: u32, format: wgpu::TextureFormat, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            Some(data.len() as u64),
            format
                .block_copy_size(None)
                .map(|bpp| u64::from(bpp) * u64::from(width) * u64::from(height)),
            "image data does not match {width}x{height} {format:?}"
        );
        Self(Arc::new(ImageInner {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            uuid: Uuid::new_v4(),
            label: label.map_or(Cow::Borrowed("Unnamed Image"), |s| Cow::Owned(s.to_string())),
            width,
            height,
            format,
            data,
        }))
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.id
    }

    #[must_use]
    pub fn bytes_per_pixel(&self) -> u32 {
        self.0.format.block_copy_size(None).unwrap_or(4)
    }

    /// Bytes of the texel at column `x`, row `y`.
    #[must_use]
    pub fn texel_bytes(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.0.width || y >= self.0.height {
            return None;
        }
        let bpp = self.bytes_per_pixel() as usize;
        let start = (y as usize * self.0.width as usize + x as usize) * bpp;
        self.0.data.get(start..start + bpp)
    }
}

// Deref for convenient read-only access to inner data
impl std::ops::Deref for Image {
    type Target = ImageInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
