use glam::Vec3;
use half::f16;

use crate::errors::{AnimTexError, Result};

/// One RGBA16F texel: xyz of a vertex vector, w unused.
pub type Texel = [f16; 4];

/// Value written to the unused fourth channel.
pub const TEXEL_SENTINEL: f32 = 0.0;

pub const TEXEL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

#[must_use]
pub fn encode_texel(v: Vec3) -> Texel {
    [
        f16::from_f32(v.x),
        f16::from_f32(v.y),
        f16::from_f32(v.z),
        f16::from_f32(TEXEL_SENTINEL),
    ]
}

#[must_use]
pub fn decode_texel(texel: Texel) -> Vec3 {
    Vec3::new(texel[0].to_f32(), texel[1].to_f32(), texel[2].to_f32())
}

/// Reads a texel back from its 8 little-endian bytes.
#[must_use]
pub fn decode_texel_bytes(bytes: &[u8]) -> Option<Vec3> {
    let texel: Texel = bytemuck::try_pod_read_unaligned(bytes.get(..size_of::<Texel>())?).ok()?;
    Some(decode_texel(texel))
}

/// Row-major texel image: column = vertex index, row = frame index.
///
/// Exactly `width × height` texels, never padded.
#[derive(Debug, Clone, PartialEq)]
pub struct TexelBuffer {
    width: u32,
    height: u32,
    texels: Vec<Texel>,
}

impl TexelBuffer {
    /// Flattens `[frame][vertex]` vectors, frames outer and vertices inner.
    pub fn pack(frames: &[Vec<Vec3>], vertex_count: usize) -> Result<Self> {
        let mut texels = Vec::with_capacity(frames.len() * vertex_count);
        for (frame, vertices) in frames.iter().enumerate() {
            if vertices.len() != vertex_count {
                return Err(AnimTexError::VertexCountMismatch {
                    context: format!("packing frame {frame}"),
                    expected: vertex_count,
                    found: vertices.len(),
                });
            }
            texels.extend(vertices.iter().copied().map(encode_texel));
        }

        Ok(Self {
            width: vertex_count as u32,
            height: frames.len() as u32,
            texels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    /// Vector stored for `vertex` at `frame`, at half precision.
    #[must_use]
    pub fn texel(&self, vertex: u32, frame: u32) -> Option<Vec3> {
        if vertex >= self.width || frame >= self.height {
            return None;
        }
        let index = frame as usize * self.width as usize + vertex as usize;
        self.texels.get(index).copied().map(decode_texel)
    }

    /// Upload bytes: 8 per texel, rows tightly packed.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texel_bytes_are_four_halves() {
        let buffer = TexelBuffer::pack(&[vec![Vec3::new(1.0, -2.0, 0.5)]], 1).unwrap();
        let bytes = buffer.as_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..2], &f16::from_f32(1.0).to_le_bytes());
        assert_eq!(&bytes[2..4], &f16::from_f32(-2.0).to_le_bytes());
        assert_eq!(&bytes[4..6], &f16::from_f32(0.5).to_le_bytes());
        assert_eq!(&bytes[6..8], &[0, 0]);
    }

    #[test]
    fn decode_texel_bytes_rejects_short_input() {
        assert!(decode_texel_bytes(&[0, 0, 0]).is_none());
        assert_eq!(decode_texel_bytes(&[0; 8]), Some(Vec3::ZERO));
    }
}
