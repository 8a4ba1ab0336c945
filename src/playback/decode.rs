//! CPU reference decoder.
//!
//! Reads baked textures back the way the sampling shader does: U picks the
//! vertex column at its texel centre, V is filtered linearly between the two
//! nearest frame rows with the texture's wrap mode. Useful for tests, previews
//! and CPU-side picking.

use glam::Vec3;
use wgpu::AddressMode;

use crate::animation::evaluator::VertexFrame;
use crate::assets::{BakeStore, TextureHandle};
use crate::bake::packer::decode_texel_bytes;
use crate::data::{AnimationDataset, ClipDescriptor};
use crate::errors::{AnimTexError, Result};
use crate::playback::state::PlaybackState;
use crate::resources::Texture;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSample {
    pub position: Vec3,
    pub normal: Vec3,
}

/// V coordinate addressing `normalized_time` of a clip with `frame_count` rows.
///
/// Row `f` sits at its texel centre `(f + 0.5) / frame_count`, so time 0 reads
/// frame 0 unfiltered.
#[must_use]
pub fn texture_v(normalized_time: f32, frame_count: u32) -> f32 {
    let rows = frame_count.max(1) as f32;
    (normalized_time * rows + 0.5) / rows
}

fn wrap_row(row: i64, height: u32, mode: AddressMode) -> u32 {
    let height = i64::from(height);
    let row = match mode {
        AddressMode::Repeat => row.rem_euclid(height),
        AddressMode::MirrorRepeat => {
            let period = row.rem_euclid(2 * height);
            if period < height { period } else { 2 * height - 1 - period }
        }
        _ => row.clamp(0, height - 1),
    };
    row as u32
}

/// Bilinear read of column `vertex` at coordinate `v`.
///
/// `None` when the column is outside the texture.
#[must_use]
pub fn sample_column(texture: &Texture, vertex: u32, v: f32) -> Option<Vec3> {
    let height = texture.height();
    if vertex >= texture.width() || height == 0 {
        return None;
    }

    let y = v * height as f32 - 0.5;
    let y0 = y.floor();
    let t = y - y0;
    let mode = texture.sampler.address_mode_v;
    let row0 = wrap_row(y0 as i64, height, mode);
    let row1 = wrap_row(y0 as i64 + 1, height, mode);

    let a = decode_texel_bytes(texture.image.texel_bytes(vertex, row0)?)?;
    let b = decode_texel_bytes(texture.image.texel_bytes(vertex, row1)?)?;
    Some(a.lerp(b, t))
}

fn fetch(store: &BakeStore, handle: TextureHandle, clip: &ClipDescriptor) -> Result<std::sync::Arc<Texture>> {
    store
        .texture(handle)
        .ok_or_else(|| AnimTexError::TextureNotFound(clip.clip_name.clone()))
}

fn vertex_out_of_range(clip: &ClipDescriptor, vertex: u32) -> AnimTexError {
    AnimTexError::VertexCountMismatch {
        context: format!("decoding vertex {vertex} of {}", clip.clip_name),
        expected: clip.vertex_count as usize,
        found: vertex as usize + 1,
    }
}

/// Position and normal of `vertex` at `normalized_time` of `clip`.
pub fn decode_vertex(
    store: &BakeStore,
    clip: &ClipDescriptor,
    vertex: u32,
    normalized_time: f32,
) -> Result<VertexSample> {
    let positions = fetch(store, clip.position_texture, clip)?;
    let normals = fetch(store, clip.normal_texture, clip)?;
    let v = texture_v(normalized_time, clip.frame_count);

    let position = sample_column(&positions, vertex, v).ok_or_else(|| vertex_out_of_range(clip, vertex))?;
    let normal = sample_column(&normals, vertex, v).ok_or_else(|| vertex_out_of_range(clip, vertex))?;

    Ok(VertexSample {
        position,
        normal: normal.normalize_or_zero(),
    })
}

/// Unfiltered row `frame` of both textures.
pub fn decode_frame(store: &BakeStore, clip: &ClipDescriptor, frame: u32) -> Result<VertexFrame> {
    let positions = fetch(store, clip.position_texture, clip)?;
    let normals = fetch(store, clip.normal_texture, clip)?;
    let row = frame.min(clip.frame_count.saturating_sub(1));

    let read_row = |texture: &Texture| -> Vec<Vec3> {
        (0..texture.width())
            .filter_map(|x| texture.image.texel_bytes(x, row).and_then(decode_texel_bytes))
            .collect()
    };

    Ok(VertexFrame {
        positions: read_row(&positions),
        normals: read_row(&normals),
    })
}

/// What an instance with `state` shows for `vertex` right now.
pub fn decode_playback(
    store: &BakeStore,
    dataset: &AnimationDataset,
    state: &PlaybackState,
    vertex: u32,
) -> Result<VertexSample> {
    let clip = dataset
        .clip(state.active_clip_index)
        .ok_or(AnimTexError::NoClipsAvailable)?;
    decode_vertex(store, clip, vertex, state.normalized_time())
}
