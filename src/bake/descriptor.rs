use crate::assets::store::{BakeStore, TextureChannel};
use crate::bake::packer::{TEXEL_FORMAT, TexelBuffer};
use crate::bake::sampler::SampledClip;
use crate::data::ClipDescriptor;
use crate::errors::{AnimTexError, Result};
use crate::resources::{Texture, TextureSampler};

/// Packs a sampled clip, stores both textures and describes the result.
///
/// Textures land at `{root}/{mesh}/clip_{index}_{clip}_pos` and `..._norm`;
/// re-baking the same slot overwrites them in place.
pub fn build_clip_descriptor(
    store: &BakeStore,
    mesh_name: &str,
    clip_index: usize,
    sampled: &SampledClip,
) -> Result<ClipDescriptor> {
    if sampled.frame_count == 0 {
        return Err(AnimTexError::EmptyClip {
            clip: sampled.info.name.clone(),
            length: sampled.info.length,
            frame_rate: sampled.info.frame_rate,
        });
    }

    let positions = TexelBuffer::pack(&sampled.positions, sampled.vertex_count)?;
    let normals = TexelBuffer::pack(&sampled.normals, sampled.vertex_count)?;
    let sampler = TextureSampler::vertex_animation(sampled.info.is_looping);

    let store_channel = |channel: TextureChannel, buffer: TexelBuffer| {
        let key = store.texture_key(mesh_name, clip_index, &sampled.info.name, channel);
        let (width, height) = (buffer.width(), buffer.height());
        let texture = Texture::new_2d(&key, width, height, buffer.into_bytes(), TEXEL_FORMAT)
            .with_sampler(sampler);
        store.store_texture(&key, texture)
    };

    let position_texture = store_channel(TextureChannel::Position, positions);
    let normal_texture = store_channel(TextureChannel::Normal, normals);

    Ok(ClipDescriptor {
        clip_name: sampled.info.name.clone(),
        frame_count: sampled.frame_count,
        frame_rate: sampled.frame_rate,
        is_looping: if sampled.info.is_looping { 1.0 } else { 0.0 },
        vertex_count: sampled.vertex_count as u32,
        position_texture,
        normal_texture,
    })
}
