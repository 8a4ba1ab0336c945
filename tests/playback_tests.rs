//! Playback Tests
//!
//! Tests for:
//! - PlaybackState: clip selection, restart rules, index clamping
//! - Time math: elapsed, normalized time, frame row
//! - AnimatedInstance: material choice, bindings, per-frame play
//! - CPU decoder: filtered reads with Repeat/Clamp wrap

mod common;

use std::sync::Arc;

use anim_texture::animation::AnimationEvaluator;
use anim_texture::assets::BakeStore;
use anim_texture::data::AnimationDataset;
use anim_texture::playback::decode::{decode_frame, decode_playback, decode_vertex, texture_v};
use anim_texture::playback::{AnimatedInstance, AnimationInstanceData, PlaybackState};
use anim_texture::resources::Material;
use anim_texture::settings::BakeSettings;
use anim_texture::{AnimTexError, Baker};
use common::{RecordingEvaluator, clip, init_logger};
use glam::Vec4;

/// Run: 1 s @ 10 fps looping. Die: 2 s @ 10 fps one-shot.
fn two_clip_dataset() -> (BakeStore, Arc<AnimationDataset>) {
    let store = BakeStore::default();
    let mut evaluator = RecordingEvaluator::new(
        4,
        vec![clip("Run", 1.0, 10.0, true), clip("Die", 2.0, 10.0, false)],
    );
    let report = Baker::new(&store, BakeSettings::default())
        .bake_all(&mut evaluator)
        .unwrap();
    (store, report.dataset)
}

fn empty_dataset() -> AnimationDataset {
    let evaluator = RecordingEvaluator::new(4, Vec::new());
    AnimationDataset::assemble(&evaluator.mesh(), Vec::new(), &BakeSettings::default())
        .unwrap()
        .dataset
}

// ============================================================================
// Clip Selection
// ============================================================================

#[test]
fn default_params() {
    let state = PlaybackState::new();
    assert_eq!(state.params(), Vec4::new(0.0, 0.0, 1.0, 1.0));
}

#[test]
fn for_dataset_starts_first_clip() {
    let (_store, dataset) = two_clip_dataset();
    let state = PlaybackState::for_dataset(&dataset, 3.0);

    assert_eq!(state.active_clip_index, 0);
    assert_eq!(state.clip_start_time, 3.0);
    assert_eq!(state.anim_length_inv, 1.0);
    assert_eq!(state.is_looping, 1.0);
}

#[test]
fn force_restart_resets_start_time_on_active_clip() {
    let (_store, dataset) = two_clip_dataset();
    let mut state = PlaybackState::for_dataset(&dataset, 1.0);

    assert!(state.select_clip(&dataset, 0, 4.5, true).is_none());
    assert_eq!(state.active_clip_index, 0);
    assert_eq!(state.clip_start_time, 4.5);
}

#[test]
fn reselecting_active_clip_keeps_phase() {
    let (_store, dataset) = two_clip_dataset();
    let mut state = PlaybackState::for_dataset(&dataset, 1.0);

    assert!(state.select_clip(&dataset, 0, 2.25, false).is_none());

    assert_eq!(state.clip_start_time, 1.0);
    assert_eq!(state.current_time, 2.25);
    assert_eq!(state.elapsed(), 1.25);
}

#[test]
fn switching_clip_restarts_and_copies_timing() {
    let (_store, dataset) = two_clip_dataset();
    let mut state = PlaybackState::for_dataset(&dataset, 1.0);

    assert!(state.select_clip(&dataset, 1, 2.0, false).is_none());

    assert_eq!(state.active_clip_index, 1);
    assert_eq!(state.clip_start_time, 2.0);
    assert_eq!(state.anim_length_inv, 0.5);
    assert_eq!(state.is_looping, 0.0);
    assert_eq!(state.params(), Vec4::new(1.0, 2.0, 0.5, 0.0));
}

#[test]
fn index_past_end_clamps_to_last_clip() {
    init_logger();
    let (_store, dataset) = two_clip_dataset();
    let mut state = PlaybackState::for_dataset(&dataset, 0.0);

    let error = state.select_clip(&dataset, 5, 1.0, false);

    assert!(matches!(
        error,
        Some(AnimTexError::ClipIndexOutOfRange { index: 5, clamped: 1, max: 1 })
    ));
    assert!(error.unwrap().is_recoverable());
    assert_eq!(state.active_clip_index, 1);
    assert_eq!(state.clip_start_time, 1.0);
}

#[test]
fn negative_index_clamps_to_first_clip() {
    let (_store, dataset) = two_clip_dataset();
    let mut state = PlaybackState::for_dataset(&dataset, 0.0);
    state.select_clip(&dataset, 1, 0.5, false);

    let error = state.select_clip(&dataset, -2, 1.0, false);

    assert!(matches!(
        error,
        Some(AnimTexError::ClipIndexOutOfRange { index: -2, clamped: 0, .. })
    ));
    assert_eq!(state.active_clip_index, 0);
}

#[test]
fn clamped_onto_active_clip_keeps_phase() {
    let (_store, dataset) = two_clip_dataset();
    let mut state = PlaybackState::for_dataset(&dataset, 0.0);
    state.select_clip(&dataset, 1, 0.5, false);

    let error = state.select_clip(&dataset, 9, 3.0, false);

    assert!(error.is_some());
    assert_eq!(state.active_clip_index, 1);
    assert_eq!(state.clip_start_time, 0.5);
    assert_eq!(state.current_time, 3.0);
}

#[test]
fn dataset_without_clips_only_moves_clock() {
    let dataset = empty_dataset();
    let mut state = PlaybackState::new();

    assert!(state.select_clip(&dataset, 2, 7.0, true).is_none());

    assert_eq!(state.params(), PlaybackState::new().params());
    assert_eq!(state.current_time, 7.0);
}

// ============================================================================
// Time Math
// ============================================================================

#[test]
fn looping_time_wraps() {
    let (_store, dataset) = two_clip_dataset();
    let mut state = PlaybackState::for_dataset(&dataset, 10.0);

    state.advance(12.25);

    assert!((state.normalized_time() - 0.25).abs() < 1e-5);
    assert_eq!(state.frame_row(10), 2);
}

#[test]
fn one_shot_time_holds_last_frame() {
    let (_store, dataset) = two_clip_dataset();
    let mut state = PlaybackState::new();
    state.select_clip(&dataset, 1, 0.0, true);

    state.advance(1.0);
    assert!((state.normalized_time() - 0.5).abs() < 1e-6);

    state.advance(5.0);
    assert_eq!(state.normalized_time(), 1.0);
    assert_eq!(state.frame_row(20), 19);
}

#[test]
fn frame_row_of_empty_clip_is_zero() {
    assert_eq!(PlaybackState::new().frame_row(0), 0);
}

// ============================================================================
// Animated Instance
// ============================================================================

#[test]
fn instance_copies_fallback_and_binds_clips() {
    let (_store, dataset) = two_clip_dataset();
    let instance = AnimatedInstance::new(dataset.clone(), None, 2.0);

    let material = instance.material();
    assert!(!material.is_shared());
    let material = material.get();
    assert_eq!(material.shader, dataset.fallback_material().shader);
    assert_ne!(material.uuid, dataset.fallback_material().uuid);
    assert_eq!(material.texture("positionTexture0"), Some(dataset.clip(0).unwrap().position_texture));
    assert_eq!(material.texture("normalTexture1"), Some(dataset.clip(1).unwrap().normal_texture));
    assert_eq!(material.texture("positionTexture2"), None);
    assert_eq!(material.float("texelSize"), Some(0.25));
    assert_eq!(material.vector("animParams"), Some(Vec4::new(0.0, 2.0, 1.0, 1.0)));
}

#[test]
fn instance_copies_existing_material() {
    let (_store, dataset) = two_clip_dataset();
    let existing = Material::new("crowd/lit").with_name("Soldier");

    let instance = AnimatedInstance::new(dataset, Some(&existing), 0.0);

    let material = instance.material().get();
    assert_eq!(material.shader, "crowd/lit");
    assert_eq!(material.name, "Soldier (Instance)");
    assert_eq!(existing.texture_count(), 0, "source material is left alone");
}

#[test]
fn instances_share_override() {
    let (store, dataset) = two_clip_dataset();
    let handle = store.datasets.handle_for_key(&store.dataset_key(&dataset.mesh_name)).unwrap();
    store
        .set_material_override(handle, Some(Material::new("crowd/shared")))
        .unwrap();
    let dataset = store.dataset(handle).unwrap();

    let mut a = AnimatedInstance::new(dataset.clone(), None, 0.0);
    let b = AnimatedInstance::new(dataset.clone(), Some(&Material::new("ignored")), 0.0);
    a.play(1, 1.0, false);

    assert!(a.material().is_shared());
    assert!(std::ptr::eq(a.material().get(), b.material().get()));
    assert_eq!(a.material().get().vector("animParams"), None);
    assert_eq!(a.instance_data().anim_params, Vec4::new(1.0, 1.0, 0.5, 0.0));
    assert_eq!(b.instance_data().anim_params, Vec4::new(0.0, 0.0, 1.0, 1.0));
}

#[test]
fn play_updates_material_params() {
    let (_store, dataset) = two_clip_dataset();
    let mut instance = AnimatedInstance::new(dataset, None, 0.0);
    let version = instance.material().get().version();

    assert!(instance.play(1, 3.0, false).is_none());

    let material = instance.material().get();
    assert!(material.version() > version);
    assert_eq!(material.vector("animParams"), Some(Vec4::new(1.0, 3.0, 0.5, 0.0)));
}

#[test]
fn play_named_resolves_slot() {
    let (_store, dataset) = two_clip_dataset();
    let mut instance = AnimatedInstance::new(dataset, None, 0.0);

    assert!(instance.play_named("Die", 1.0, false).is_none());
    assert_eq!(instance.playback().active_clip_index, 1);

    let error = instance.play_named("Jump", 2.0, false);
    assert!(matches!(error, Some(AnimTexError::ClipNotFound(_))));
    assert_eq!(instance.playback().active_clip_index, 1);
}

#[test]
fn instance_data_is_gpu_ready() {
    let (_store, dataset) = two_clip_dataset();
    let mut instance = AnimatedInstance::new(dataset, None, 0.5);
    instance.tick(0.75);

    let data = instance.instance_data();
    assert_eq!(data.texel_size, 0.25);
    assert_eq!(bytemuck::bytes_of(&data).len(), std::mem::size_of::<AnimationInstanceData>());
    assert_eq!(std::mem::size_of::<AnimationInstanceData>(), 32);
    assert!(AnimationInstanceData::wgsl_struct_def("InstanceData").contains("anim_params: vec4<f32>"));
    assert_eq!(instance.playback().elapsed(), 0.25);
}

// ============================================================================
// CPU Decoder
// ============================================================================

#[test]
fn decoded_frame_matches_sampled_vertices() {
    let (store, dataset) = two_clip_dataset();
    let frame = decode_frame(&store, dataset.clip(0).unwrap(), 0).unwrap();

    assert_eq!(frame.positions.len(), 4);
    assert_eq!(frame.positions[3], glam::Vec3::new(3.0, 0.0, 0.0));
    assert!(frame.normals.iter().all(|n| *n == glam::Vec3::Z));
}

#[test]
fn time_zero_reads_frame_zero_unfiltered() {
    let (store, dataset) = two_clip_dataset();
    assert_eq!(texture_v(0.0, 10), 0.05);

    let sample = decode_vertex(&store, dataset.clip(0).unwrap(), 2, 0.0).unwrap();
    assert_eq!(sample.position, glam::Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(sample.normal, glam::Vec3::Z);
}

#[test]
fn between_rows_is_interpolated() {
    let (store, dataset) = two_clip_dataset();
    // Half way between frame 0 (t = 0) and frame 1 (t = 0.1)
    let sample = decode_vertex(&store, dataset.clip(0).unwrap(), 1, 0.05).unwrap();
    assert!((sample.position.y - 0.05).abs() < 1e-3, "{}", sample.position.y);
}

#[test]
fn looping_clip_wraps_to_first_row() {
    let (store, dataset) = two_clip_dataset();
    // Half way between frame 9 (t = 0.9) and frame 0 (t = 0)
    let sample = decode_vertex(&store, dataset.clip(0).unwrap(), 1, 0.95).unwrap();
    assert!((sample.position.y - 0.45).abs() < 1e-3, "{}", sample.position.y);
}

#[test]
fn one_shot_clip_holds_final_row() {
    let (store, dataset) = two_clip_dataset();
    // 20 rows, last at t = 1.9
    let sample = decode_vertex(&store, dataset.clip(1).unwrap(), 1, 1.0).unwrap();
    assert!((sample.position.y - 1.9).abs() < 2e-3, "{}", sample.position.y);
}

#[test]
fn decode_rejects_vertex_outside_texture() {
    let (store, dataset) = two_clip_dataset();
    let err = decode_vertex(&store, dataset.clip(0).unwrap(), 4, 0.0).unwrap_err();
    assert!(matches!(err, AnimTexError::VertexCountMismatch { expected: 4, .. }));
}

#[test]
fn decode_playback_follows_state() {
    let (store, dataset) = two_clip_dataset();
    let mut state = PlaybackState::for_dataset(&dataset, 0.0);
    state.advance(0.3);

    let sample = decode_playback(&store, &dataset, &state, 0).unwrap();
    assert!((sample.position.y - 0.3).abs() < 1e-3, "{}", sample.position.y);
}
