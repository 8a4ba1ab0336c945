//! Shared test fixtures.

#![allow(dead_code)]

use anim_texture::animation::{
    AnimationEvaluator, Bone, BoneChannel, ClipInfo, InterpolationMode, KeyframeTrack, MeshInfo,
    Skeleton, SkeletalClip, SkinnedEvaluator, SkinnedMesh, VertexFrame,
};
use anim_texture::resources::MeshHandle;
use glam::{Quat, Vec3};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Evaluator with analytic vertex motion that records every call.
///
/// Vertex `v` at time `t` sits at `(v, t, 0)`; its normal is `+Z`.
pub struct RecordingEvaluator {
    pub mesh: MeshInfo,
    pub clips: Vec<ClipInfo>,
    pub enabled: bool,
    /// `(clip name, time, enabled while sampling)`
    pub samples: Vec<(String, f32, bool)>,
    /// Return this many vertices instead of the mesh's count.
    pub vertex_override: Option<usize>,
}

impl RecordingEvaluator {
    pub fn new(vertex_count: usize, clips: Vec<ClipInfo>) -> Self {
        Self {
            mesh: MeshInfo {
                name: "Crowd".to_string(),
                handle: MeshHandle::new("Crowd"),
                vertex_count,
            },
            clips,
            enabled: true,
            samples: Vec::new(),
            vertex_override: None,
        }
    }

    pub fn times_for(&self, clip: &str) -> Vec<f32> {
        self.samples
            .iter()
            .filter(|(name, _, _)| name == clip)
            .map(|(_, t, _)| *t)
            .collect()
    }
}

impl AnimationEvaluator for RecordingEvaluator {
    fn mesh(&self) -> MeshInfo {
        self.mesh.clone()
    }

    fn clips(&self) -> Vec<ClipInfo> {
        self.clips.clone()
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn sample(&mut self, clip: &ClipInfo, time: f32) -> VertexFrame {
        self.samples.push((clip.name.clone(), time, self.enabled));
        let count = self.vertex_override.unwrap_or(self.mesh.vertex_count);
        VertexFrame {
            positions: (0..count).map(|v| Vec3::new(v as f32, time, 0.0)).collect(),
            normals: vec![Vec3::Z; count],
        }
    }
}

pub fn clip(name: &str, length: f32, frame_rate: f32, is_looping: bool) -> ClipInfo {
    ClipInfo::new(name, length, frame_rate, is_looping)
}

/// Two-bone arm: root at the origin, elbow at `+Y`, bending 90° about Z over one second.
///
/// Vertex 0 is bound to the root, vertex 1 to the elbow, vertex 2 half to each.
pub fn bending_arm() -> SkinnedEvaluator {
    let skeleton = Skeleton::new(vec![
        Bone::new("root", None, Vec3::ZERO),
        Bone::new("elbow", Some(0), Vec3::Y),
    ]);

    let mesh = SkinnedMesh::new(
        "Arm",
        vec![Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
        vec![Vec3::X; 3],
        vec![[0, 0, 0, 0], [1, 0, 0, 0], [0, 1, 0, 0]],
        vec![[1.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0], [0.5, 0.5, 0.0, 0.0]],
    );

    let bend = BoneChannel::new(1).with_rotation(KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Quat::IDENTITY, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)],
        InterpolationMode::Linear,
    ));
    let rise = BoneChannel::new(0).with_translation(KeyframeTrack::new(
        vec![0.0, 0.5],
        vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)],
        InterpolationMode::Linear,
    ));

    SkinnedEvaluator::new(
        skeleton,
        mesh,
        vec![
            SkeletalClip::new("Bend", 30.0, true, vec![bend]),
            SkeletalClip::new("Rise", 24.0, false, vec![rise]),
        ],
    )
}
