//! Offline linear-blend-skinning evaluator.
//!
//! A self-contained [`AnimationEvaluator`] for baking without a host engine:
//! a bone hierarchy, a bind-pose mesh with up to four joint influences per
//! vertex, and keyframed [`SkeletalClip`]s.

use glam::{Mat4, Quat, Vec3};

use crate::animation::clip::SkeletalClip;
use crate::animation::evaluator::{AnimationEvaluator, ClipInfo, MeshInfo, VertexFrame};
use crate::animation::tracks::KeyframeCursor;
use crate::resources::mesh::MeshHandle;

#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    /// Must precede this bone in the skeleton.
    pub parent: Option<usize>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Bone {
    #[must_use]
    pub fn new(name: impl Into<String>, parent: Option<usize>, translation: Vec3) -> Self {
        Self {
            name: name.into(),
            parent,
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Debug, Clone)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
    /// Mesh space -> bone space at bind time.
    inverse_bind_matrices: Vec<Mat4>,
}

impl Skeleton {
    /// Builds the skeleton and derives inverse bind matrices from the bones' rest pose.
    #[must_use]
    pub fn new(bones: Vec<Bone>) -> Self {
        debug_assert!(
            bones
                .iter()
                .enumerate()
                .all(|(i, b)| b.parent.is_none_or(|p| p < i)),
            "bone parents must precede their children"
        );
        let locals: Vec<Mat4> = bones.iter().map(Bone::local_matrix).collect();
        let inverse_bind_matrices = Self::resolve_globals(&bones, &locals)
            .iter()
            .map(Mat4::inverse)
            .collect();
        Self {
            bones,
            inverse_bind_matrices,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    fn resolve_globals(bones: &[Bone], locals: &[Mat4]) -> Vec<Mat4> {
        let mut globals: Vec<Mat4> = Vec::with_capacity(locals.len());
        for (i, local) in locals.iter().enumerate() {
            let global = match bones[i].parent {
                Some(p) if p < i => globals[p] * *local,
                _ => *local,
            };
            globals.push(global);
        }
        globals
    }
}

/// Bind-pose mesh data with per-vertex joint influences.
#[derive(Debug, Clone)]
pub struct SkinnedMesh {
    pub name: String,
    pub handle: MeshHandle,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub joints: Vec<[u16; 4]>,
    pub weights: Vec<[f32; 4]>,
}

impl SkinnedMesh {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        joints: Vec<[u16; 4]>,
        weights: Vec<[f32; 4]>,
    ) -> Self {
        let name = name.into();
        Self {
            handle: MeshHandle::new(&name),
            name,
            positions,
            normals,
            joints,
            weights,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

pub struct SkinnedEvaluator {
    pub skeleton: Skeleton,
    pub mesh: SkinnedMesh,
    pub clips: Vec<SkeletalClip>,

    enabled: bool,
    /// Clock of the live driver; only advances while enabled.
    live_time: f32,
    live_clip: usize,

    // Per-channel cursors of the clip sampled last.
    cursors: Vec<[KeyframeCursor; 3]>,
    cursor_clip: Option<usize>,
}

impl SkinnedEvaluator {
    #[must_use]
    pub fn new(skeleton: Skeleton, mesh: SkinnedMesh, clips: Vec<SkeletalClip>) -> Self {
        Self {
            skeleton,
            mesh,
            clips,
            enabled: true,
            live_time: 0.0,
            live_clip: 0,
            cursors: Vec::new(),
            cursor_clip: None,
        }
    }

    #[must_use]
    pub fn live_time(&self) -> f32 {
        self.live_time
    }

    /// Advances the live driver, as the host would every frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        self.live_time += dt;
        if let Some(clip) = self.clips.get(self.live_clip)
            && clip.is_looping
            && clip.duration > 0.0
        {
            self.live_time %= clip.duration;
        }
    }

    pub fn play_live(&mut self, clip_index: usize) {
        self.live_clip = clip_index.min(self.clips.len().saturating_sub(1));
        self.live_time = 0.0;
    }

    /// Skinning matrices (`global * inverse_bind`) for `clip` at `time`.
    fn joint_matrices(&mut self, clip_index: usize, time: f32) -> Vec<Mat4> {
        let clip = &self.clips[clip_index];
        if self.cursor_clip != Some(clip_index) {
            self.cursors = vec![Default::default(); clip.channels.len()];
            self.cursor_clip = Some(clip_index);
        }

        let mut pose: Vec<Bone> = self.skeleton.bones.clone();
        for (channel, cursors) in clip.channels.iter().zip(self.cursors.iter_mut()) {
            let Some(bone) = pose.get_mut(channel.bone) else {
                continue;
            };
            let [t_cursor, r_cursor, s_cursor] = cursors;
            if let Some(v) = channel.translation.as_ref().and_then(|t| t.sample_with_cursor(time, t_cursor)) {
                bone.translation = v;
            }
            if let Some(q) = channel.rotation.as_ref().and_then(|t| t.sample_with_cursor(time, r_cursor)) {
                bone.rotation = q.normalize();
            }
            if let Some(s) = channel.scale.as_ref().and_then(|t| t.sample_with_cursor(time, s_cursor)) {
                bone.scale = s;
            }
        }

        let locals: Vec<Mat4> = pose.iter().map(Bone::local_matrix).collect();
        Skeleton::resolve_globals(&pose, &locals)
            .into_iter()
            .zip(&self.skeleton.inverse_bind_matrices)
            .map(|(global, inverse_bind)| global * *inverse_bind)
            .collect()
    }

    fn skin(&self, joint_matrices: &[Mat4]) -> VertexFrame {
        let mesh = &self.mesh;
        let mut frame = VertexFrame::with_capacity(mesh.vertex_count());

        for (v, (&position, &normal)) in mesh.positions.iter().zip(&mesh.normals).enumerate() {
            let joints = mesh.joints.get(v).copied().unwrap_or([0; 4]);
            let weights = mesh.weights.get(v).copied().unwrap_or([1.0, 0.0, 0.0, 0.0]);

            let mut skin = Mat4::ZERO;
            let mut total = 0.0;
            for (&joint, &weight) in joints.iter().zip(&weights) {
                if weight <= 0.0 {
                    continue;
                }
                if let Some(m) = joint_matrices.get(joint as usize) {
                    skin += *m * weight;
                    total += weight;
                }
            }
            if total <= 0.0 {
                skin = Mat4::IDENTITY;
            } else if (total - 1.0).abs() > 1e-4 {
                skin *= 1.0 / total;
            }

            frame.positions.push(skin.transform_point3(position));
            frame.normals.push(skin.transform_vector3(normal).normalize_or_zero());
        }
        frame
    }
}

impl AnimationEvaluator for SkinnedEvaluator {
    fn mesh(&self) -> MeshInfo {
        MeshInfo {
            name: self.mesh.name.clone(),
            handle: self.mesh.handle.clone(),
            vertex_count: self.mesh.vertex_count(),
        }
    }

    fn clips(&self) -> Vec<ClipInfo> {
        self.clips.iter().map(SkeletalClip::info).collect()
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn sample(&mut self, clip: &ClipInfo, time: f32) -> VertexFrame {
        let Some(index) = self.clips.iter().position(|c| c.name == clip.name) else {
            log::warn!("SkinnedEvaluator: unknown clip '{}', returning bind pose", clip.name);
            return VertexFrame {
                positions: self.mesh.positions.clone(),
                normals: self.mesh.normals.clone(),
            };
        };
        let joint_matrices = self.joint_matrices(index, time);
        self.skin(&joint_matrices)
    }
}
