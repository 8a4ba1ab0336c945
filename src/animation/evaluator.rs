use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::resources::mesh::MeshHandle;

/// Description of one clip the evaluator can play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipInfo {
    pub name: String,
    /// Authored length in seconds.
    pub length: f32,
    /// Authored sample rate; may be fractional.
    pub frame_rate: f32,
    pub is_looping: bool,
}

impl ClipInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, length: f32, frame_rate: f32, is_looping: bool) -> Self {
        Self {
            name: name.into(),
            length,
            frame_rate,
            is_looping,
        }
    }
}

/// Identity of the deformed mesh the evaluator writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshInfo {
    pub name: String,
    pub handle: MeshHandle,
    pub vertex_count: usize,
}

/// Deformed vertex data of the mesh after evaluation, in mesh-local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexFrame {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl VertexFrame {
    #[must_use]
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
        }
    }
}

/// Host animation system driving a deformable mesh.
///
/// Evaluating a clip writes into shared mesh state, so the bake disables the
/// live driver through [`set_enabled`](Self::set_enabled) while it samples and
/// restores it afterwards.
pub trait AnimationEvaluator {
    fn mesh(&self) -> MeshInfo;

    /// Clips in their authored order.
    fn clips(&self) -> Vec<ClipInfo>;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Poses the mesh with `clip` at `time` seconds and reads back its vertices.
    fn sample(&mut self, clip: &ClipInfo, time: f32) -> VertexFrame;
}

/// Keeps an evaluator's live driver switched off for the guard's lifetime.
///
/// The previous enable state is restored on drop, including when sampling
/// bails out early with an error.
pub struct EvaluatorPause<'a, E: AnimationEvaluator + ?Sized> {
    evaluator: &'a mut E,
    was_enabled: bool,
}

impl<'a, E: AnimationEvaluator + ?Sized> EvaluatorPause<'a, E> {
    pub fn new(evaluator: &'a mut E) -> Self {
        let was_enabled = evaluator.is_enabled();
        evaluator.set_enabled(false);
        Self {
            evaluator,
            was_enabled,
        }
    }
}

impl<E: AnimationEvaluator + ?Sized> std::ops::Deref for EvaluatorPause<'_, E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl<E: AnimationEvaluator + ?Sized> std::ops::DerefMut for EvaluatorPause<'_, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

impl<E: AnimationEvaluator + ?Sized> Drop for EvaluatorPause<'_, E> {
    fn drop(&mut self) {
        self.evaluator.set_enabled(self.was_enabled);
    }
}
