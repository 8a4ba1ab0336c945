use glam::{Quat, Vec3};

use crate::animation::evaluator::ClipInfo;
use crate::animation::tracks::KeyframeTrack;

/// Keyframes driving one bone's local transform.
///
/// Channels left as `None` keep the bone's bind-pose value.
#[derive(Debug, Clone)]
pub struct BoneChannel {
    pub bone: usize,
    pub translation: Option<KeyframeTrack<Vec3>>,
    pub rotation: Option<KeyframeTrack<Quat>>,
    pub scale: Option<KeyframeTrack<Vec3>>,
}

impl BoneChannel {
    #[must_use]
    pub fn new(bone: usize) -> Self {
        Self {
            bone,
            translation: None,
            rotation: None,
            scale: None,
        }
    }

    #[must_use]
    pub fn with_translation(mut self, track: KeyframeTrack<Vec3>) -> Self {
        self.translation = Some(track);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, track: KeyframeTrack<Quat>) -> Self {
        self.rotation = Some(track);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, track: KeyframeTrack<Vec3>) -> Self {
        self.scale = Some(track);
        self
    }

    fn end_time(&self) -> f32 {
        let t = self.translation.as_ref().map_or(0.0, KeyframeTrack::end_time);
        let r = self.rotation.as_ref().map_or(0.0, KeyframeTrack::end_time);
        let s = self.scale.as_ref().map_or(0.0, KeyframeTrack::end_time);
        t.max(r).max(s)
    }
}

#[derive(Debug, Clone)]
pub struct SkeletalClip {
    pub name: String,
    /// Seconds; derived from the last keyframe across all channels.
    pub duration: f32,
    pub frame_rate: f32,
    pub is_looping: bool,
    pub channels: Vec<BoneChannel>,
}

impl SkeletalClip {
    #[must_use]
    pub fn new(name: impl Into<String>, frame_rate: f32, is_looping: bool, channels: Vec<BoneChannel>) -> Self {
        let duration = channels
            .iter()
            .map(BoneChannel::end_time)
            .fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            frame_rate,
            is_looping,
            channels,
        }
    }

    #[must_use]
    pub fn info(&self) -> ClipInfo {
        ClipInfo::new(self.name.clone(), self.duration, self.frame_rate, self.is_looping)
    }
}
