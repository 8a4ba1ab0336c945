use glam::Vec4;

use crate::data::AnimationDataset;
use crate::errors::AnimTexError;

/// Per-instance clip selection and clock.
///
/// The shader reads [`params`](Self::params) and derives the frame row from
/// `now - clip_start_time`; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub active_clip_index: usize,
    /// Clock value at which the active clip last (re)started.
    pub clip_start_time: f32,
    pub anim_length_inv: f32,
    pub is_looping: f32,
    /// Clock value of the last `select_clip` or `advance` call.
    pub current_time: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            active_clip_index: 0,
            clip_start_time: 0.0,
            anim_length_inv: 1.0,
            is_looping: 1.0,
            current_time: 0.0,
        }
    }
}

impl PlaybackState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State playing clip 0 of `dataset` from `now`.
    pub fn for_dataset(dataset: &AnimationDataset, now: f32) -> Self {
        let mut state = Self::default();
        state.select_clip(dataset, 0, now, true);
        state
    }

    /// Switches to clip `index`, or re-syncs the clock if it is already active.
    ///
    /// An index outside the dataset's slots is clamped into range and the
    /// returned `ClipIndexOutOfRange` describes the correction; playback
    /// continues either way.
    pub fn select_clip(
        &mut self,
        dataset: &AnimationDataset,
        index: i32,
        now: f32,
        force_restart: bool,
    ) -> Option<AnimTexError> {
        self.current_time = now;

        let Some(max) = dataset.max_clip_index() else {
            log::warn!("Dataset '{}' has no clips, keeping playback state", dataset.mesh_name);
            return None;
        };

        let clamped = usize::try_from(index).unwrap_or(0).min(max);
        let error = (index < 0 || index as usize != clamped).then(|| {
            let error = AnimTexError::ClipIndexOutOfRange { index, clamped, max };
            log::error!("{error} ({})", dataset.mesh_name);
            error
        });

        if force_restart || clamped != self.active_clip_index {
            if let Some(clip) = dataset.clip(clamped) {
                self.active_clip_index = clamped;
                self.clip_start_time = now;
                self.anim_length_inv = clip.animation_length_inv();
                self.is_looping = clip.is_looping;
            }
        }

        error
    }

    /// Refreshes the clock without touching the clip's phase origin.
    pub fn advance(&mut self, now: f32) {
        self.current_time = now;
    }

    /// `(clip index, clip start time, 1 / animation length, is looping)`.
    #[must_use]
    pub fn params(&self) -> Vec4 {
        Vec4::new(
            self.active_clip_index as f32,
            self.clip_start_time,
            self.anim_length_inv,
            self.is_looping,
        )
    }

    #[must_use]
    pub fn looping(&self) -> bool {
        self.is_looping > 0.5
    }

    /// Seconds since the active clip started.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.current_time - self.clip_start_time
    }

    /// V texture coordinate of the current frame: wraps when looping, holds the
    /// end pose otherwise.
    #[must_use]
    pub fn normalized_time(&self) -> f32 {
        let t = self.elapsed() * self.anim_length_inv;
        if self.looping() {
            t.rem_euclid(1.0)
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    /// Baked frame row nearest below the current time.
    #[must_use]
    pub fn frame_row(&self, frame_count: u32) -> u32 {
        if frame_count == 0 {
            return 0;
        }
        let row = (self.normalized_time() * frame_count as f32).floor() as u32;
        row.min(frame_count - 1)
    }
}
