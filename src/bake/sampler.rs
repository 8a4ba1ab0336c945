use glam::Vec3;

use crate::animation::evaluator::{AnimationEvaluator, ClipInfo, EvaluatorPause};
use crate::errors::{AnimTexError, Result};
use crate::settings::{BakeSettings, MAX_FRAME_COUNT};

/// Per-frame vertex data of one clip, shaped `[frame_count][vertex_count]`.
#[derive(Debug, Clone)]
pub struct SampledClip {
    pub info: ClipInfo,
    /// Stepping rate: the clip's rate rounded up to a whole number.
    pub frame_rate: u32,
    pub frame_count: u32,
    pub vertex_count: usize,
    pub positions: Vec<Vec<Vec3>>,
    pub normals: Vec<Vec<Vec3>>,
}

/// Finds `name` among `clips`. An empty name selects the first clip.
pub fn resolve_clip(clips: &[ClipInfo], name: &str) -> Result<ClipInfo> {
    if clips.is_empty() {
        return Err(AnimTexError::NoClipsAvailable);
    }
    let found = if name.is_empty() {
        clips.first()
    } else {
        clips.iter().find(|c| c.name == name)
    };
    found
        .cloned()
        .ok_or_else(|| AnimTexError::ClipNotFound(name.to_string()))
}

/// `(frame_rate, frame_count)` for a clip.
///
/// `frame_rate = ceil(rate)`, `frame_count = ceil(length × frame_rate)`, plus one
/// row when the final pose is sampled separately. A clip taller than
/// [`MAX_FRAME_COUNT`] rows is rejected before anything is allocated.
pub fn frame_layout(info: &ClipInfo, sample_final_frame: bool) -> Result<(u32, u32)> {
    let frame_rate = info.frame_rate.ceil();
    let frame_count = (info.length * frame_rate).ceil();

    // Also rejects NaN
    if !(frame_rate >= 1.0 && frame_count >= 1.0) {
        return Err(AnimTexError::EmptyClip {
            clip: info.name.clone(),
            length: info.length,
            frame_rate: info.frame_rate,
        });
    }

    let extra = u32::from(sample_final_frame);
    if frame_count > (MAX_FRAME_COUNT - extra) as f32 {
        return Err(AnimTexError::TooManyFrames {
            clip: info.name.clone(),
            frames: frame_count + extra as f32,
            max: MAX_FRAME_COUNT,
        });
    }

    Ok((frame_rate as u32, frame_count as u32 + extra))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSampler {
    pub sample_final_frame: bool,
}

impl FrameSampler {
    #[must_use]
    pub fn new(settings: &BakeSettings) -> Self {
        Self {
            sample_final_frame: settings.sample_final_frame,
        }
    }

    /// Sample times in seconds, starting at 0 and stepping by `1 / frame_rate`.
    ///
    /// Without final-frame sampling `clip.length` itself is never sampled: a
    /// looping clip's last authored pose is taken to repeat frame 0.
    #[must_use]
    pub fn sample_times(&self, info: &ClipInfo, frame_rate: u32, frame_count: u32) -> Vec<f32> {
        let regular = frame_count - u32::from(self.sample_final_frame);
        let mut times: Vec<f32> = (0..regular).map(|i| i as f32 / frame_rate as f32).collect();
        if self.sample_final_frame {
            times.push(info.length);
        }
        times
    }

    /// Drives `evaluator` through `clip_name` and collects every frame.
    ///
    /// The evaluator's live driver is switched off while sampling and restored
    /// afterwards, error paths included.
    pub fn sample<E>(&self, evaluator: &mut E, clip_name: &str) -> Result<SampledClip>
    where
        E: AnimationEvaluator + ?Sized,
    {
        let info = resolve_clip(&evaluator.clips(), clip_name)?;
        let (frame_rate, frame_count) = frame_layout(&info, self.sample_final_frame)?;
        let vertex_count = evaluator.mesh().vertex_count;

        let mut positions = Vec::with_capacity(frame_count as usize);
        let mut normals = Vec::with_capacity(frame_count as usize);

        let mut evaluator = EvaluatorPause::new(evaluator);
        for (frame, time) in self.sample_times(&info, frame_rate, frame_count).into_iter().enumerate() {
            let sampled = evaluator.sample(&info, time);

            let found = if sampled.positions.len() == vertex_count {
                sampled.normals.len()
            } else {
                sampled.positions.len()
            };
            if found != vertex_count {
                return Err(AnimTexError::VertexCountMismatch {
                    context: format!("{} frame {frame}", info.name),
                    expected: vertex_count,
                    found,
                });
            }

            positions.push(sampled.positions);
            normals.push(sampled.normals);
        }
        drop(evaluator);

        log::debug!(
            "Sampled clip '{}': {frame_count} frames at {frame_rate} fps, {vertex_count} vertices",
            info.name
        );

        Ok(SampledClip {
            info,
            frame_rate,
            frame_count,
            vertex_count,
            positions,
            normals,
        })
    }
}
