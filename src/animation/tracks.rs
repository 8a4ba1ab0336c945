use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
}

/// Forward scan distance tried before falling back to binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last keyframe interval a track was sampled in.
///
/// Baking walks a clip with monotonically increasing time, so the next lookup
/// almost always lands in the same or the following interval.
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// `times` must be sorted ascending and match `values` in length.
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        debug_assert_eq!(times.len(), values.len(), "keyframe times/values length differ");
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Time of the last keyframe, or 0 for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Samples without a cursor. Returns `None` for an empty track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        let mut cursor = KeyframeCursor::default();
        self.sample_with_cursor(time, &mut cursor)
    }

    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.times.len().min(self.values.len());
        match len {
            0 => return None,
            1 => return Some(self.values[0]),
            _ => {}
        }

        let index = self
            .scan_forward(time, cursor.last_index, len)
            .unwrap_or_else(|| self.times[..len].partition_point(|&t| t <= time).saturating_sub(1));
        cursor.last_index = index;

        Some(self.sample_at(index, time, len))
    }

    /// Looks for the interval containing `time` a few steps ahead of `start`.
    fn scan_forward(&self, time: f32, start: usize, len: usize) -> Option<usize> {
        if start >= len || time < self.times[start] {
            return None;
        }
        for idx in start..=(start + MAX_SCAN_OFFSET) {
            if idx >= len - 1 {
                return Some(len - 1);
            }
            if time < self.times[idx + 1] {
                return Some(idx);
            }
        }
        None
    }

    fn sample_at(&self, index: usize, time: f32, len: usize) -> T {
        if index >= len - 1 {
            return self.values[len - 1];
        }
        let t0 = self.times[index];
        let t1 = self.times[index + 1];
        let span = t1 - t0;
        let t = if span > 1e-6 { ((time - t0) / span).clamp(0.0, 1.0) } else { 0.0 };

        match self.interpolation {
            InterpolationMode::Step => self.values[index],
            InterpolationMode::Linear => {
                T::interpolate_linear(self.values[index], self.values[index + 1], t)
            }
        }
    }
}
