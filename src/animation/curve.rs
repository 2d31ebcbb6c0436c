use glam::{Quat, Vec2, Vec3, Vec4};

use crate::animation::values::{AnimatedValue, Interpolatable};
use crate::errors::{EidolonError, Result};
use crate::scene::material::ResourceHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

/// How many segments a cursor probe walks before falling back to binary
/// search. Playback normally advances one segment at a time, so a short
/// bounded scan keeps sequential sampling O(1).
const CURSOR_SCAN_LIMIT: usize = 3;

/// Remembers the segment a curve was last sampled in.
///
/// One cursor per (curve, playback) pair; sharing a cursor across playbacks
/// defeats the optimization but stays correct.
#[derive(Debug, Clone, Default)]
pub struct CurveCursor {
    pub last_index: usize,
}

/// A typed keyframe curve: sorted key times plus values, with one
/// interpolation mode for the whole curve.
///
/// For `CubicSpline`, `values` holds `[in_tangent, value, out_tangent]` per
/// key, so `values.len() == times.len() * 3`.
///
/// Invariants (caller contract, validated by [`KeyframeCurve::try_new`]):
/// keys sorted ascending by time; duplicate times allowed, first wins.
/// Sampling outside the key range clamps to the first/last key.
#[derive(Debug, Clone)]
pub struct KeyframeCurve<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeCurve<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Validating constructor for data from untrusted authoring paths.
    pub fn try_new(
        times: Vec<f32>,
        values: Vec<T>,
        interpolation: InterpolationMode,
    ) -> Result<Self> {
        if times.is_empty() {
            return Err(EidolonError::EmptyCurve);
        }
        let (expected, context) = match interpolation {
            InterpolationMode::CubicSpline => (
                times.len() * 3,
                "expected [in_tangent, value, out_tangent] per key",
            ),
            _ => (times.len(), "expected one value per key"),
        };
        if values.len() != expected {
            return Err(EidolonError::CurveDataMismatch {
                times: times.len(),
                values: values.len(),
                context,
            });
        }
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(EidolonError::UnsortedKeyTimes(i + 1));
        }
        Ok(Self::new(times, values, interpolation))
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.times.len()
    }

    /// Time of the last key, or 0.0 for an empty curve.
    #[inline]
    #[must_use]
    pub fn last_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Samples the curve at `time`. Returns `None` for an empty curve.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }
        Some(self.eval_segment(self.locate(time), time))
    }

    /// Cursor-accelerated sampling: probes a few segments around the last
    /// sampled position before falling back to binary search, so sequential
    /// playback stays O(1) per frame.
    #[must_use]
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut CurveCursor) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }
        let len = self.times.len();
        if len == 1 {
            return Some(*self.value_at(0));
        }

        let index = self
            .probe_near(time, cursor.last_index)
            .unwrap_or_else(|| self.locate(time));
        cursor.last_index = index;

        Some(self.eval_segment(index, time))
    }

    /// Binary search for the left key of the segment containing `time`.
    fn locate(&self, time: f32) -> usize {
        // partition_point yields the first key strictly after `time`
        let next = self.times.partition_point(|&t| t <= time);
        next.saturating_sub(1)
    }

    /// Bounded scan around a previous sample position. `None` means the jump
    /// was too large and the caller should binary-search.
    fn probe_near(&self, time: f32, start: usize) -> Option<usize> {
        let len = self.times.len();
        // A stale cursor (curve swapped under it) restarts from key 0.
        let anchor = self.times.get(start).copied().unwrap_or(self.times[0]);

        if time >= anchor {
            // Forward: normal playback direction
            for offset in 0..=CURSOR_SCAN_LIMIT {
                let idx = start + offset;
                if idx >= len - 1 {
                    return (time >= self.times[len - 1]).then_some(len - 1);
                }
                if time < self.times[idx + 1] {
                    return Some(idx);
                }
            }
        } else {
            // Backward: reverse playback or a small loop reset
            for offset in 0..=CURSOR_SCAN_LIMIT {
                if start < offset {
                    break;
                }
                let idx = start - offset;
                if time >= self.times[idx] {
                    return Some(idx);
                }
            }
        }
        None
    }

    /// Value of key `index`, accounting for the cubic tangent layout.
    #[inline]
    fn value_at(&self, index: usize) -> &T {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            _ => &self.values[index],
        }
    }

    /// Interpolates within the segment starting at key `index`.
    fn eval_segment(&self, index: usize, time: f32) -> T {
        let len = self.times.len();
        if index >= len - 1 {
            // At or beyond the last key
            return *self.value_at(len - 1);
        }

        let next = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next];
        let dt = t1 - t0;

        // Degenerate interval guard (duplicate key times)
        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => *self.value_at(index),
            InterpolationMode::Linear => {
                T::interpolate_linear(*self.value_at(index), *self.value_at(next), t)
            }
            InterpolationMode::CubicSpline => {
                let k0 = index * 3;
                let k1 = next * 3;

                let v0 = self.values[k0 + 1];
                let out_tangent0 = self.values[k0 + 2];
                let in_tangent1 = self.values[k1];
                let v1 = self.values[k1 + 1];

                T::interpolate_cubic(v0, out_tangent0, in_tangent1, v1, t, dt)
            }
        }
    }
}

/// A curve over resource identity (sprite frames, texture swaps).
///
/// Always Step: reference identity is never interpolated. Sampling returns
/// the key most recently passed, clamping to the first key before the range.
#[derive(Debug, Clone)]
pub struct ReferenceCurve {
    pub times: Vec<f32>,
    pub values: Vec<ResourceHandle>,
}

impl ReferenceCurve {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<ResourceHandle>) -> Self {
        Self { times, values }
    }

    pub fn try_new(times: Vec<f32>, values: Vec<ResourceHandle>) -> Result<Self> {
        if times.is_empty() {
            return Err(EidolonError::EmptyCurve);
        }
        if values.len() != times.len() {
            return Err(EidolonError::CurveDataMismatch {
                times: times.len(),
                values: values.len(),
                context: "expected one handle per key",
            });
        }
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(EidolonError::UnsortedKeyTimes(i + 1));
        }
        Ok(Self::new(times, values))
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn last_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn sample(&self, time: f32) -> Option<ResourceHandle> {
        if self.times.is_empty() {
            return None;
        }
        let next = self.times.partition_point(|&t| t <= time);
        Some(self.values[next.saturating_sub(1)])
    }
}

/// The tagged union over every curve value type.
///
/// The tag is fixed when the curve is authored, so per-frame sampling is a
/// single enum dispatch into a statically typed evaluator.
#[derive(Debug, Clone)]
pub enum CurveData {
    Float(KeyframeCurve<f32>),
    Vector2(KeyframeCurve<Vec2>),
    Vector3(KeyframeCurve<Vec3>),
    Vector4(KeyframeCurve<Vec4>),
    Quaternion(KeyframeCurve<Quat>),
    Color(KeyframeCurve<Vec4>),
    Reference(ReferenceCurve),
}

impl CurveData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CurveData::Float(c) => c.is_empty(),
            CurveData::Vector2(c) => c.is_empty(),
            CurveData::Vector3(c) => c.is_empty(),
            CurveData::Vector4(c) | CurveData::Color(c) => c.is_empty(),
            CurveData::Quaternion(c) => c.is_empty(),
            CurveData::Reference(c) => c.is_empty(),
        }
    }

    /// Time of the last key across the underlying curve.
    #[must_use]
    pub fn last_time(&self) -> f32 {
        match self {
            CurveData::Float(c) => c.last_time(),
            CurveData::Vector2(c) => c.last_time(),
            CurveData::Vector3(c) => c.last_time(),
            CurveData::Vector4(c) | CurveData::Color(c) => c.last_time(),
            CurveData::Quaternion(c) => c.last_time(),
            CurveData::Reference(c) => c.last_time(),
        }
    }

    /// Samples the curve, tagging the result. `None` for empty curves.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<AnimatedValue> {
        let mut cursor = CurveCursor::default();
        self.sample_with_cursor(time, &mut cursor)
    }

    /// Cursor-accelerated sampling. Reference curves ignore the cursor
    /// (their lookup is already a single binary search).
    #[must_use]
    pub fn sample_with_cursor(
        &self,
        time: f32,
        cursor: &mut CurveCursor,
    ) -> Option<AnimatedValue> {
        match self {
            CurveData::Float(c) => c.sample_with_cursor(time, cursor).map(AnimatedValue::Float),
            CurveData::Vector2(c) => c
                .sample_with_cursor(time, cursor)
                .map(AnimatedValue::Vector2),
            CurveData::Vector3(c) => c
                .sample_with_cursor(time, cursor)
                .map(AnimatedValue::Vector3),
            CurveData::Vector4(c) => c
                .sample_with_cursor(time, cursor)
                .map(AnimatedValue::Vector4),
            CurveData::Quaternion(c) => c
                .sample_with_cursor(time, cursor)
                .map(AnimatedValue::Quaternion),
            CurveData::Color(c) => c.sample_with_cursor(time, cursor).map(AnimatedValue::Color),
            CurveData::Reference(c) => c.sample(time).map(AnimatedValue::Reference),
        }
    }
}
