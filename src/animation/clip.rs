use smallvec::SmallVec;
use std::sync::Arc;
use uuid::Uuid;

use crate::animation::binding::TargetProperty;
use crate::animation::curve::CurveData;

/// Associates a curve with the scene property it drives.
///
/// `relative_path` is a `/`-separated node-name path resolved against the
/// animated root entity at bind time; an empty path targets the root itself.
#[derive(Debug, Clone)]
pub struct CurveBinding {
    pub relative_path: String,
    pub property: TargetProperty,
    pub curve: CurveData,
}

/// A parameter carried by an [`AnimationEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Str(String),
}

/// A timed event on a clip, fired once per playthrough when the sampled
/// time crosses `time` (in either playback direction).
#[derive(Debug, Clone)]
pub struct AnimationEvent {
    pub time: f32,
    pub name: String,
    pub params: SmallVec<[EventValue; 2]>,
}

impl AnimationEvent {
    #[must_use]
    pub fn new(time: f32, name: impl Into<String>) -> Self {
        Self {
            time,
            name: name.into(),
            params: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_params(
        time: f32,
        name: impl Into<String>,
        params: impl IntoIterator<Item = EventValue>,
    ) -> Self {
        Self {
            time,
            name: name.into(),
            params: params.into_iter().collect(),
        }
    }
}

/// A named, fixed-duration bundle of curve bindings plus timed events.
///
/// Clips are authored once, then shared by reference across any number of
/// animator states (`Arc<AnimationClip>`); curve data is only read during
/// playback. Mutating a clip while an animator is sampling it is a caller
/// contract violation and is not runtime-checked.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    explicit_length: Option<f32>,
    curve_bindings: Vec<CurveBinding>,
    events: Vec<AnimationEvent>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            explicit_length: None,
            curve_bindings: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Creates a clip with a generated unique name, for loaders that have
    /// none to offer.
    #[must_use]
    pub fn with_generated_name() -> Self {
        Self::new(format!("clip-{}", Uuid::new_v4()))
    }

    /// Convenience for the common construction pattern.
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Adds a curve targeting `property` on the node at `relative_path`.
    pub fn add_curve_binding(
        &mut self,
        relative_path: impl Into<String>,
        property: TargetProperty,
        curve: CurveData,
    ) {
        self.curve_bindings.push(CurveBinding {
            relative_path: relative_path.into(),
            property,
            curve,
        });
    }

    /// Adds a timed event, keeping the event list sorted ascending by time.
    /// Equal times preserve insertion order.
    pub fn add_event(&mut self, event: AnimationEvent) {
        let at = self.events.partition_point(|e| e.time <= event.time);
        self.events.insert(at, event);
    }

    /// Overrides the derived clip length.
    pub fn set_length(&mut self, length: f32) {
        self.explicit_length = Some(length.max(0.0));
    }

    /// Clip length: the explicit override if set, otherwise the maximum
    /// last-key time over all curves.
    #[must_use]
    pub fn length(&self) -> f32 {
        if let Some(length) = self.explicit_length {
            return length;
        }
        self.curve_bindings
            .iter()
            .map(|b| b.curve.last_time())
            .fold(0.0_f32, f32::max)
    }

    #[inline]
    #[must_use]
    pub fn curve_bindings(&self) -> &[CurveBinding] {
        &self.curve_bindings
    }

    #[inline]
    #[must_use]
    pub fn events(&self) -> &[AnimationEvent] {
        &self.events
    }
}
