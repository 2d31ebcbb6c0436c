use std::sync::Arc;

use smallvec::SmallVec;

use crate::animation::clip::AnimationClip;
use crate::animation::script::StateMachineScript;
use crate::animation::state_machine::AnimatorStateTransition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Clamp to the clip range and report completion.
    Once,
    /// Wrap modulo the effective clip range.
    Loop,
}

/// A named node in a layer's state machine: a clip (or nothing) plus
/// playback parameters.
///
/// `clip_start_time` / `clip_end_time` select a sub-range of the shared
/// clip, so one clip can back several states (a single-frame additive pose
/// uses `clip_start_time == clip_end_time`). A state without a clip is a
/// valid "do nothing" state.
pub struct AnimatorState {
    pub name: String,

    clip: Option<Arc<AnimationClip>>,

    /// Per-state playback speed multiplier; negative reverses playback.
    pub speed: f32,
    pub wrap_mode: WrapMode,
    /// Clip-local start of the sampled range, seconds.
    pub clip_start_time: f32,
    /// Clip-local end of the sampled range, seconds. Clamped to the clip
    /// length at evaluation time; the default spans the whole clip.
    pub clip_end_time: f32,

    scripts: Vec<Arc<dyn StateMachineScript>>,
    transitions: SmallVec<[AnimatorStateTransition; 2]>,
}

impl AnimatorState {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clip: None,
            speed: 1.0,
            wrap_mode: WrapMode::Loop,
            clip_start_time: 0.0,
            clip_end_time: f32::INFINITY,
            scripts: Vec::new(),
            transitions: SmallVec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> Option<&Arc<AnimationClip>> {
        self.clip.as_ref()
    }

    pub fn set_clip(&mut self, clip: Arc<AnimationClip>) {
        self.clip = Some(clip);
    }

    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Clip-local start of the effective range.
    #[inline]
    #[must_use]
    pub fn range_start(&self) -> f32 {
        self.clip_start_time.max(0.0)
    }

    /// Clip-local end of the effective range, clamped to the clip length.
    #[inline]
    #[must_use]
    pub fn range_end(&self) -> f32 {
        let clip_length = self.clip.as_ref().map_or(0.0, |c| c.length());
        self.clip_end_time.min(clip_length)
    }

    /// Length of the sampled range in seconds. Zero for a clipless state or
    /// a fixed pose (`clip_start_time == clip_end_time`).
    #[must_use]
    pub fn duration(&self) -> f32 {
        (self.range_end() - self.range_start()).max(0.0)
    }

    /// Maps accumulated state time (seconds since the state started, signed
    /// by effective speed) to the clip-local time to evaluate.
    #[must_use]
    pub fn clip_local_time(&self, state_time: f32) -> f32 {
        let start = self.range_start();
        let d = self.duration();
        if d <= 0.0 {
            // Fixed pose
            return start;
        }
        match self.wrap_mode {
            WrapMode::Once => start + state_time.clamp(0.0, d),
            WrapMode::Loop => {
                let mut wrapped = state_time % d;
                if wrapped < 0.0 {
                    wrapped += d;
                }
                start + wrapped
            }
        }
    }

    /// Whether a `Once` state has played through at the given accumulated
    /// time (in either direction). `Loop` states never finish.
    #[must_use]
    pub fn is_finished(&self, state_time: f32) -> bool {
        match self.wrap_mode {
            WrapMode::Loop => false,
            WrapMode::Once => state_time >= self.duration() || state_time < 0.0,
        }
    }

    // ========================================================================
    // Scripts
    // ========================================================================

    /// Attaches a state machine script. Scripts are invoked in attach order.
    pub fn add_script(&mut self, script: Arc<dyn StateMachineScript>) {
        self.scripts.push(script);
    }

    #[inline]
    #[must_use]
    pub fn scripts(&self) -> &[Arc<dyn StateMachineScript>] {
        &self.scripts
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Adds an exit-time transition out of this state.
    pub fn add_transition(&mut self, transition: AnimatorStateTransition) {
        self.transitions.push(transition);
    }

    #[inline]
    #[must_use]
    pub fn transitions(&self) -> &[AnimatorStateTransition] {
        &self.transitions
    }
}

impl std::fmt::Debug for AnimatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatorState")
            .field("name", &self.name)
            .field("clip", &self.clip.as_ref().map(|c| &c.name))
            .field("speed", &self.speed)
            .field("wrap_mode", &self.wrap_mode)
            .field("clip_start_time", &self.clip_start_time)
            .field("clip_end_time", &self.clip_end_time)
            .field("scripts", &self.scripts.len())
            .field("transitions", &self.transitions)
            .finish()
    }
}
