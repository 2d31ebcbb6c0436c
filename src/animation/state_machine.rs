use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::animation::state::AnimatorState;
use crate::errors::{EidolonError, Result};

/// An authored edge out of a state, taken automatically when the source
/// state's normalized playback time crosses `exit_time`.
#[derive(Debug, Clone)]
pub struct AnimatorStateTransition {
    /// Name of the destination state (resolved at trigger time; a missing
    /// target makes the transition a no-op).
    pub target: String,
    /// Crossfade duration, normalized to the destination state's length.
    pub duration: f32,
    /// Where the destination starts playing, normalized to its length.
    pub offset: f32,
    /// Trigger point, normalized to the source state's length. For looping
    /// sources the fractional part applies once per cycle.
    pub exit_time: f32,
}

impl AnimatorStateTransition {
    #[must_use]
    pub fn new(target: impl Into<String>, exit_time: f32, duration: f32) -> Self {
        Self {
            target: target.into(),
            duration,
            offset: 0.0,
            exit_time,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }
}

/// The directed graph of states for one layer.
///
/// States are registered under unique names; transitions live on their
/// source states. The default state is where [`Animator::play_default`]
/// starts the layer.
///
/// [`Animator::play_default`]: crate::animation::Animator::play_default
#[derive(Debug, Default)]
pub struct AnimatorStateMachine {
    states: Vec<AnimatorState>,
    name_index: FxHashMap<String, usize>,
    default_state: Option<usize>,
}

impl AnimatorStateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty state under `name`.
    ///
    /// The first state added becomes the default state until overridden.
    pub fn add_state(&mut self, name: impl Into<String>) -> Result<&mut AnimatorState> {
        let name = name.into();
        if self.name_index.contains_key(&name) {
            return Err(EidolonError::DuplicateStateName(name));
        }
        let index = self.states.len();
        self.name_index.insert(name.clone(), index);
        self.states.push(AnimatorState::new(name));
        if self.default_state.is_none() {
            self.default_state = Some(index);
        }
        Ok(&mut self.states[index])
    }

    /// Registers a state wrapping `clip` under `name`.
    pub fn add_state_with_clip(
        &mut self,
        name: impl Into<String>,
        clip: Arc<AnimationClip>,
    ) -> Result<&mut AnimatorState> {
        let state = self.add_state(name)?;
        state.set_clip(clip);
        Ok(state)
    }

    /// Marks `name` as the layer's default state. Returns whether the state
    /// exists.
    pub fn set_default_state(&mut self, name: &str) -> bool {
        match self.name_index.get(name) {
            Some(&index) => {
                self.default_state = Some(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn default_state_index(&self) -> Option<usize> {
        self.default_state
    }

    #[must_use]
    pub fn state_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn state_at(&self, index: usize) -> Option<&AnimatorState> {
        self.states.get(index)
    }

    #[inline]
    pub fn state_at_mut(&mut self, index: usize) -> Option<&mut AnimatorState> {
        self.states.get_mut(index)
    }

    #[must_use]
    pub fn find_state(&self, name: &str) -> Option<&AnimatorState> {
        self.state_index(name).and_then(|i| self.states.get(i))
    }

    pub fn find_state_mut(&mut self, name: &str) -> Option<&mut AnimatorState> {
        match self.name_index.get(name).copied() {
            Some(i) => self.states.get_mut(i),
            None => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> impl Iterator<Item = &AnimatorState> {
        self.states.iter()
    }
}
