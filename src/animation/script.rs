/// Snapshot handed to state machine script hooks.
#[derive(Debug, Clone, Copy)]
pub struct ScriptContext<'a> {
    /// Index of the layer the state lives on.
    pub layer_index: usize,
    /// Name of the state the hook fires for.
    pub state_name: &'a str,
    /// Clip-local sample time, in seconds.
    pub state_time: f32,
    /// Playback progress normalized to the state's effective range. Exceeds
    /// 1.0 for looping states on their second and later cycles.
    pub normalized_time: f32,
}

/// Per-state lifecycle hooks, attached to an [`AnimatorState`].
///
/// Hook order per frame: `on_state_enter` before the state's first sample,
/// `on_state_update` every sampled frame, `on_state_exit` after its last
/// sample. Hooks run synchronously inside the animator update.
///
/// Hooks take `&self` because controllers (and the states inside them) are
/// shared immutably between animators; implementations keep their own
/// mutable state behind `Cell`/`RefCell`, as with any listener trait.
///
/// [`AnimatorState`]: crate::animation::AnimatorState
pub trait StateMachineScript {
    fn on_state_enter(&self, _ctx: &ScriptContext) {}
    fn on_state_update(&self, _ctx: &ScriptContext) {}
    fn on_state_exit(&self, _ctx: &ScriptContext) {}
}
