use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::animation::binding::{self, ResolvedCurve, TargetProperty};
use crate::animation::clip::AnimationEvent;
use crate::animation::controller::AnimatorController;
use crate::animation::curve::CurveCursor;
use crate::animation::layer::{AnimatorControllerLayer, AnimatorLayerBlendingMode};
use crate::animation::script::ScriptContext;
use crate::animation::state::{AnimatorState, WrapMode};
use crate::animation::values::AnimatedValue;
use crate::scene::{NodeKey, Scene};

/// Playback phase of one animator layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerPhase {
    #[default]
    Stopped,
    Playing,
    CrossFading,
}

/// A clip event that fired during [`Animator::update`], queued in frame
/// order: layers in index order, source-state events before
/// destination-state events, ascending sample time within a clip.
#[derive(Debug, Clone)]
pub struct FiredEvent {
    pub layer_index: usize,
    pub state_name: String,
    pub event: AnimationEvent,
}

/// Per-state playback bookkeeping: accumulated state-local time plus one
/// curve cursor per clip curve.
#[derive(Debug, Clone)]
struct StatePlayback {
    state_index: usize,
    /// Accumulated seconds since the state started, signed by effective
    /// speed. Mapped to clip-local time through the state's wrap mode.
    time: f32,
    prev_time: f32,
    first_sample: bool,
    cursors: Vec<CurveCursor>,
}

#[derive(Debug, Clone)]
struct FadeState {
    dest: StatePlayback,
    duration: f32,
    progress: f32,
}

#[derive(Debug, Clone, Default)]
struct LayerPlayback {
    phase: LayerPhase,
    source: Option<StatePlayback>,
    fade: Option<FadeState>,
}

type PropertyKey = (NodeKey, TargetProperty);
type PropertyPot = FxHashMap<PropertyKey, AnimatedValue>;

/// The per-entity evaluation core.
///
/// Owns a shared [`AnimatorController`] plus exclusive per-layer playback
/// state, and drives a [`Scene`] once per frame: advances time, resolves
/// crossfades, samples curves, composites layers in index order and writes
/// the result into bound scene properties.
///
/// Cloning an animator (entity clone) deep-copies the playback state while
/// continuing to share controller and clip data.
#[derive(Clone)]
pub struct Animator {
    controller: Option<Arc<AnimatorController>>,
    root: NodeKey,
    /// Global playback speed multiplier, applied on top of per-state speed.
    pub speed: f32,
    reference_snap: f32,

    layers: Vec<LayerPlayback>,
    events: Vec<FiredEvent>,

    // Resolved once per (layer, state), invalidated by `rebind`
    resolved: FxHashMap<(usize, usize), Arc<Vec<ResolvedCurve>>>,

    // Per-frame scratch, kept to reuse allocations
    layer_values: PropertyPot,
    dest_values: PropertyPot,
    pot: PropertyPot,
}

impl Animator {
    /// Creates an animator rooted at `root`; binding paths resolve relative
    /// to that node.
    #[must_use]
    pub fn new(root: NodeKey) -> Self {
        Self {
            controller: None,
            root,
            speed: 1.0,
            reference_snap: 0.5,
            layers: Vec::new(),
            events: Vec::new(),
            resolved: FxHashMap::default(),
            layer_values: PropertyPot::default(),
            dest_values: PropertyPot::default(),
            pot: PropertyPot::default(),
        }
    }

    #[must_use]
    pub fn with_controller(root: NodeKey, controller: Arc<AnimatorController>) -> Self {
        let mut animator = Self::new(root);
        animator.set_controller(controller);
        animator
    }

    /// Assigns the controller and resets all per-layer playback state.
    pub fn set_controller(&mut self, controller: Arc<AnimatorController>) {
        self.layers = (0..controller.layer_count())
            .map(|_| LayerPlayback::default())
            .collect();
        self.controller = Some(controller);
        self.resolved.clear();
        self.events.clear();
    }

    #[inline]
    #[must_use]
    pub fn controller(&self) -> Option<&Arc<AnimatorController>> {
        self.controller.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Progress threshold at which reference-type properties snap from the
    /// source to the destination value during a crossfade. Clamped to
    /// `[0, 1]`; defaults to 0.5.
    pub fn set_reference_snap(&mut self, threshold: f32) {
        self.reference_snap = threshold.clamp(0.0, 1.0);
    }

    #[inline]
    #[must_use]
    pub fn reference_snap(&self) -> f32 {
        self.reference_snap
    }

    /// Drops all cached binding resolutions. Call after restructuring the
    /// animated hierarchy (renamed or reparented nodes).
    pub fn rebind(&mut self) {
        self.resolved.clear();
    }

    /// Takes the events fired by the most recent update(s).
    pub fn take_events(&mut self) -> Vec<FiredEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Playback commands
    // ========================================================================

    /// Immediately switches the layer to `state_name`: playback restarts at
    /// the state's clip start, any in-flight crossfade is discarded and
    /// `on_state_enter` fires. Returns false (with a warning) if the state
    /// or layer does not exist.
    pub fn play(&mut self, state_name: &str, layer_index: usize) -> bool {
        let Some(controller) = self.controller.clone() else {
            return false;
        };
        let Some((state_index, _)) = lookup_state(&controller, state_name, layer_index) else {
            return false;
        };
        self.exit_active(&controller, layer_index);
        self.snap_to(&controller, layer_index, state_index, 0.0);
        true
    }

    /// Starts the layer's authored default state, if any.
    pub fn play_default(&mut self, layer_index: usize) -> bool {
        let Some(controller) = self.controller.clone() else {
            return false;
        };
        let Some(layer_cfg) = controller.layer(layer_index) else {
            return false;
        };
        let Some(default_index) = layer_cfg.state_machine.default_state_index() else {
            return false;
        };
        if layer_index >= self.layers.len() {
            return false;
        }
        self.exit_active(&controller, layer_index);
        self.snap_to(&controller, layer_index, default_index, 0.0);
        true
    }

    /// Begins a crossfade: the current state keeps sampling while
    /// `state_name` ramps in over `duration` seconds. From a stopped layer
    /// (or with a non-positive duration) this is equivalent to [`Animator::play`].
    pub fn cross_fade(&mut self, state_name: &str, duration: f32, layer_index: usize) -> bool {
        self.cross_fade_internal(state_name, duration.max(0.0), 0.0, layer_index)
    }

    fn cross_fade_internal(
        &mut self,
        state_name: &str,
        duration: f32,
        offset: f32,
        layer_index: usize,
    ) -> bool {
        let Some(controller) = self.controller.clone() else {
            return false;
        };
        let Some((state_index, _)) = lookup_state(&controller, state_name, layer_index) else {
            return false;
        };
        if layer_index >= self.layers.len() {
            return false;
        }

        let snap = duration <= 0.0 || self.layers[layer_index].source.is_none();
        if snap {
            self.exit_active(&controller, layer_index);
            self.snap_to(&controller, layer_index, state_index, offset);
            return true;
        }

        self.start_fade(&controller, layer_index, state_index, duration, offset);
        true
    }

    /// Stops the layer: active states exit and the layer holds its last
    /// applied pose (no further sampling).
    pub fn stop(&mut self, layer_index: usize) {
        let Some(controller) = self.controller.clone() else {
            return;
        };
        if layer_index >= self.layers.len() {
            log::warn!("Animator::stop: invalid layer index {layer_index}");
            return;
        }
        self.exit_active(&controller, layer_index);
    }

    /// Finds a state by name, searching layers in index order.
    #[must_use]
    pub fn find_animator_state(&self, name: &str) -> Option<&AnimatorState> {
        let controller = self.controller.as_ref()?;
        let (layer_index, state_index) = controller.find_state(name)?;
        controller.state(layer_index, state_index)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    #[must_use]
    pub fn layer_phase(&self, layer_index: usize) -> LayerPhase {
        self.layers
            .get(layer_index)
            .map_or(LayerPhase::Stopped, |l| l.phase)
    }

    /// The state currently driving the layer (the crossfade source while
    /// fading).
    #[must_use]
    pub fn current_state(&self, layer_index: usize) -> Option<&AnimatorState> {
        let playback = self.layers.get(layer_index)?.source.as_ref()?;
        self.controller
            .as_ref()?
            .state(layer_index, playback.state_index)
    }

    /// Accumulated state-local playback time on the layer's current state.
    #[must_use]
    pub fn current_time(&self, layer_index: usize) -> Option<f32> {
        Some(self.layers.get(layer_index)?.source.as_ref()?.time)
    }

    // ========================================================================
    // Per-frame evaluation
    // ========================================================================

    /// Advances every layer by `delta_time` seconds and writes the blended
    /// result into `scene`.
    pub fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        let Some(controller) = self.controller.clone() else {
            return;
        };
        self.pot.clear();
        let mut script_updates: SmallVec<[(usize, usize, f32); 4]> = SmallVec::new();

        for layer_index in 0..self.layers.len() {
            let Some(layer_cfg) = controller.layer(layer_index) else {
                break;
            };
            if self.layers[layer_index].source.is_none() {
                continue;
            }
            // Taken out while processing so helpers can borrow other fields
            let mut lp = std::mem::take(&mut self.layers[layer_index]);
            let sm = &layer_cfg.state_machine;

            // --- 1. advance source playback time
            if let Some(src) = lp.source.as_mut()
                && let Some(state) = sm.state_at(src.state_index)
            {
                src.prev_time = src.time;
                src.time += delta_time * self.speed * state.speed;
            }

            // --- 2. advance crossfade, promote on completion
            let mut promote = false;
            if let Some(fade) = lp.fade.as_mut() {
                if let Some(dest_state) = sm.state_at(fade.dest.state_index) {
                    fade.dest.prev_time = fade.dest.time;
                    fade.dest.time += delta_time * self.speed * dest_state.speed;
                }
                fade.progress = if fade.duration > 0.0 {
                    (fade.progress + delta_time / fade.duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                promote = fade.progress >= 1.0;
            }
            if promote && let Some(fade) = lp.fade.take() {
                if let Some(old) = lp.source.take()
                    && let Some(old_state) = sm.state_at(old.state_index)
                {
                    fire_exit(layer_index, old_state, old.time);
                }
                lp.source = Some(fade.dest);
                lp.phase = LayerPhase::Playing;
            }

            // --- authored exit-time transitions (only while not fading)
            if lp.fade.is_none() {
                self.check_transitions(&mut lp, sm, layer_index);
            }

            // --- 4. straddled clip events, source before destination
            if let Some(src) = lp.source.as_mut()
                && let Some(state) = sm.state_at(src.state_index)
            {
                collect_events(layer_index, state, src, &mut self.events);
            }
            if let Some(fade) = lp.fade.as_mut()
                && let Some(state) = sm.state_at(fade.dest.state_index)
            {
                collect_events(layer_index, state, &mut fade.dest, &mut self.events);
            }

            // --- 3. sample current (and destination) state
            self.layer_values.clear();
            if let Some(src) = lp.source.as_mut()
                && let Some(state) = sm.state_at(src.state_index)
            {
                sample_state(
                    scene,
                    self.root,
                    &mut self.resolved,
                    layer_index,
                    state,
                    src,
                    &mut self.layer_values,
                );
                script_updates.push((layer_index, src.state_index, src.time));
            }
            if let Some(fade) = lp.fade.as_mut()
                && let Some(state) = sm.state_at(fade.dest.state_index)
            {
                self.dest_values.clear();
                sample_state(
                    scene,
                    self.root,
                    &mut self.resolved,
                    layer_index,
                    state,
                    &mut fade.dest,
                    &mut self.dest_values,
                );
                script_updates.push((layer_index, fade.dest.state_index, fade.dest.time));
                blend_fade(
                    &mut self.layer_values,
                    &self.dest_values,
                    fade.progress,
                    self.reference_snap,
                    scene,
                );
            }

            // --- 5. composite this layer onto the accumulated pot
            composite_layer(
                &mut self.pot,
                &self.layer_values,
                layer_cfg,
                self.reference_snap,
                scene,
            );

            self.layers[layer_index] = lp;
        }

        // --- 6. plain writes into the scene
        for (&(node, property), &value) in &self.pot {
            binding::apply_value(scene, node, property, value);
        }

        // --- 7. update hooks for every actively sampled state
        for (layer_index, state_index, time) in script_updates {
            if let Some(state) = controller.state(layer_index, state_index) {
                fire_update(layer_index, state, time);
            }
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Exits whatever is active on the layer and leaves it stopped.
    fn exit_active(&mut self, controller: &AnimatorController, layer_index: usize) {
        let Some(lp) = self.layers.get_mut(layer_index) else {
            return;
        };
        if let Some(src) = lp.source.take()
            && let Some(state) = controller.state(layer_index, src.state_index)
        {
            fire_exit(layer_index, state, src.time);
        }
        if let Some(fade) = lp.fade.take()
            && let Some(state) = controller.state(layer_index, fade.dest.state_index)
        {
            fire_exit(layer_index, state, fade.dest.time);
        }
        lp.phase = LayerPhase::Stopped;
    }

    /// Hard-switches the layer to a state (no blending).
    fn snap_to(
        &mut self,
        controller: &AnimatorController,
        layer_index: usize,
        state_index: usize,
        offset: f32,
    ) {
        let Some(state) = controller.state(layer_index, state_index) else {
            return;
        };
        let Some(lp) = self.layers.get_mut(layer_index) else {
            return;
        };
        let playback = make_playback(state, state_index, offset);
        fire_enter(layer_index, state, playback.time);
        *lp = LayerPlayback {
            phase: LayerPhase::Playing,
            source: Some(playback),
            fade: None,
        };
    }

    /// Starts a crossfade toward `state_index`. An in-flight transition is
    /// promoted first: its destination becomes the new source.
    fn start_fade(
        &mut self,
        controller: &AnimatorController,
        layer_index: usize,
        state_index: usize,
        duration: f32,
        offset: f32,
    ) {
        let Some(state) = controller.state(layer_index, state_index) else {
            return;
        };
        let Some(lp) = self.layers.get_mut(layer_index) else {
            return;
        };
        if let Some(fade) = lp.fade.take() {
            if let Some(old) = lp.source.take()
                && let Some(old_state) = controller.state(layer_index, old.state_index)
            {
                fire_exit(layer_index, old_state, old.time);
            }
            lp.source = Some(fade.dest);
        }
        let dest = make_playback(state, state_index, offset);
        fire_enter(layer_index, state, dest.time);
        lp.fade = Some(FadeState {
            dest,
            duration,
            progress: 0.0,
        });
        lp.phase = LayerPhase::CrossFading;
    }

    /// Fires the first authored transition whose exit time was crossed this
    /// frame. Exit-time rules assume forward playback.
    fn check_transitions(
        &mut self,
        lp: &mut LayerPlayback,
        sm: &crate::animation::state_machine::AnimatorStateMachine,
        layer_index: usize,
    ) {
        let Some(src) = lp.source.as_ref() else {
            return;
        };
        let Some(state) = sm.state_at(src.state_index) else {
            return;
        };
        let d = state.duration();
        if d <= 0.0 || state.transitions().is_empty() || self.speed * state.speed < 0.0 {
            return;
        }
        let prev_norm = src.prev_time / d;
        let new_norm = src.time / d;
        let looped = state.wrap_mode == WrapMode::Loop;

        let triggered = state.transitions().iter().find(|tr| {
            exit_time_crossed(prev_norm, new_norm, tr.exit_time, looped)
        });
        let Some(tr) = triggered else {
            return;
        };
        let Some(target_index) = sm.state_index(&tr.target) else {
            log::warn!(
                "Transition from '{}' targets missing state '{}'",
                state.name,
                tr.target
            );
            return;
        };
        let Some(target_state) = sm.state_at(target_index) else {
            return;
        };

        let duration = tr.duration.max(0.0) * target_state.duration();
        let dest = make_playback(target_state, target_index, tr.offset);
        fire_enter(layer_index, target_state, dest.time);
        if duration > 0.0 {
            lp.fade = Some(FadeState {
                dest,
                duration,
                progress: 0.0,
            });
            lp.phase = LayerPhase::CrossFading;
        } else {
            if let Some(old) = lp.source.take()
                && let Some(old_state) = sm.state_at(old.state_index)
            {
                fire_exit(layer_index, old_state, old.time);
            }
            lp.source = Some(dest);
            lp.phase = LayerPhase::Playing;
        }
    }
}

// ============================================================================
// Free helpers (kept out of the impl so field borrows stay disjoint)
// ============================================================================

fn lookup_state(
    controller: &AnimatorController,
    state_name: &str,
    layer_index: usize,
) -> Option<(usize, usize)> {
    let Some(layer_cfg) = controller.layer(layer_index) else {
        log::warn!("Animator: invalid layer index {layer_index}");
        return None;
    };
    let Some(state_index) = layer_cfg.state_machine.state_index(state_name) else {
        log::warn!("Animator: no state named '{state_name}' on layer {layer_index}");
        return None;
    };
    Some((state_index, layer_index))
}

fn make_playback(state: &AnimatorState, state_index: usize, offset: f32) -> StatePlayback {
    let curve_count = state.clip().map_or(0, |c| c.curve_bindings().len());
    let start_time = offset.clamp(0.0, 1.0) * state.duration();
    StatePlayback {
        state_index,
        time: start_time,
        prev_time: start_time,
        first_sample: true,
        cursors: vec![CurveCursor::default(); curve_count],
    }
}

fn script_context<'a>(
    layer_index: usize,
    state: &'a AnimatorState,
    time: f32,
) -> ScriptContext<'a> {
    let d = state.duration();
    ScriptContext {
        layer_index,
        state_name: &state.name,
        state_time: state.clip_local_time(time),
        normalized_time: if d > 0.0 { time / d } else { 0.0 },
    }
}

fn fire_enter(layer_index: usize, state: &AnimatorState, time: f32) {
    let ctx = script_context(layer_index, state, time);
    for script in state.scripts() {
        script.on_state_enter(&ctx);
    }
}

fn fire_update(layer_index: usize, state: &AnimatorState, time: f32) {
    let ctx = script_context(layer_index, state, time);
    for script in state.scripts() {
        script.on_state_update(&ctx);
    }
}

fn fire_exit(layer_index: usize, state: &AnimatorState, time: f32) {
    let ctx = script_context(layer_index, state, time);
    for script in state.scripts() {
        script.on_state_exit(&ctx);
    }
}

/// Samples every resolved curve of `state` at its current clip-local time
/// into `out`, resolving (and caching) bindings on first use.
fn sample_state(
    scene: &Scene,
    root: NodeKey,
    resolved_cache: &mut FxHashMap<(usize, usize), Arc<Vec<ResolvedCurve>>>,
    layer_index: usize,
    state: &AnimatorState,
    playback: &mut StatePlayback,
    out: &mut PropertyPot,
) {
    let Some(clip) = state.clip() else {
        return;
    };
    let resolved = resolved_cache
        .entry((layer_index, playback.state_index))
        .or_insert_with(|| Arc::new(binding::resolve_clip_bindings(scene, root, clip)))
        .clone();

    let clip_time = state.clip_local_time(playback.time);
    for rc in resolved.iter() {
        let curve = &clip.curve_bindings()[rc.curve_index].curve;
        let Some(cursor) = playback.cursors.get_mut(rc.curve_index) else {
            continue;
        };
        if let Some(value) = curve.sample_with_cursor(clip_time, cursor) {
            out.insert((rc.node, rc.property), value);
        }
    }
}

/// Blends the destination samples over the source samples by `progress`.
/// Properties only one side drives blend against the scene's current value.
fn blend_fade(
    source: &mut PropertyPot,
    dest: &PropertyPot,
    progress: f32,
    reference_snap: f32,
    scene: &Scene,
) {
    for (key, value) in source.iter_mut() {
        if !dest.contains_key(key)
            && let Some(rest) = binding::read_value(scene, key.0, key.1)
        {
            *value = value.blend(rest, progress, reference_snap);
        }
    }
    for (&key, &dest_value) in dest {
        match source.entry(key) {
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                let blended = entry.get().blend(dest_value, progress, reference_snap);
                entry.insert(blended);
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                let base = binding::read_value(scene, key.0, key.1).unwrap_or(dest_value);
                entry.insert(base.blend(dest_value, progress, reference_snap));
            }
        }
    }
}

/// Composites one layer's blended result onto the cross-layer accumulation.
fn composite_layer(
    pot: &mut PropertyPot,
    layer_result: &PropertyPot,
    layer_cfg: &AnimatorControllerLayer,
    reference_snap: f32,
    scene: &Scene,
) {
    let weight = layer_cfg.weight.clamp(0.0, 1.0);
    match layer_cfg.blending_mode {
        AnimatorLayerBlendingMode::Override => {
            for (&key, &value) in layer_result {
                match pot.entry(key) {
                    std::collections::hash_map::Entry::Occupied(mut entry) => {
                        let blended = entry.get().blend(value, weight, reference_snap);
                        entry.insert(blended);
                    }
                    std::collections::hash_map::Entry::Vacant(entry) => {
                        if weight >= 1.0 {
                            entry.insert(value);
                        } else {
                            let base =
                                binding::read_value(scene, key.0, key.1).unwrap_or(value);
                            entry.insert(base.blend(value, weight, reference_snap));
                        }
                    }
                }
            }
        }
        AnimatorLayerBlendingMode::Additive => {
            if weight <= 0.0 {
                return;
            }
            for (&key, &delta) in layer_result {
                let base = pot
                    .get(&key)
                    .copied()
                    .or_else(|| binding::read_value(scene, key.0, key.1));
                if let Some(base) = base {
                    pot.insert(key, base.add_scaled(delta, weight));
                }
            }
        }
    }
}

/// Whether `exit_time` (normalized) was crossed between two normalized
/// times. For looping states the fractional threshold recurs every cycle.
fn exit_time_crossed(prev_norm: f32, new_norm: f32, exit_time: f32, looped: bool) -> bool {
    if looped {
        (new_norm - exit_time).floor() > (prev_norm - exit_time).floor()
    } else {
        prev_norm < exit_time && new_norm >= exit_time
    }
}

/// Queues every clip event straddled by this frame's advance, at most once
/// per event per advance, ordered by occurrence time along the playback
/// direction.
fn collect_events(
    layer_index: usize,
    state: &AnimatorState,
    playback: &mut StatePlayback,
    out: &mut Vec<FiredEvent>,
) {
    let include_left = playback.first_sample;
    playback.first_sample = false;

    let Some(clip) = state.clip() else {
        return;
    };
    if clip.events().is_empty() {
        return;
    }
    let (a, b) = (playback.prev_time, playback.time);
    if a == b && !include_left {
        return;
    }

    let start = state.range_start();
    let d = state.duration();
    let looped = state.wrap_mode == WrapMode::Loop && d > 0.0;
    let forward = b >= a;

    let mut hits: SmallVec<[(f32, usize); 4]> = SmallVec::new();
    for (i, event) in clip.events().iter().enumerate() {
        let e_off = event.time - start;
        // Events outside the sampled sub-range never fire
        if e_off < 0.0 || (d > 0.0 && e_off > d) || (d <= 0.0 && e_off > 0.0) {
            continue;
        }
        let occurrence = if looped {
            occurrence_in_window(e_off, d, a, b, include_left, forward)
        } else {
            in_window(e_off, a, b, include_left).then_some(e_off)
        };
        if let Some(t) = occurrence {
            hits.push((t, i));
        }
    }

    if forward {
        hits.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));
    } else {
        hits.sort_by(|x, y| y.0.partial_cmp(&x.0).unwrap_or(std::cmp::Ordering::Equal));
    }
    for (_, i) in hits {
        out.push(FiredEvent {
            layer_index,
            state_name: state.name.clone(),
            event: clip.events()[i].clone(),
        });
    }
}

/// Window membership on the unwrapped state-time axis. The old edge `a` is
/// exclusive (it fired last frame) unless this is the state's first sample.
fn in_window(t: f32, a: f32, b: f32, include_left: bool) -> bool {
    if b >= a {
        (t > a || (include_left && t >= a)) && t <= b
    } else {
        (t < a || (include_left && t <= a)) && t >= b
    }
}

/// For a looping state: the occurrence `e_off + k * d` falling inside this
/// frame's window, nearest the window's entry edge.
fn occurrence_in_window(
    e_off: f32,
    d: f32,
    a: f32,
    b: f32,
    include_left: bool,
    forward: bool,
) -> Option<f32> {
    let lo = a.min(b);
    let hi = a.max(b);
    let k_lo = ((lo - e_off) / d).floor() as i64 - 1;
    let k_hi = ((hi - e_off) / d).ceil() as i64 + 1;

    let mut found = None;
    for k in k_lo..=k_hi {
        let t = e_off + k as f32 * d;
        if in_window(t, a, b, include_left) {
            found = Some(t);
            if forward {
                break; // earliest occurrence
            }
            // keep scanning: reverse playback reports the latest
        }
    }
    found
}
