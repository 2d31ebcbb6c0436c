use crate::animation::layer::AnimatorControllerLayer;
use crate::animation::state::AnimatorState;

/// An ordered stack of [`AnimatorControllerLayer`]s.
///
/// Layer 0 is the base layer and is always composited first as the
/// foundation. Controllers are authored once and then shared immutably
/// (`Arc<AnimatorController>`) between any number of animators.
#[derive(Debug, Default)]
pub struct AnimatorController {
    layers: Vec<AnimatorControllerLayer>,
}

impl AnimatorController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer, returning its index.
    pub fn add_layer(&mut self, layer: AnimatorControllerLayer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn layers(&self) -> &[AnimatorControllerLayer] {
        &self.layers
    }

    #[inline]
    #[must_use]
    pub fn layer(&self, index: usize) -> Option<&AnimatorControllerLayer> {
        self.layers.get(index)
    }

    #[inline]
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut AnimatorControllerLayer> {
        self.layers.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Finds a state by name, searching layers in index order. Returns the
    /// (layer index, state index) pair of the first match.
    #[must_use]
    pub fn find_state(&self, name: &str) -> Option<(usize, usize)> {
        self.layers.iter().enumerate().find_map(|(li, layer)| {
            layer
                .state_machine
                .state_index(name)
                .map(|si| (li, si))
        })
    }

    /// Resolves a (layer, state) index pair to the state itself.
    #[must_use]
    pub fn state(&self, layer_index: usize, state_index: usize) -> Option<&AnimatorState> {
        self.layers
            .get(layer_index)
            .and_then(|l| l.state_machine.state_at(state_index))
    }
}
