//! Animation module
//!
//! The layered animation state machine core:
//! - KeyframeCurve / CurveData: typed keyframe evaluation (Step, Linear, CubicSpline)
//! - AnimationClip: curve bindings plus timed events
//! - AnimatorState / AnimatorStateMachine: named states, wrap modes, exit-time transitions
//! - AnimatorControllerLayer / AnimatorController: Override and Additive layer stack
//! - Animator: the per-entity evaluation core driving a Scene each frame

pub mod animator;
pub mod binding;
pub mod clip;
pub mod controller;
pub mod curve;
pub mod layer;
pub mod script;
pub mod state;
pub mod state_machine;
pub mod values;

pub use animator::{Animator, FiredEvent, LayerPhase};
pub use binding::TargetProperty;
pub use clip::{AnimationClip, AnimationEvent, CurveBinding, EventValue};
pub use controller::AnimatorController;
pub use curve::{CurveCursor, CurveData, InterpolationMode, KeyframeCurve, ReferenceCurve};
pub use layer::{AnimatorControllerLayer, AnimatorLayerBlendingMode};
pub use script::{ScriptContext, StateMachineScript};
pub use state::{AnimatorState, WrapMode};
pub use state_machine::{AnimatorStateMachine, AnimatorStateTransition};
pub use values::{AnimatedValue, Interpolatable};
