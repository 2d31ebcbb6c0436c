#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod errors;
pub mod scene;

pub use animation::{
    AnimationClip, AnimationEvent, Animator, AnimatorController, AnimatorControllerLayer,
    AnimatorLayerBlendingMode, AnimatorState, AnimatorStateMachine, AnimatorStateTransition,
    CurveData, InterpolationMode, KeyframeCurve, StateMachineScript, TargetProperty, WrapMode,
};
pub use errors::EidolonError;
pub use scene::{Node, NodeKey, Scene, Transform};
