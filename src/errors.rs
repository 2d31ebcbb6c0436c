//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`EidolonError`] covers structural failures that can
//! occur while *authoring* animation data:
//! - Building curves from malformed key data
//! - Registering states under an already-used name
//! - Wiring controllers and layers together
//!
//! The per-frame evaluation path never returns errors: configuration
//! problems encountered at runtime (missing states, unresolved binding
//! paths) degrade to skips so that a broken asset can never halt the
//! frame loop.

use thiserror::Error;

/// The main error type for the Eidolon animation core.
///
/// Each variant provides specific context about what went wrong while
/// assembling animation data.
#[derive(Error, Debug)]
pub enum EidolonError {
    // ========================================================================
    // Curve Authoring Errors
    // ========================================================================
    /// A curve was built with no keyframes.
    #[error("Curve has no keyframes")]
    EmptyCurve,

    /// Key times and values disagree in length for the declared interpolation.
    #[error("Curve key data mismatch: {times} times vs {values} values ({context})")]
    CurveDataMismatch {
        /// Number of key times supplied
        times: usize,
        /// Number of values supplied
        values: usize,
        /// Description of the expected layout
        context: &'static str,
    },

    /// Key times are not sorted ascending.
    #[error("Curve key times not sorted ascending at index {0}")]
    UnsortedKeyTimes(usize),

    // ========================================================================
    // State Machine Authoring Errors
    // ========================================================================
    /// A state with this name already exists in the state machine.
    #[error("Duplicate animator state name: {0}")]
    DuplicateStateName(String),
}

/// Alias for `Result<T, EidolonError>`.
pub type Result<T> = std::result::Result<T, EidolonError>;
