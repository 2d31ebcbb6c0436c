//! Animation Data Model Tests
//!
//! Tests for:
//! - KeyframeCurve linear/step/cubic interpolation and range clamping
//! - CurveCursor O(1) sequential sampling and binary search fallback
//! - ReferenceCurve step semantics
//! - AnimatedValue blending and additive composition
//! - AnimationClip length derivation and event ordering

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3, Vec4};

use eidolon::animation::{
    AnimatedValue, AnimationClip, AnimationEvent, CurveCursor, CurveData, InterpolationMode,
    KeyframeCurve, ReferenceCurve, TargetProperty,
};
use eidolon::errors::EidolonError;
use eidolon::scene::ResourceHandle;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// KeyframeCurve: Linear Interpolation
// ============================================================================

#[test]
fn curve_linear_f32_midpoint() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    let val = curve.sample(0.5).unwrap();
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn curve_linear_clamps_outside_range() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    // Before the first key and past the last key both clamp
    assert!(approx(curve.sample(-1.0).unwrap(), 0.0));
    assert!(approx(curve.sample(2.0).unwrap(), 10.0));
}

#[test]
fn curve_linear_exact_keyframes() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Linear,
    );

    assert!(approx(curve.sample(0.0).unwrap(), 0.0));
    assert!(approx(curve.sample(1.0).unwrap(), 10.0));
    assert!(approx(curve.sample(2.0).unwrap(), 20.0));
}

#[test]
fn curve_single_key_is_constant() {
    let curve = KeyframeCurve::new(vec![5.0], vec![42.0_f32], InterpolationMode::Linear);

    for t in [-100.0, 0.0, 5.0, 7.5, 1000.0] {
        let val = curve.sample(t).unwrap();
        assert!(approx(val, 42.0), "t={t}: expected 42.0, got {val}");
    }
}

#[test]
fn curve_empty_samples_none() {
    let curve: KeyframeCurve<f32> = KeyframeCurve::new(vec![], vec![], InterpolationMode::Linear);
    assert!(curve.sample(0.0).is_none());

    let mut cursor = CurveCursor::default();
    assert!(curve.sample_with_cursor(0.0, &mut cursor).is_none());
}

#[test]
fn curve_linear_vec3() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    );

    let val = curve.sample(0.5).unwrap();
    assert!(approx(val.x, 5.0));
    assert!(approx(val.y, 10.0));
    assert!(approx(val.z, 15.0));
}

#[test]
fn curve_linear_quat_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI);

    let curve = KeyframeCurve::new(vec![0.0, 1.0], vec![q0, q1], InterpolationMode::Linear);

    let val = curve.sample(0.5).unwrap();
    let expected = q0.slerp(q1, 0.5);
    let angle = val.angle_between(expected);
    assert!(angle < 0.01, "Quaternion slerp mismatch: angle={angle}");
}

// ============================================================================
// KeyframeCurve: Step Interpolation
// ============================================================================

#[test]
fn curve_step_holds_until_next_key() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );

    assert!(approx(curve.sample(0.0).unwrap(), 0.0));
    assert!(approx(curve.sample(0.99).unwrap(), 0.0));
    assert!(approx(curve.sample(1.0).unwrap(), 100.0));
    assert!(approx(curve.sample(1.5).unwrap(), 100.0));
    assert!(approx(curve.sample(2.0).unwrap(), 200.0));
}

// ============================================================================
// KeyframeCurve: Cubic Spline Interpolation
// ============================================================================

#[test]
fn curve_cubic_hits_endpoints() {
    // values per key: [in_tangent, value, out_tangent]
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 1.0, // key 0
            1.0, 10.0, 0.0, // key 1
        ],
        InterpolationMode::CubicSpline,
    );

    assert!(approx(curve.sample(0.0).unwrap(), 0.0));
    assert!(approx(curve.sample(1.0).unwrap(), 10.0));
}

#[test]
fn curve_cubic_zero_tangent_midpoint() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 0.0, // key 0: zero tangents
            0.0, 10.0, 0.0, // key 1: zero tangents
        ],
        InterpolationMode::CubicSpline,
    );

    // Hermite with zero tangents is the smoothstep of the endpoints
    let val = curve.sample(0.5).unwrap();
    assert!(approx(val, 5.0), "expected 5.0, got {val}");
}

// ============================================================================
// CurveCursor
// ============================================================================

#[test]
fn cursor_sequential_forward() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 20.0, 30.0, 40.0],
        InterpolationMode::Linear,
    );

    let mut cursor = CurveCursor::default();
    for i in 0..=20 {
        let t = i as f32 * 0.2;
        let val = curve.sample_with_cursor(t, &mut cursor).unwrap();
        let expected = t * 10.0;
        assert!(approx(val, expected), "t={t}: expected {expected}, got {val}");
    }
}

#[test]
fn cursor_forward_then_jump_back() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0, 3.0],
        vec![0.0_f32, 10.0, 20.0, 30.0],
        InterpolationMode::Linear,
    );

    let mut cursor = CurveCursor::default();

    let val = curve.sample_with_cursor(2.5, &mut cursor).unwrap();
    assert!(approx(val, 25.0));

    // Large jump back exceeds the probe window and falls back to search
    let val = curve.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0));
}

#[test]
fn cursor_matches_stateless_sampling() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 5.0, 20.0, 15.0],
        InterpolationMode::Linear,
    );

    // Shared cursor across an arbitrary scrub pattern must agree with
    // stateless sampling everywhere.
    let mut cursor = CurveCursor::default();
    for t in [0.0, 0.3, 1.7, 1.8, 0.2, 3.9, 4.5, -1.0, 2.2] {
        let with_cursor = curve.sample_with_cursor(t, &mut cursor).unwrap();
        let stateless = curve.sample(t).unwrap();
        assert!(
            approx(with_cursor, stateless),
            "t={t}: cursor={with_cursor} stateless={stateless}"
        );
    }
}

// ============================================================================
// Curve Validation
// ============================================================================

#[test]
fn try_new_rejects_empty() {
    let result = KeyframeCurve::<f32>::try_new(vec![], vec![], InterpolationMode::Linear);
    assert!(matches!(result, Err(EidolonError::EmptyCurve)));
}

#[test]
fn try_new_rejects_length_mismatch() {
    let result =
        KeyframeCurve::try_new(vec![0.0, 1.0], vec![0.0_f32], InterpolationMode::Linear);
    assert!(matches!(
        result,
        Err(EidolonError::CurveDataMismatch { times: 2, values: 1, .. })
    ));
}

#[test]
fn try_new_rejects_cubic_without_tangent_layout() {
    // Cubic needs 3 values per key
    let result = KeyframeCurve::try_new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::CubicSpline,
    );
    assert!(matches!(result, Err(EidolonError::CurveDataMismatch { .. })));
}

#[test]
fn try_new_rejects_unsorted_times() {
    let result = KeyframeCurve::try_new(
        vec![0.0, 2.0, 1.0],
        vec![0.0_f32, 1.0, 2.0],
        InterpolationMode::Linear,
    );
    assert!(matches!(result, Err(EidolonError::UnsortedKeyTimes(2))));
}

#[test]
fn try_new_accepts_duplicate_times() {
    // Duplicate times are tolerated by validation
    let curve = KeyframeCurve::try_new(
        vec![0.0, 1.0, 1.0],
        vec![0.0_f32, 10.0, 99.0],
        InterpolationMode::Linear,
    )
    .unwrap();
    assert!(approx(curve.sample(0.5).unwrap(), 5.0));
}

// ============================================================================
// ReferenceCurve
// ============================================================================

#[test]
fn reference_curve_steps_at_key_times() {
    let a = ResourceHandle(1);
    let b = ResourceHandle(2);
    let curve = ReferenceCurve::new(vec![0.0, 1.0], vec![a, b]);

    assert_eq!(curve.sample(0.0), Some(a));
    assert_eq!(curve.sample(0.99), Some(a));
    assert_eq!(curve.sample(1.0), Some(b));
    assert_eq!(curve.sample(50.0), Some(b));
}

#[test]
fn reference_curve_clamps_before_first_key() {
    let a = ResourceHandle(7);
    let curve = ReferenceCurve::new(vec![2.0], vec![a]);
    assert_eq!(curve.sample(-1.0), Some(a));
}

// ============================================================================
// AnimatedValue: Blending
// ============================================================================

#[test]
fn value_blend_vector3() {
    let a = AnimatedValue::Vector3(Vec3::ZERO);
    let b = AnimatedValue::Vector3(Vec3::new(10.0, 20.0, 30.0));
    let AnimatedValue::Vector3(v) = a.blend(b, 0.5, 0.5) else {
        panic!("tag changed");
    };
    assert!(approx(v.x, 5.0) && approx(v.y, 10.0) && approx(v.z, 15.0));
}

#[test]
fn value_blend_quaternion_is_slerp() {
    let a = Quat::IDENTITY;
    let b = Quat::from_rotation_y(FRAC_PI_2);
    let AnimatedValue::Quaternion(q) =
        AnimatedValue::Quaternion(a).blend(AnimatedValue::Quaternion(b), 0.5, 0.5)
    else {
        panic!("tag changed");
    };
    let angle = q.angle_between(a.slerp(b, 0.5));
    assert!(angle < 1e-4, "Slerp mismatch: angle={angle}");
}

#[test]
fn value_blend_reference_snaps_at_threshold() {
    let a = AnimatedValue::Reference(ResourceHandle(1));
    let b = AnimatedValue::Reference(ResourceHandle(2));

    assert_eq!(a.blend(b, 0.49, 0.5), a);
    assert_eq!(a.blend(b, 0.5, 0.5), b);

    // The threshold is configurable
    assert_eq!(a.blend(b, 0.5, 0.9), a);
    assert_eq!(a.blend(b, 0.95, 0.9), b);
}

#[test]
fn value_blend_mismatched_tags_keeps_source() {
    let a = AnimatedValue::Float(1.0);
    let b = AnimatedValue::Vector3(Vec3::ONE);
    assert_eq!(a.blend(b, 0.5, 0.5), a);
}

#[test]
fn value_add_scaled_vector3() {
    let base = AnimatedValue::Vector3(Vec3::new(1.0, 2.0, 3.0));
    let delta = AnimatedValue::Vector3(Vec3::new(0.0, 1.0, 0.0));

    let AnimatedValue::Vector3(v) = base.add_scaled(delta, 1.0) else {
        panic!("tag changed");
    };
    assert!(approx(v.y, 3.0));

    let AnimatedValue::Vector3(v) = base.add_scaled(delta, 0.5) else {
        panic!("tag changed");
    };
    assert!(approx(v.y, 2.5));
}

#[test]
fn value_add_scaled_quaternion_multiplies() {
    let base = AnimatedValue::Quaternion(Quat::IDENTITY);
    let delta = AnimatedValue::Quaternion(Quat::from_rotation_y(FRAC_PI_2));

    let AnimatedValue::Quaternion(q) = base.add_scaled(delta, 1.0) else {
        panic!("tag changed");
    };
    let angle = q.angle_between(Quat::from_rotation_y(FRAC_PI_2));
    assert!(angle < 1e-4, "expected full delta rotation, angle={angle}");

    // Weight 0 leaves the base untouched
    let AnimatedValue::Quaternion(q) = base.add_scaled(delta, 0.0) else {
        panic!("tag changed");
    };
    let angle = q.angle_between(Quat::IDENTITY);
    assert!(angle < 1e-4, "expected identity, angle={angle}");
}

// ============================================================================
// AnimationClip
// ============================================================================

#[test]
fn clip_length_is_max_over_curves() {
    let mut clip = AnimationClip::new("walk");
    clip.add_curve_binding(
        "a",
        TargetProperty::Translation,
        CurveData::Vector3(KeyframeCurve::new(
            vec![0.0, 1.5],
            vec![Vec3::ZERO, Vec3::X],
            InterpolationMode::Linear,
        )),
    );
    clip.add_curve_binding(
        "b",
        TargetProperty::Rotation,
        CurveData::Quaternion(KeyframeCurve::new(
            vec![0.0, 3.0],
            vec![Quat::IDENTITY, Quat::from_rotation_y(1.0)],
            InterpolationMode::Linear,
        )),
    );

    assert!(
        approx(clip.length(), 3.0),
        "Length should be max over all curves, got {}",
        clip.length()
    );
}

#[test]
fn clip_explicit_length_wins() {
    let mut clip = AnimationClip::new("timed");
    clip.add_curve_binding(
        "",
        TargetProperty::Translation,
        CurveData::Vector3(KeyframeCurve::new(
            vec![0.0, 1.0],
            vec![Vec3::ZERO, Vec3::X],
            InterpolationMode::Linear,
        )),
    );
    clip.set_length(5.0);
    assert!(approx(clip.length(), 5.0));
}

#[test]
fn clip_without_curves_has_zero_length() {
    let clip = AnimationClip::new("empty");
    assert!(approx(clip.length(), 0.0));
}

#[test]
fn clip_events_stay_sorted() {
    let mut clip = AnimationClip::new("evented");
    clip.add_event(AnimationEvent::new(1.5, "late"));
    clip.add_event(AnimationEvent::new(0.5, "early"));
    clip.add_event(AnimationEvent::new(1.0, "middle"));

    let times: Vec<f32> = clip.events().iter().map(|e| e.time).collect();
    assert_eq!(times, vec![0.5, 1.0, 1.5]);
}

#[test]
fn clip_generated_names_are_unique() {
    let a = AnimationClip::with_generated_name();
    let b = AnimationClip::with_generated_name();
    assert_ne!(a.name, b.name);
}

// ============================================================================
// CurveData dispatch
// ============================================================================

#[test]
fn curve_data_samples_to_tagged_value() {
    let data = CurveData::Color(KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::ONE],
        InterpolationMode::Linear,
    ));

    let Some(AnimatedValue::Color(c)) = data.sample(0.5) else {
        panic!("expected a color sample");
    };
    assert!(approx(c.x, 0.5) && approx(c.w, 1.0));
}

#[test]
fn curve_data_reports_last_time() {
    let data = CurveData::Float(KeyframeCurve::new(
        vec![0.0, 2.5],
        vec![0.0_f32, 1.0],
        InterpolationMode::Linear,
    ));
    assert!(approx(data.last_time(), 2.5));
}
