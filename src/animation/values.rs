use glam::{Quat, Vec2, Vec3, Vec4};

use crate::scene::material::ResourceHandle;

/// Value types a keyframe curve can interpolate.
///
/// `interpolate_cubic` is cubic Hermite: tangents are per-second slopes and
/// are scaled by the key interval `dt` inside the basis evaluation.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self;
}

// Hermite basis weights (h00, h10, h01, h11) for normalized t.
#[inline]
fn hermite_weights(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;

    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    let h00 = 1.0 - h01;
    let h10 = h11 - t2 + t;

    (h00, h10, h01, h11)
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self {
        let (h00, h10, h01, h11) = hermite_weights(t);
        h00 * v0 + h10 * (out_tangent0 * dt) + h01 * v1 + h11 * (in_tangent1 * dt)
    }
}

impl Interpolatable for Vec2 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self {
        let (h00, h10, h01, h11) = hermite_weights(t);
        v0 * h00 + out_tangent0 * dt * h10 + v1 * h01 + in_tangent1 * dt * h11
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self {
        let (h00, h10, h01, h11) = hermite_weights(t);
        v0 * h00 + out_tangent0 * dt * h10 + v1 * h01 + in_tangent1 * dt * h11
    }
}

impl Interpolatable for Vec4 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self {
        let (h00, h10, h01, h11) = hermite_weights(t);
        v0 * h00 + out_tangent0 * dt * h10 + v1 * h01 + in_tangent1 * dt * h11
    }
}

impl Interpolatable for Quat {
    /// Orientation special case: spherical interpolation, never componentwise.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }

    /// Hermite on the raw quaternion components, renormalized afterwards.
    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self {
        let (h00, h10, h01, h11) = hermite_weights(t);

        let v0 = Vec4::from(v0);
        let v1 = Vec4::from(v1);
        let m0 = Vec4::from(out_tangent0) * dt;
        let m1 = Vec4::from(in_tangent1) * dt;

        let result = v0 * h00 + m0 * h10 + v1 * h01 + m1 * h11;
        Quat::from_vec4(result).normalize()
    }
}

/// A sampled animation value: the per-frame currency of the blend pipeline.
///
/// The tag is fixed at curve construction time, so the hot evaluation path
/// performs no runtime type inspection beyond a single enum dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatedValue {
    Float(f32),
    Vector2(Vec2),
    Vector3(Vec3),
    Vector4(Vec4),
    Quaternion(Quat),
    Color(Vec4),
    Reference(ResourceHandle),
}

impl AnimatedValue {
    /// Blends two values by `t`.
    ///
    /// Quaternions slerp; reference handles snap from `self` to `other` once
    /// `t` reaches `reference_snap`. Mismatched tags keep `self` unchanged
    /// (a configuration error, degraded rather than propagated).
    #[must_use]
    pub fn blend(self, other: Self, t: f32, reference_snap: f32) -> Self {
        use AnimatedValue::{Color, Float, Quaternion, Reference, Vector2, Vector3, Vector4};
        match (self, other) {
            (Float(a), Float(b)) => Float(a + (b - a) * t),
            (Vector2(a), Vector2(b)) => Vector2(a.lerp(b, t)),
            (Vector3(a), Vector3(b)) => Vector3(a.lerp(b, t)),
            (Vector4(a), Vector4(b)) => Vector4(a.lerp(b, t)),
            (Color(a), Color(b)) => Color(a.lerp(b, t)),
            (Quaternion(a), Quaternion(b)) => Quaternion(a.slerp(b, t)),
            (Reference(a), Reference(b)) => {
                if t >= reference_snap {
                    Reference(b)
                } else {
                    Reference(a)
                }
            }
            (a, _) => a,
        }
    }

    /// Composites `delta` on top of `self`, scaled by `weight`.
    ///
    /// Vectors and colors add componentwise; rotations multiply by the delta
    /// quaternion attenuated toward identity. Reference handles have no
    /// additive form and keep `self`.
    #[must_use]
    pub fn add_scaled(self, delta: Self, weight: f32) -> Self {
        use AnimatedValue::{Color, Float, Quaternion, Reference, Vector2, Vector3, Vector4};
        match (self, delta) {
            (Float(a), Float(d)) => Float(a + d * weight),
            (Vector2(a), Vector2(d)) => Vector2(a + d * weight),
            (Vector3(a), Vector3(d)) => Vector3(a + d * weight),
            (Vector4(a), Vector4(d)) => Vector4(a + d * weight),
            (Color(a), Color(d)) => Color(a + d * weight),
            (Quaternion(a), Quaternion(d)) => {
                let scaled = Quat::IDENTITY.slerp(d, weight);
                Quaternion((a * scaled).normalize())
            }
            (a, _) => a,
        }
    }
}
