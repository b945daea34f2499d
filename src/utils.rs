//! Small numeric helpers shared by the filter, rig and wander modules.

use nalgebra::Vector3;

/// Clamp `value` into `[-limit, limit]`.
///
/// A negative limit is treated by magnitude and a NaN value collapses to the
/// lower bound, so the result is always inside the range.
#[must_use]
pub fn clamp_symmetric(value: f32, limit: f32) -> f32 {
    let limit = limit.abs();
    value.max(-limit).min(limit)
}

/// Clamp `value` into `[-1, 1]`
#[must_use]
pub fn clamp_unit(value: f32) -> f32 {
    clamp_symmetric(value, 1.0)
}

/// Ratio of `value` to `limit`, floored and clamped into `[-1, 1]`
#[must_use]
pub fn normalized_ratio(value: f32, limit: f32, floor: f32) -> f32 {
    clamp_unit(value / limit.max(floor))
}

/// Linear interpolation with `t` clamped into `[0, 1]`
#[must_use]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (to - from).mul_add(t, from)
}

/// Component-wise linear interpolation with `t` clamped into `[0, 1]`
#[must_use]
pub fn lerp_vector(from: &Vector3<f32>, to: &Vector3<f32>, t: f32) -> Vector3<f32> {
    from.lerp(to, t.clamp(0.0, 1.0))
}

/// True when every component is finite
#[must_use]
pub fn is_finite_vector(v: &Vector3<f32>) -> bool {
    v.iter().all(|c| c.is_finite())
}
