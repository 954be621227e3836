//! Lorenz vector field and the explicit Euler step that advances a
//! particle state by one tick.
//!
//! The integrator must stay first-order: the visible trail-length
//! heuristic downstream is tuned to Euler's step profile, and a
//! higher-order scheme changes the rendered motion.

use crate::config::LorenzParams;
use glam::DVec3;

/// Result of one integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// State after the step.
    pub next: DVec3,
    /// Raw derivative (dx, dy, dz) before scaling by `dt`.
    ///
    /// Used as a speed proxy for the trail-length heuristic, not as a
    /// position delta.
    pub velocity: DVec3,
}

/// Evaluates the Lorenz derivative at `state`.
///
/// - dx = sigma * (y - x)
/// - dy = x * (rho - z) - y
/// - dz = x * y - beta * z
#[inline]
pub fn derivative(state: DVec3, params: &LorenzParams) -> DVec3 {
    DVec3::new(
        params.sigma * (state.y - state.x),
        state.x * (params.rho - state.z) - state.y,
        state.x * state.y - params.beta * state.z,
    )
}

/// Advances `state` by a single Euler substep of size `dt`.
///
/// Pure arithmetic: identical inputs produce bit-identical outputs, and
/// no allocation occurs. Non-finite states are propagated unchanged in
/// kind; the stepper neither clamps nor recovers.
#[inline]
pub fn step(state: DVec3, dt: f64, params: &LorenzParams) -> Step {
    let velocity = derivative(state, params);
    Step {
        next: state + velocity * dt,
        velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_matches_hand_computed_values() {
        let params = LorenzParams::default();
        let v = derivative(DVec3::new(1.0, 1.0, 1.0), &params);

        // dx = 10 * (1 - 1) = 0
        // dy = 1 * (28 - 1) - 1 = 26
        // dz = 1 * 1 - (8/3) * 1
        assert_eq!(v.x, 0.0);
        assert_eq!(v.y, 26.0);
        assert_eq!(v.z, 1.0 - 8.0 / 3.0);
    }

    #[test]
    fn step_applies_euler_update() {
        let params = LorenzParams::default();
        let dt = 0.002;
        let state = DVec3::new(1.0, 1.0, 1.0);

        let out = step(state, dt, &params);

        assert_eq!(out.velocity, derivative(state, &params));
        assert_eq!(out.next, state + out.velocity * dt);
    }

    #[test]
    fn step_is_deterministic() {
        let params = LorenzParams::default();
        let state = DVec3::new(-3.7, 12.2, 29.01);

        let a = step(state, 0.002, &params);
        let b = step(state, 0.002, &params);

        // Bit-identical, not merely approximately equal.
        assert_eq!(a.next.to_array(), b.next.to_array());
        assert_eq!(a.velocity.to_array(), b.velocity.to_array());
    }

    #[test]
    fn five_hundred_steps_match_reference_trajectory() {
        let params = LorenzParams::default();
        let dt = 0.002;

        let mut state = DVec3::new(1.0, 1.0, 1.0);
        for _ in 0..500 {
            state = step(state, dt, &params).next;
        }

        // Independent scalar Euler loop over the same formula.
        let (mut x, mut y, mut z) = (1.0_f64, 1.0_f64, 1.0_f64);
        for _ in 0..500 {
            let dx = 10.0 * (y - x);
            let dy = x * (28.0 - z) - y;
            let dz = x * y - (8.0 / 3.0) * z;
            x += dx * dt;
            y += dy * dt;
            z += dz * dt;
        }

        assert_eq!(state.x, x);
        assert_eq!(state.y, y);
        assert_eq!(state.z, z);
    }

    #[test]
    fn non_finite_state_propagates() {
        let params = LorenzParams::default();
        let out = step(DVec3::new(f64::NAN, 1.0, 1.0), 0.002, &params);
        assert!(out.next.x.is_nan());
    }
}
