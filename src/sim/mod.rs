//! Recursive discrete-time simulators.
//!
//! Both simulators are pure functions: model + input signal + seed in,
//! predicted trace out. They keep no state across calls and never fail for
//! finite, validated model parameters, so every failure mode stays in the
//! estimation stage.

pub mod arx;
pub mod fopdt;
