// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use map_reduce_swarm::{
    update_particle, DelayedSum, Objective, ObjectiveKind, Particle, Random, Sample, SineIntegral,
    SwarmError, SwarmParams,
};
use std::f32::consts::PI;
use std::time::Duration;

/// Always returns the same draw
struct FixedRandom(f32);

impl Random for FixedRandom {
    fn unit(&mut self) -> f32 {
        self.0
    }
}

fn sample(x: f32, y: f32, value: f32) -> Sample {
    Sample {
        position: [x, y],
        value,
    }
}

// ============================================================
// Sample
// ============================================================

#[test]
fn test_safety_better_keeps_smaller_value() {
    let low = sample(0.1, 0.1, 0.2);
    let high = sample(0.9, 0.9, 1.8);

    assert_eq!(Sample::better(low, high), low);
    assert_eq!(Sample::better(high, low), low);
}

#[test]
fn test_safety_better_prefers_second_on_tie() {
    let a = sample(0.0, 1.0, 1.0);
    let b = sample(1.0, 0.0, 1.0);

    assert_eq!(Sample::better(a, b), b);
}

#[test]
fn test_safety_sample_display_format() {
    let s = sample(0.5, 0.25, 0.75);
    assert_eq!(s.to_string(), "( 0.5000, 0.2500 ) -> 0.7500");
}

// ============================================================
// objectives
// ============================================================

#[test]
fn test_safety_delayed_sum_adds_coordinates() {
    let objective = DelayedSum::new(Duration::ZERO);
    assert_eq!(objective.evaluate(&[0.25, 0.5]), 0.75);
}

#[test]
fn test_safety_sine_integral_approximates_integral() {
    let objective = SineIntegral::new(0.001).unwrap();

    let forward = objective.evaluate(&[0.0, PI]);
    assert!((forward - 2.0).abs() < 0.01, "got {}", forward);

    let backward = objective.evaluate(&[PI, 0.0]);
    assert!((backward + forward).abs() < 1e-6);

    assert_eq!(objective.evaluate(&[1.5, 1.5]), 0.0);
}

#[test]
fn test_safety_sine_integral_rejects_non_positive_precision() {
    assert!(matches!(
        SineIntegral::new(0.0),
        Err(SwarmError::InvalidConfig(_))
    ));
    assert!(matches!(
        SineIntegral::new(f32::NAN),
        Err(SwarmError::InvalidConfig(_))
    ));
}

#[test]
fn test_safety_objective_bounds() {
    assert_eq!(ObjectiveKind::DelayedSum.bounds(), (0.0, 1.0));
    assert_eq!(ObjectiveKind::SineIntegral.bounds(), (0.0, 4.0));
}

// ============================================================
// update rule
// ============================================================

#[test]
fn test_safety_zero_draws_keep_only_inertia() {
    let params = SwarmParams::new(0.0, 1.0);
    let objective = DelayedSum::new(Duration::ZERO);
    let start = sample(0.5, 0.5, 1.0);
    let mut particle = Particle {
        current: start,
        best: start,
        velocity: [0.25, -0.125],
    };

    let best = update_particle(
        &mut particle,
        &sample(0.0, 0.0, 0.0),
        &params,
        &objective,
        &mut FixedRandom(0.0),
    );

    assert_eq!(particle.velocity, [0.25, -0.125]);
    assert_eq!(particle.current.position, [0.75, 0.375]);
    assert_eq!(particle.current.value, 1.125);
    assert_eq!(best, start, "worse position must not replace the best");
}

#[test]
fn test_safety_attraction_towards_global_best() {
    let params = SwarmParams::new(0.0, 1.0);
    let objective = DelayedSum::new(Duration::ZERO);
    let start = sample(0.5, 0.5, 1.0);
    let mut particle = Particle {
        current: start,
        best: start,
        velocity: [0.0, 0.0],
    };

    // Every draw is 0.5: v = 0.5 * (global - current)
    let best = update_particle(
        &mut particle,
        &sample(0.1, 0.3, 0.4),
        &params,
        &objective,
        &mut FixedRandom(0.5),
    );

    assert!((particle.velocity[0] + 0.2).abs() < 1e-6);
    assert!((particle.velocity[1] + 0.1).abs() < 1e-6);
    assert!((particle.current.position[0] - 0.3).abs() < 1e-6);
    assert!((particle.current.position[1] - 0.4).abs() < 1e-6);
    assert_eq!(best, particle.current);
}

#[test]
fn test_safety_position_wraps_around_space() {
    let params = SwarmParams::new(0.0, 1.0);
    let objective = DelayedSum::new(Duration::ZERO);
    let start = sample(0.9, 0.1, 1.0);
    let mut particle = Particle {
        current: start,
        best: start,
        velocity: [0.25, -0.25],
    };

    update_particle(
        &mut particle,
        &start,
        &params,
        &objective,
        &mut FixedRandom(0.0),
    );

    assert!((particle.current.position[0] - 0.15).abs() < 1e-6);
    assert!((particle.current.position[1] - 0.85).abs() < 1e-6);
}
