//! Distance constraint between two cable particles.

use crate::float::Float;
use crate::particle::Particle;

/// Keeps particles `a` and `b` at `rest_length` apart.
///
/// Only free particles move. With two free particles the correction is split
/// evenly; with one, the free particle takes all of it; with none, the
/// constraint is inert.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F) -> Self {
        DistanceConstraint { a, b, rest_length }
    }

    pub fn from_particles(a: usize, b: usize, particles: &[Particle<F>]) -> Self {
        let rest_length = particles[a].position.distance(particles[b].position);
        DistanceConstraint { a, b, rest_length }
    }

    /// Current separation minus the rest length.
    pub fn error(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].position.distance(particles[self.b].position) - self.rest_length
    }

    pub fn solve(&self, particles: &mut [Particle<F>]) {
        let a_free = particles[self.a].is_free();
        let b_free = particles[self.b].is_free();
        if !a_free && !b_free {
            return;
        }

        let delta = particles[self.b].position - particles[self.a].position;
        let dist = delta.length();
        if dist == F::zero() {
            return; // coincident, direction undefined
        }

        let error = (dist - self.rest_length) / dist;
        let correction = delta.scale(error);

        match (a_free, b_free) {
            (true, true) => {
                let half = correction.scale(F::half());
                particles[self.a].position += half;
                particles[self.b].position -= half;
            }
            (true, false) => particles[self.a].position += correction,
            (false, true) => particles[self.b].position -= correction,
            (false, false) => {}
        }
    }
}
