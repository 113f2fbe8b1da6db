//! Gauss-Seidel relaxation of the cable's distance and bending constraints.

use crate::constraint::DistanceConstraint;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;
use alloc::vec::Vec as AllocVec;

/// Iterative constraint solver for a single particle chain.
///
/// Each pass solves the segment constraints in chain order, then the
/// bending pairs `(i, i + 2)` when stiffness is enabled.
#[derive(Clone, Debug)]
pub struct ConstraintSolver<F: Float> {
    pub iterations: usize,
    pub stiffness: bool,
    segments: AllocVec<DistanceConstraint<F>>,
    bending: AllocVec<DistanceConstraint<F>>,
}

impl<F: Float> ConstraintSolver<F> {
    /// Build constraints for a chain of `segment_count + 1` particles.
    pub fn for_chain(segment_count: usize, rest_length: F, iterations: usize, stiffness: bool) -> Self {
        let segments = (0..segment_count)
            .map(|i| DistanceConstraint::new(i, i + 1, rest_length))
            .collect();
        let bending = (0..segment_count.saturating_sub(1))
            .map(|i| DistanceConstraint::new(i, i + 2, F::two() * rest_length))
            .collect();

        ConstraintSolver { iterations, stiffness, segments, bending }
    }

    pub fn solve<O: StepObserver>(&self, particles: &mut [Particle<F>], observer: &mut O) {
        for i in 0..self.iterations {
            for c in self.segments.iter() {
                c.solve(particles);
            }
            observer.on_constraint_iteration(i);

            if self.stiffness {
                for c in self.bending.iter() {
                    c.solve(particles);
                }
                observer.on_stiffness_iteration(i);
            }
        }
    }

    pub fn segment_constraints(&self) -> &[DistanceConstraint<F>] {
        &self.segments
    }

    pub fn bending_constraints(&self) -> &[DistanceConstraint<F>] {
        &self.bending
    }

    /// Largest relative deviation from rest length across all segments.
    pub fn max_relative_error(&self, particles: &[Particle<F>]) -> F {
        self.segments.iter().fold(F::zero(), |worst, c| {
            let relative = (c.error(particles) / c.rest_length).abs();
            worst.max(relative)
        })
    }
}
