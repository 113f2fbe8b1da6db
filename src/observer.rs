//! Step observer trait for monitoring cable simulation progress.

/// Trait for observing cable simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after all particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each distance-constraint pass over the chain.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after each bending (stiffness) pass. Never called while
    /// stiffness is disabled.
    fn on_stiffness_iteration(&mut self, _iteration: usize) {}

    /// Called after the collision pass with the number of particles that hit.
    fn on_collision(&mut self, _contacts: usize) {}

    /// Called when a fixed sub-step is fully complete.
    fn on_sub_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Observer that tallies every hook, handy for profiling overlays and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepCounter {
    pub integrations: usize,
    pub constraint_iterations: usize,
    pub stiffness_iterations: usize,
    pub collision_passes: usize,
    pub contacts: usize,
    pub sub_steps: usize,
}

impl StepObserver for StepCounter {
    fn on_integrate(&mut self) {
        self.integrations += 1;
    }

    fn on_constraint_iteration(&mut self, _iteration: usize) {
        self.constraint_iterations += 1;
    }

    fn on_stiffness_iteration(&mut self, _iteration: usize) {
        self.stiffness_iterations += 1;
    }

    fn on_collision(&mut self, contacts: usize) {
        self.collision_passes += 1;
        self.contacts += contacts;
    }

    fn on_sub_step_complete(&mut self) {
        self.sub_steps += 1;
    }
}
