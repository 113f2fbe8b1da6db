//! Position-Verlet integration of a particle chain.

use crate::anchor::AnchorRef;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Advances free particles under gravity and a constant external force, and
/// moves anchored particles to their anchor's resolved pose.
#[derive(Clone, Debug)]
pub struct VerletIntegrator<F: Float> {
    pub gravity: Vec3<F>,
    pub gravity_scale: F,
    pub external_force: Vec3<F>,
}

impl<F: Float> VerletIntegrator<F> {
    pub fn new(gravity: Vec3<F>, gravity_scale: F, external_force: Vec3<F>) -> Self {
        VerletIntegrator { gravity, gravity_scale, external_force }
    }

    /// Combined acceleration applied to every free particle.
    pub fn acceleration(&self) -> Vec3<F> {
        self.gravity.scale(self.gravity_scale) + self.external_force
    }

    /// One integration pass.
    ///
    /// `dt` is the sub-step duration used for free particles; `frame_dt` is the
    /// host tick used to predict rigid-body anchors.
    pub fn integrate(&self, particles: &mut [Particle<F>], dt: F, frame_dt: F) {
        let displacement = self.acceleration().scale(dt * dt);
        for particle in particles.iter_mut() {
            match particle.anchor().copied() {
                Some(anchor) => Self::drive_anchored(particle, &anchor, frame_dt),
                None => {
                    let new_position = particle.position + particle.velocity() + displacement;
                    particle.update_position(new_position);
                }
            }
        }
    }

    fn drive_anchored(particle: &mut Particle<F>, anchor: &AnchorRef<F>, frame_dt: F) {
        // Kinematic pin: history is overwritten so the anchor carries no velocity.
        particle.teleport(anchor.resolve(frame_dt));
    }
}
