//! Cable particles: Verlet point masses with an optional anchor binding.

use crate::anchor::AnchorRef;
use crate::float::Float;
use crate::vec::Vec3;

/// A Verlet particle. Velocity is implicit in `position - old_position`.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub position: Vec3<F>,
    pub old_position: Vec3<F>,
    anchor: Option<AnchorRef<F>>,
}

impl<F: Float> Particle<F> {
    pub fn new(position: Vec3<F>) -> Self {
        Particle {
            position,
            old_position: position,
            anchor: None,
        }
    }

    /// Create a particle already pinned to `anchor`, placed at its pose.
    pub fn anchored(anchor: AnchorRef<F>) -> Self {
        let mut particle = Particle::new(anchor.pose());
        particle.bind(anchor);
        particle
    }

    /// Per-step displacement, not a true velocity.
    pub fn velocity(&self) -> Vec3<F> {
        self.position - self.old_position
    }

    /// Pin to `anchor`. Both positions snap to the pose so the binding
    /// introduces no implicit velocity.
    pub fn bind(&mut self, anchor: AnchorRef<F>) {
        let pose = anchor.pose();
        self.position = pose;
        self.old_position = pose;
        self.anchor = Some(anchor);
    }

    /// Release the binding. The particle keeps its position and starts at rest.
    pub fn unbind(&mut self) -> Option<AnchorRef<F>> {
        self.old_position = self.position;
        self.anchor.take()
    }

    pub fn anchor(&self) -> Option<&AnchorRef<F>> {
        self.anchor.as_ref()
    }

    pub fn anchor_mut(&mut self) -> Option<&mut AnchorRef<F>> {
        self.anchor.as_mut()
    }

    pub fn is_free(&self) -> bool {
        self.anchor.is_none()
    }

    pub fn is_bound(&self) -> bool {
        self.anchor.is_some()
    }

    /// Shift history: the current position becomes the previous one.
    pub fn update_position(&mut self, new_position: Vec3<F>) {
        self.old_position = self.position;
        self.position = new_position;
    }

    /// Hard snap, overwriting history as well.
    pub fn teleport(&mut self, new_position: Vec3<F>) {
        self.position = new_position;
        self.old_position = new_position;
    }
}
