//! Kinematic anchors that drive bound particles instead of integration.

use crate::float::Float;
use crate::vec::Vec3;
use core::fmt;

/// Which end of a cable an anchor belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// External pose source a particle is pinned to.
///
/// The variant is chosen once, when the particle is bound. The integrator is
/// the only place that dispatches on it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnchorRef<F: Float> {
    /// Follows an external transform's position exactly.
    FixedTransform { pose: Vec3<F> },
    /// Backed by an external rigid body; the position is predicted one
    /// physics step ahead from the body's linear velocity.
    RigidBodyProxy {
        pose: Vec3<F>,
        linear_velocity: Vec3<F>,
        /// The external body interpolates its rendered pose, so only half a
        /// step of prediction is applied.
        interpolated: bool,
    },
}

impl<F: Float> AnchorRef<F> {
    pub fn fixed(pose: Vec3<F>) -> Self {
        AnchorRef::FixedTransform { pose }
    }

    pub fn rigid_body(pose: Vec3<F>, linear_velocity: Vec3<F>, interpolated: bool) -> Self {
        AnchorRef::RigidBodyProxy { pose, linear_velocity, interpolated }
    }

    /// Current pose of the external source, without prediction.
    pub fn pose(&self) -> Vec3<F> {
        match *self {
            AnchorRef::FixedTransform { pose } => pose,
            AnchorRef::RigidBodyProxy { pose, .. } => pose,
        }
    }

    pub fn set_pose(&mut self, new_pose: Vec3<F>) {
        match self {
            AnchorRef::FixedTransform { pose } => *pose = new_pose,
            AnchorRef::RigidBodyProxy { pose, .. } => *pose = new_pose,
        }
    }

    /// Update the body velocity. Ignored for fixed transforms, which carry none.
    pub fn set_linear_velocity(&mut self, velocity: Vec3<F>) {
        if let AnchorRef::RigidBodyProxy { linear_velocity, .. } = self {
            *linear_velocity = velocity;
        }
    }

    /// Position the bound particle should take this step.
    ///
    /// `frame_dt` is the host's fixed physics tick, the interval the external
    /// body integrates over.
    pub fn resolve(&self, frame_dt: F) -> Vec3<F> {
        match *self {
            AnchorRef::FixedTransform { pose } => pose,
            AnchorRef::RigidBodyProxy { pose, linear_velocity, interpolated } => {
                let lookahead = if interpolated { frame_dt * F::half() } else { frame_dt };
                pose + linear_velocity.scale(lookahead)
            }
        }
    }
}
