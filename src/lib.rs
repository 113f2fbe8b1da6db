//! Real-time Verlet rope and cable simulation with procedural tube meshes.
//!
//! `tether` advances a chain of point masses under gravity and a constant
//! external force, relaxes segment-length and optional bending constraints,
//! resolves contacts against a static world, and regenerates a tube-shaped
//! surface mesh from the particle positions every display frame.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Anchors**: Endpoints pinned to fixed transforms or predicted rigid bodies
//! - **Constraint solver**: Gauss-Seidel distance and bending relaxation
//! - **Collision**: Sphere-cast contacts with friction against any `CollisionWorld`
//! - **Sub-stepping**: Fixed-timestep accumulator decoupled from the host tick
//! - **Tube meshes**: Rings with normals, tangents and tiled UVs
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: TOML config loading needs the `std` feature

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod float;
pub mod vec;
pub mod anchor;
pub mod particle;
pub mod integrator;
pub mod constraint;
pub mod solver;
pub mod collision;
pub mod cable;
pub mod simulation;
pub mod mesh;
pub mod render;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use anchor::{AnchorRef, Endpoint};
pub use particle::Particle;
pub use integrator::VerletIntegrator;
pub use constraint::DistanceConstraint;
pub use solver::ConstraintSolver;
pub use collision::{
    CollisionResolver, CollisionWorld, EmptyWorld, Plane, Sphere, SphereCastHit, StaticCollider,
};
pub use cable::Cable;
pub use simulation::{CableSimulation, SubStepper};
pub use mesh::{TubeMesh, TubeMeshBuilder};
pub use render::{MaterialId, MeshConsumer, RenderBridge, TubeVertex};
pub use observer::{NoOpStepObserver, StepCounter, StepObserver};
pub use config::CableConfig;
pub use error::{CableError, Result};
