//! Fixed-timestep driver tying integration, constraints, collision and
//! meshing together.

use crate::anchor::AnchorRef;
use crate::cable::Cable;
use crate::collision::{CollisionResolver, CollisionWorld};
use crate::config::CableConfig;
use crate::error::Result;
use crate::float::Float;
use crate::integrator::VerletIntegrator;
use crate::mesh::{TubeMesh, TubeMeshBuilder};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::solver::ConstraintSolver;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Sub-steps in one tick above which a warning is logged.
pub const MAX_SUB_STEPS_WARNING: usize = 64;

/// Time accumulator deciding how many fixed sub-steps a tick runs.
#[derive(Clone, Debug)]
pub struct SubStepper<F: Float> {
    accumulator: F,
    sub_step: F,
    carry_remainder: bool,
}

impl<F: Float> SubStepper<F> {
    /// `sub_step` is the threshold; with `carry_remainder` off, leftover time
    /// is dropped after each step.
    pub fn new(sub_step: F, carry_remainder: bool) -> Self {
        SubStepper { accumulator: F::zero(), sub_step, carry_remainder }
    }

    pub fn sub_step(&self) -> F {
        self.sub_step
    }

    pub fn accumulated(&self) -> F {
        self.accumulator
    }

    /// Add `dt` and return the number of sub-steps to run now.
    pub fn advance(&mut self, dt: F) -> usize {
        self.accumulator = self.accumulator + dt;
        let mut steps = 0;
        while self.accumulator > self.sub_step {
            steps += 1;
            if self.carry_remainder {
                self.accumulator = self.accumulator - self.sub_step;
            } else {
                self.accumulator = F::zero();
            }
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = F::zero();
    }
}

/// One simulated cable plus its render mesh.
///
/// The host calls [`step_physics`](Self::step_physics) from its fixed-rate
/// tick and [`rebuild_mesh`](Self::rebuild_mesh) from its display tick. The
/// two never interleave, so the mesh always sees a completed sub-step.
pub struct CableSimulation<F: Float> {
    config: CableConfig<F>,
    cable: Cable<F>,
    integrator: VerletIntegrator<F>,
    solver: ConstraintSolver<F>,
    collision: CollisionResolver<F>,
    stepper: SubStepper<F>,
    mesh_builder: TubeMeshBuilder<F>,
    mesh: TubeMesh<F>,
    positions: AllocVec<Vec3<F>>,
}

impl<F: Float> CableSimulation<F> {
    /// Validate `config`, lay out the cable between the two anchors and build
    /// the first mesh.
    pub fn initialize(config: CableConfig<F>, start: AnchorRef<F>, end: AnchorRef<F>) -> Result<Self> {
        let cable = Cable::new(&config, start, end)?;
        let segments = cable.segment_count();

        if config.enable_stiffness && segments < 2 {
            log::warn!("stiffness enabled on a single-segment cable; there are no bending pairs");
        }

        let integrator = VerletIntegrator::new(config.gravity, config.gravity_scale, config.external_force);
        let solver = ConstraintSolver::for_chain(
            segments,
            cable.rest_length(),
            config.solver_iterations,
            config.enable_stiffness,
        );
        let collision = CollisionResolver::for_width(config.width, config.friction);
        let stepper = SubStepper::new(config.effective_sub_step(), config.use_sub_stepping);
        let mesh_builder = TubeMeshBuilder::from_config(&config);

        let mut sim = CableSimulation {
            config,
            cable,
            integrator,
            solver,
            collision,
            stepper,
            mesh_builder,
            mesh: TubeMesh::new(),
            positions: AllocVec::new(),
        };
        sim.rebuild_mesh();
        Ok(sim)
    }

    /// Express the mesh relative to `origin` from now on.
    pub fn set_mesh_origin(&mut self, origin: Vec3<F>) {
        self.mesh_builder.origin = origin;
    }

    /// Advance by one host tick of `frame_dt` seconds. Returns the number of
    /// sub-steps run.
    pub fn step_physics<W, O>(&mut self, frame_dt: F, world: &W, observer: &mut O) -> usize
    where
        W: CollisionWorld<F> + ?Sized,
        O: StepObserver,
    {
        let steps = self.stepper.advance(frame_dt);
        if steps > MAX_SUB_STEPS_WARNING {
            log::warn!("cable tick ran {} sub-steps (dt {})", steps, frame_dt);
        }
        for _ in 0..steps {
            self.sub_step(frame_dt, world, observer);
        }
        steps
    }

    /// [`step_physics`](Self::step_physics) without an observer.
    pub fn step<W>(&mut self, frame_dt: F, world: &W) -> usize
    where
        W: CollisionWorld<F> + ?Sized,
    {
        self.step_physics(frame_dt, world, &mut NoOpStepObserver)
    }

    fn sub_step<W, O>(&mut self, frame_dt: F, world: &W, observer: &mut O)
    where
        W: CollisionWorld<F> + ?Sized,
        O: StepObserver,
    {
        let dt = self.stepper.sub_step();
        let particles = self.cable.particles_mut();

        for _ in 0..self.config.verlet_iterations {
            self.integrator.integrate(particles, dt, frame_dt);
            observer.on_integrate();
            self.solver.solve(particles, observer);
        }

        if self.config.enable_collision {
            let contacts = self.collision.resolve(particles, world);
            observer.on_collision(contacts);
        }

        observer.on_sub_step_complete();
        log::trace!("cable sub-step done, dt {}", dt);
    }

    /// Regenerate the tube mesh from the current particle positions.
    pub fn rebuild_mesh(&mut self) -> &TubeMesh<F> {
        self.cable.positions_into(&mut self.positions);
        self.mesh_builder.rebuild(&self.positions, &mut self.mesh);
        &self.mesh
    }

    pub fn mesh(&self) -> &TubeMesh<F> {
        &self.mesh
    }

    pub fn mesh_builder(&self) -> &TubeMeshBuilder<F> {
        &self.mesh_builder
    }

    pub fn cable(&self) -> &Cable<F> {
        &self.cable
    }

    pub fn cable_mut(&mut self) -> &mut Cable<F> {
        &mut self.cable
    }

    pub fn config(&self) -> &CableConfig<F> {
        &self.config
    }

    pub fn solver(&self) -> &ConstraintSolver<F> {
        &self.solver
    }

    pub fn stepper(&self) -> &SubStepper<F> {
        &self.stepper
    }
}
