use tether::{
    AnchorRef, Cable, CableConfig, ConstraintSolver, DistanceConstraint, Particle, StepCounter, Vec3,
};

fn pinned(pos: Vec3<f32>) -> Particle<f32> {
    Particle::anchored(AnchorRef::fixed(pos))
}

#[test]
fn both_free_share_the_correction() {
    let mut particles = [
        Particle::new(Vec3::new(0.0f32, 0.0, 0.0)),
        Particle::new(Vec3::new(2.0, 0.0, 0.0)),
    ];
    DistanceConstraint::new(0, 1, 1.0).solve(&mut particles);

    assert_eq!(particles[0].position, Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(particles[1].position, Vec3::new(1.5, 0.0, 0.0));
}

#[test]
fn bound_particle_is_never_moved() {
    let mut particles = [pinned(Vec3::new(0.0, 0.0, 0.0)), Particle::new(Vec3::new(2.0, 0.0, 0.0))];
    DistanceConstraint::new(0, 1, 1.0).solve(&mut particles);
    assert_eq!(particles[0].position, Vec3::zero());
    assert_eq!(particles[1].position, Vec3::new(1.0, 0.0, 0.0));

    let mut particles = [Particle::new(Vec3::new(0.0, 0.0, 0.0)), pinned(Vec3::new(2.0, 0.0, 0.0))];
    DistanceConstraint::new(0, 1, 1.0).solve(&mut particles);
    assert_eq!(particles[0].position, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(particles[1].position, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn both_bound_is_a_no_op() {
    let mut particles = [pinned(Vec3::new(0.0, 0.0, 0.0)), pinned(Vec3::new(5.0, 0.0, 0.0))];
    DistanceConstraint::new(0, 1, 1.0).solve(&mut particles);
    assert_eq!(particles[0].position, Vec3::zero());
    assert_eq!(particles[1].position, Vec3::new(5.0, 0.0, 0.0));
}

#[test]
fn coincident_particles_are_skipped() {
    let mut particles = [
        Particle::new(Vec3::new(1.0f32, 1.0, 1.0)),
        Particle::new(Vec3::new(1.0, 1.0, 1.0)),
    ];
    DistanceConstraint::new(0, 1, 1.0).solve(&mut particles);

    for p in &particles {
        assert!(p.position.is_finite());
        assert_eq!(p.position, Vec3::new(1.0, 1.0, 1.0));
    }
}

#[test]
fn chain_converges_to_rest_length() {
    let config = CableConfig::new()
        .with_length(10.0f32)
        .with_segment_count(10)
        .with_gravity(Vec3::zero(), 0.0);
    let cable = Cable::new(
        &config,
        AnchorRef::fixed(Vec3::new(0.0, 0.0, 0.0)),
        AnchorRef::fixed(Vec3::new(6.0, 0.0, 0.0)),
    )
    .unwrap();
    let mut particles = cable.particles().to_vec();

    // Scramble the interior so every segment starts off its rest length.
    for i in 1..10 {
        let f = i as f32;
        particles[i].position = Vec3::new(0.6 * f, (f * 1.3).sin() * 0.8, (f * 0.7).cos() * 0.5);
    }

    let solver = ConstraintSolver::for_chain(10, cable.rest_length(), 20, false);
    solver.solve(&mut particles, &mut StepCounter::default());

    let rest = cable.rest_length();
    for i in 0..10 {
        let d = particles[i].position.distance(particles[i + 1].position);
        assert!(((d - rest) / rest).abs() < 0.01, "segment {} has length {}", i, d);
    }
    assert!(solver.max_relative_error(&particles) < 0.01);
    assert_eq!(particles[0].position, Vec3::zero());
    assert_eq!(particles[10].position, Vec3::new(6.0, 0.0, 0.0));
}

fn folded_chain() -> [Particle<f32>; 5] {
    [
        pinned(Vec3::new(0.0, 0.0, 0.0)),
        Particle::new(Vec3::new(1.0, 0.0, 0.0)),
        Particle::new(Vec3::new(0.0, 0.0, 0.05)),
        Particle::new(Vec3::new(1.0, 0.0, 0.1)),
        pinned(Vec3::new(2.0, 0.0, 0.1)),
    ]
}

#[test]
fn without_stiffness_the_chain_stays_folded() {
    let mut particles = folded_chain();
    let solver = ConstraintSolver::for_chain(4, 1.0f32, 40, false);
    let mut counter = StepCounter::default();
    solver.solve(&mut particles, &mut counter);

    assert_eq!(counter.constraint_iterations, 40);
    assert_eq!(counter.stiffness_iterations, 0);

    for i in 0..4 {
        let d = particles[i].position.distance(particles[i + 1].position);
        assert!((d - 1.0).abs() < 1e-3, "segment {} has length {}", i, d);
    }
    let fold = particles[0].position.distance(particles[2].position);
    assert!(fold < 0.1, "bending pair should stay folded, got {}", fold);
}

#[test]
fn stiffness_resists_folding() {
    let mut particles = folded_chain();
    let solver = ConstraintSolver::for_chain(4, 1.0f32, 40, true);
    let mut counter = StepCounter::default();
    solver.solve(&mut particles, &mut counter);

    assert_eq!(counter.stiffness_iterations, 40);
    let span = particles[0].position.distance(particles[2].position);
    assert!(span > 1.5, "bending pair should open up, got {}", span);
}

#[test]
fn chain_constraint_layout() {
    let solver = ConstraintSolver::for_chain(5, 0.5f32, 1, true);
    assert_eq!(solver.segment_constraints().len(), 5);
    assert_eq!(solver.bending_constraints().len(), 4);

    let first_bend = &solver.bending_constraints()[0];
    assert_eq!((first_bend.a, first_bend.b), (0, 2));
    assert_eq!(first_bend.rest_length, 1.0);

    let single = ConstraintSolver::for_chain(1, 0.5f32, 1, true);
    assert!(single.bending_constraints().is_empty());
}
