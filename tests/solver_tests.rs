use approx::assert_abs_diff_eq;
use polymer_flow::{dynamics::solver::bend_cosine, ConstraintSolver, Particle, Vec2};

fn particles(points: &[(f32, f32)]) -> Vec<Particle> {
    points
        .iter()
        .map(|&(x, y)| Particle::new(Vec2::new(x, y)))
        .collect()
}

fn interior_angle_deg(chain: &[Particle]) -> f32 {
    bend_cosine(chain[0].position, chain[1].position, chain[2].position)
        .expect("non-degenerate bend")
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
}

#[test]
fn distance_sweep_converges_pair_to_target() {
    let solver = ConstraintSolver::new(5.0, 1, 90.0);
    for &start in &[0.01_f32, 1.0, 40.0, 250.0] {
        let mut pair = particles(&[(0.0, 0.0), (start, start * 0.5)]);
        let mut converged_at = None;

        for iteration in 1..=50 {
            solver.solve_distances(&mut pair);
            let distance = pair[0].position.distance(pair[1].position);
            if (distance - 5.0).abs() < 0.01 {
                converged_at = Some(iteration);
                break;
            }
        }

        assert!(
            converged_at.is_some(),
            "pair starting {start} apart did not converge within 50 sweeps"
        );
    }
}

#[test]
fn distance_sweep_preserves_pair_midpoint() {
    let solver = ConstraintSolver::new(2.0, 1, 90.0);
    let mut pair = particles(&[(1.0, 1.0), (9.0, 7.0)]);
    solver.solve_distances(&mut pair);

    let midpoint = (pair[0].position + pair[1].position) * 0.5;
    assert_abs_diff_eq!(midpoint.x, 5.0, epsilon = 1e-5);
    assert_abs_diff_eq!(midpoint.y, 4.0, epsilon = 1e-5);
}

#[test]
fn long_chain_relaxes_toward_uniform_length() {
    let solver = ConstraintSolver::new(3.0, 10, 90.0);
    let mut chain = particles(&[
        (0.0, 0.0),
        (1.0, 0.0),
        (9.0, 0.5),
        (10.0, 1.0),
        (22.0, 0.0),
        (23.0, 0.0),
    ]);
    let before = solver.measure(&chain).max_segment_error;

    for _ in 0..20 {
        solver.relax(&mut chain);
    }

    let after = solver.measure(&chain);
    assert!(after.max_segment_error < before);
    assert!(after.max_segment_error < 0.05, "error {}", after.max_segment_error);
}

#[test]
fn angular_sweep_opens_sharp_bend_monotonically() {
    let solver = ConstraintSolver::new(5.0, 1, 90.0);
    // ~36.9 degree bend at the middle node
    let mut chain = particles(&[(5.0, 0.0), (0.0, 0.0), (4.0, 3.0)]);
    let curr = chain[1].position;
    let mut previous_angle = interior_angle_deg(&chain);
    let initial_angle = previous_angle;

    for _ in 0..300 {
        solver.solve_angles(&mut chain);
        let angle = interior_angle_deg(&chain);
        assert!(
            angle >= previous_angle - 1e-4,
            "angle decreased from {previous_angle} to {angle}"
        );
        assert!(angle <= 90.0 + 1e-3, "overshot minimum: {angle}");
        assert_eq!(chain[1].position, curr, "middle node must not move");
        previous_angle = angle;
    }

    assert!(previous_angle > initial_angle + 10.0);
}

#[test]
fn angular_sweep_ignores_satisfied_bends() {
    let solver = ConstraintSolver::new(5.0, 1, 90.0);
    let mut chain = particles(&[(5.0, 0.0), (0.0, 0.0), (-3.0, 4.0)]);
    let before = chain.clone();
    solver.solve_angles(&mut chain);
    assert_eq!(chain, before);
}

#[test]
fn coincident_particles_are_skipped() {
    let solver = ConstraintSolver::new(5.0, 1, 90.0);

    let mut pair = particles(&[(3.0, 3.0), (3.0, 3.0)]);
    let before = pair.clone();
    solver.solve_distances(&mut pair);
    assert_eq!(pair, before);

    let mut folded = particles(&[(3.0, 3.0), (3.0, 3.0), (3.0, 3.0)]);
    solver.relax(&mut folded);
    for particle in &folded {
        assert!(particle.position.is_finite());
        assert_eq!(particle.position, Vec2::new(3.0, 3.0));
    }
}

#[test]
fn degenerate_pair_does_not_block_rest_of_sweep() {
    let solver = ConstraintSolver::new(1.0, 1, 90.0);
    let mut chain = particles(&[(0.0, 0.0), (0.0, 0.0), (4.0, 0.0)]);
    solver.solve_distances(&mut chain);

    assert_eq!(chain[0].position, Vec2::ZERO);
    assert!(chain.iter().all(|p| p.position.is_finite()));
    assert_abs_diff_eq!(chain[1].position.distance(chain[2].position), 1.0, epsilon = 1e-5);
}

#[test]
fn push_gain_scales_correction() {
    let mut gentle = ConstraintSolver::new(5.0, 1, 90.0);
    gentle.push_gain = 0.01;
    let strong = ConstraintSolver::new(5.0, 1, 90.0);

    let start = particles(&[(5.0, 0.0), (0.0, 0.0), (4.0, 3.0)]);
    let mut a = start.clone();
    let mut b = start;
    gentle.solve_angles(&mut a);
    strong.solve_angles(&mut b);

    assert!(interior_angle_deg(&b) > interior_angle_deg(&a));
}
