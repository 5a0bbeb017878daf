//! Integration test: composing heat problems and evaluating them
//! through the `Problem` trait object.

use std::f64::consts::PI;

use calor_core::{OperatorKind, ProblemError, Side};
use calor_grid::{GridOperator, OperatorSet, ScalarField, Stencil};
use calor_problem::{BoundaryCondition, BoundaryHandler, HeatEquation, Problem};
use calor_test_utils::{
    discrete_decay_rate, heat_problem, heat_problem_with, laplacian_set, sine_mode, unit_interval,
    unit_square,
};

#[test]
fn missing_laplacian_is_rejected_at_composition() {
    let spec = unit_square(5, 5);
    let err = HeatEquation::new(BoundaryHandler::dirichlet_zero(&spec), 1.0, OperatorSet::new())
        .unwrap_err();
    assert_eq!(
        err,
        ProblemError::MissingOperator {
            kind: OperatorKind::Laplacian
        }
    );
}

#[test]
fn operator_on_other_grid_is_rejected() {
    let spec = unit_square(5, 5);
    let other = unit_square(5, 6);
    let err = HeatEquation::new(
        BoundaryHandler::dirichlet_zero(&spec),
        1.0,
        laplacian_set(&other, Stencil::Central2),
    )
    .unwrap_err();
    assert!(matches!(err, ProblemError::Field(_)));
}

#[test]
fn sine_mode_is_scaled_by_discrete_rate() {
    let spec = unit_square(17, 13);
    let alpha = 0.3;
    let problem: Box<dyn Problem> = Box::new(heat_problem(&spec, alpha));
    let mut u = sine_mode(&spec, &[1, 2]);
    let expected = u.scaled(-discrete_decay_rate(&spec, alpha, &[1, 2]));

    let bounded = problem.set_bcs(0.0, &mut u).unwrap();
    let rhs = problem.rhs(&bounded).unwrap();
    for i in 1..16 {
        for j in 1..12 {
            let got = rhs.get(&[i, j]).unwrap();
            let want = expected.get(&[i, j]).unwrap();
            assert!((got - want).abs() < 1e-9, "({i},{j}): {got} vs {want}");
        }
    }
}

#[test]
fn hot_edge_heats_its_neighbours() {
    let spec = unit_square(6, 6);
    let mut conditions: Vec<BoundaryCondition> = BoundaryHandler::dirichlet_zero(&spec)
        .conditions()
        .to_vec();
    conditions.push(BoundaryCondition::dirichlet(0, Side::Low, vec![1.0]));
    let handler = BoundaryHandler::new(&spec, conditions).unwrap();
    let problem =
        HeatEquation::new(handler, 1.0, laplacian_set(&spec, Stencil::Central2)).unwrap();

    let mut u = ScalarField::zeros(&spec);
    let bounded = problem.set_bcs(0.0, &mut u).unwrap();
    // The hot condition came last, so it owns the corners.
    assert_eq!(bounded.get(&[0, 0]), Some(1.0));
    assert_eq!(bounded.get(&[5, 0]), Some(0.0));

    let rhs = problem.rhs(&bounded).unwrap();
    for j in 1..5 {
        assert!(rhs.get(&[1, j]).unwrap() > 0.0);
        assert_eq!(rhs.get(&[3, j]), Some(0.0));
    }
}

#[test]
fn stability_limit_tracks_stencil() {
    let spec = unit_square(11, 11);
    let h = spec.spacing()[0];
    let alpha = 0.5;

    let central2 = heat_problem(&spec, alpha).max_stable_dt().unwrap();
    assert!((central2 - h * h / (4.0 * alpha)).abs() < 1e-12);

    let ops: OperatorSet = [GridOperator::laplacian(&spec, Stencil::Central4)]
        .into_iter()
        .collect();
    let central4 = HeatEquation::new(BoundaryHandler::dirichlet_zero(&spec), alpha, ops)
        .unwrap()
        .max_stable_dt()
        .unwrap();
    assert!((central4 - 0.75 * central2).abs() < 1e-12);
}

#[test]
fn zero_diffusivity_has_no_limit() {
    let spec = unit_square(4, 4);
    let problem = heat_problem(&spec, 0.0);
    assert_eq!(problem.max_stable_dt(), None);
}

#[test]
fn central4_rhs_next_to_dirichlet_edge_converges() {
    // Row 1 of a zero-Dirichlet sine mode, compared with -alpha pi^2 u.
    let alpha = 1.0;
    let errors: Vec<f64> = [21, 41, 81]
        .into_iter()
        .map(|n| {
            let spec = unit_interval(n);
            let problem = heat_problem_with(&spec, alpha, Stencil::Central4);
            let mut u = sine_mode(&spec, &[1]);
            let bounded = problem.set_bcs(0.0, &mut u).unwrap();
            let rhs = problem.rhs(&bounded).unwrap();
            let exact = -alpha * PI * PI * bounded.get(&[1]).unwrap();
            (rhs.get(&[1]).unwrap() - exact).abs()
        })
        .collect();
    for pair in errors.windows(2) {
        assert!(pair[1] < pair[0] / 3.0, "{errors:?}");
    }
    assert!(errors[2] < 1e-3, "{errors:?}");
}
