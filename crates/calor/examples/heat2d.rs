//! Diffuse a Gaussian bump on the unit square with cold edges.
//!
//! Run with `RUST_LOG=info cargo run -p calor --example heat2d`.

use calor::prelude::*;

const N: usize = 41;
const ALPHA: f64 = 0.05;
const T_END: f64 = 1.0;

fn total_heat(field: &ScalarField, cell_area: f64) -> f64 {
    field.as_slice().iter().sum::<f64>() * cell_area
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let spec = GridSpec::uniform(&[(0.0, 1.0, N), (0.0, 1.0, N)])?;
    let ops: OperatorSet = [GridOperator::laplacian(&spec, Stencil::Central2)]
        .into_iter()
        .collect();
    let heat = HeatEquation::new(BoundaryHandler::dirichlet_zero(&spec), ALPHA, ops)?;
    let limit = heat.max_stable_dt().ok_or("diffusivity must be positive")?;
    let dt = 0.8 * limit;

    let u0 = ScalarField::from_fn(&spec, |x| {
        let r2 = (x[0] - 0.5).powi(2) + (x[1] - 0.5).powi(2);
        (-r2 / 0.01).exp()
    });

    let spatial = SpatialDriver::new(Box::new(heat), Logger::new());
    let mut driver = Driver::new(spatial, Box::new(ForwardEuler));
    let config = SolveConfig::new(0.0, T_END, dt).with_check_finite(true);
    log::info!("dt={dt:.3e} (stability limit {limit:.3e})");
    let out = driver.full_solve(&config, u0)?;

    let h = spec.spacing();
    let area = h[0] * h[1];
    let centre = [N / 2, N / 2];
    println!("steps:       {}", out.metrics.steps);
    println!("final time:  {:.4}", out.final_time);
    println!("wall time:   {} us", out.metrics.total_us);
    for entry in driver.logger().iter().step_by((out.metrics.steps as usize / 5).max(1)) {
        println!(
            "t={:.4}  centre={:.5}  heat={:.5}",
            entry.time(),
            entry.field().get(&centre).unwrap_or(f64::NAN),
            total_heat(entry.field(), area)
        );
    }
    Ok(())
}
