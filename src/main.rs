use std::time::Instant;

use log::{debug, info};

use tsp_dp_core::{Result, SolverInput, SolverOptions, logging, solve_tsp};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    let input = SolverInput::from_options(&options)?;

    info!("input: {input}");
    info!("options: {options}");
    debug!("matrix:\n{}", input.matrix());

    let tour = solve_tsp(input.matrix(), options.strategy)?;

    println!("min length: {}", tour.cost);

    let metrics = tour.tour_metrics(input.matrix());
    info!(
        "output: tour={tour} edges={} longest={} time={:.2}s",
        metrics.edges,
        metrics.longest,
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
