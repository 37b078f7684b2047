use polymer_flow::*;

fn main() -> Result<()> {
    let config = SimulationConfig::default().with_seed(1);
    let mut sim = Simulation::new(config)?;
    sim.set_parallel_enabled(true);

    let panel = ControlPanel::new();
    sim.attach_controls(panel.clone());

    for tick in 0..600 {
        if tick == 300 {
            panel.set_flow_intensity(80.0);
            panel.resize_population(200);
        }
        sim.advance();
    }

    let metrics = sim.metrics();
    let profile = sim.profiler();
    println!(
        "t = {:.2}, {} chains, {} particles",
        sim.time(),
        sim.chain_count(),
        sim.particle_count()
    );
    println!(
        "segment error: max {:.3}, mean {:.3}; sharpest bend {:.1} deg",
        metrics.max_segment_error, metrics.mean_segment_error, metrics.min_bend_angle_deg
    );
    println!(
        "last tick: {:.2} ms ({} chains wrapped)",
        profile.total_tick_time.as_secs_f32() * 1000.0,
        profile.wrapped_chains
    );
    Ok(())
}
