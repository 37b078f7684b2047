use std::time::Instant;

use glam::Vec2;
use rand::{
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};

use crate::{
    config::{validate_segment_count, validate_segment_length, SimulationConfig},
    control::{ControlPanel, PendingControls},
    core::{
        chain::Chain,
        types::{ChainColor, Domain},
    },
    dynamics::{
        flow::{FlowField, FlowSample},
        forces::{ForceContext, ForceRegistry},
        solver::{ConstraintSolver, SolverMetrics},
    },
    error::{Result, SimulationError},
    utils::{
        logging::{warn_if_frame_budget_exceeded, ScopedTimer},
        profiling::{PhaseTimer, TickProfiler},
    },
};

#[cfg(feature = "parallel")]
use crate::dynamics::parallel::ParallelStepper;

/// Owns every chain, the shared flow intensity and global time.
///
/// Structural settings (segment count, segment length, cluster count) are
/// stored immediately but only shape chains built by the next
/// [`Simulation::reinitialize`]. Flow intensity takes effect on the next tick.
pub struct Simulation {
    config: SimulationConfig,
    chains: Vec<Chain>,
    cluster_centers: Vec<Vec2>,
    time: f64,
    tick: u64,
    rng: StdRng,
    flow: FlowField,
    forces: ForceRegistry,
    solver: ConstraintSolver,
    active_segment_count: usize,
    seeds: Vec<u64>,
    controls: Option<ControlPanel>,
    parallel_enabled: bool,
    profiler: TickProfiler,
}

impl Simulation {
    /// Validates `config` and seeds the population around random clusters.
    ///
    /// Uses `config.seed` when present, entropy otherwise.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Deterministic construction; overrides `config.seed`.
    pub fn with_seed(mut config: SimulationConfig, seed: u64) -> Result<Self> {
        config.seed = Some(seed);
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let mut simulation = Self {
            flow: FlowField::new(config.flow, config.height),
            forces: ForceRegistry::from_config(&config),
            solver: ConstraintSolver::from_config(&config),
            active_segment_count: config.segment_count,
            config,
            chains: Vec::new(),
            cluster_centers: Vec::new(),
            time: 0.0,
            tick: 0,
            rng,
            seeds: Vec::new(),
            controls: None,
            parallel_enabled: false,
            profiler: TickProfiler::default(),
        };
        simulation.reinitialize()?;
        Ok(simulation)
    }

    /// Advances one tick: apply queued controls, step time, move every
    /// chain, then relax its geometry.
    pub fn advance(&mut self) {
        let tick_start = Instant::now();
        self.profiler.reset();

        if let Some(pending) = self.controls.as_ref().map(ControlPanel::take) {
            let control_start = Instant::now();
            if !pending.is_empty() {
                self.apply_controls(pending);
            }
            self.profiler.control_time += control_start.elapsed();
        }

        self.time += self.config.time_step;
        self.tick += 1;

        let ctx = ForceContext {
            time: self.time,
            flow_intensity: self.config.flow_intensity,
        };

        let rng = &mut self.rng;
        self.seeds.clear();
        self.seeds.extend((0..self.chains.len()).map(|_| rng.gen::<u64>()));

        self.profiler.wrapped_chains = self.run_dynamics(&ctx);
        self.run_relaxation();

        self.profiler.chain_count = self.chains.len();
        self.profiler.particle_count = self.particle_count();
        self.profiler.total_tick_time = tick_start.elapsed();
        warn_if_frame_budget_exceeded(self.profiler.total_tick_time, self.config.frame_budget_ms);
        self.profiler.report();
    }

    fn run_dynamics(&mut self, ctx: &ForceContext) -> usize {
        let _trace = ScopedTimer::new("tick::dynamics");
        let Self {
            chains,
            seeds,
            forces,
            config,
            profiler,
            parallel_enabled,
            ..
        } = self;
        let _timer = PhaseTimer::new(&mut profiler.dynamics_time);
        let domain = Domain::new(config.width, config.height);
        let margin = config.wrap_margin;

        #[cfg(feature = "parallel")]
        {
            if *parallel_enabled {
                return ParallelStepper::advance_dynamics(chains, seeds, forces, ctx, domain, margin);
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel_enabled;

        let mut wrapped = 0;
        for (chain, &seed) in chains.iter_mut().zip(seeds.iter()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            if chain.advance_dynamics(forces, ctx, domain, margin, &mut rng) {
                wrapped += 1;
            }
        }
        wrapped
    }

    fn run_relaxation(&mut self) {
        let _trace = ScopedTimer::new("tick::relaxation");
        let Self {
            chains,
            solver,
            profiler,
            parallel_enabled,
            ..
        } = self;
        let _timer = PhaseTimer::new(&mut profiler.relaxation_time);

        #[cfg(feature = "parallel")]
        {
            if *parallel_enabled {
                ParallelStepper::relax(chains, solver);
                return;
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel_enabled;

        for chain in chains.iter_mut() {
            chain.relax(solver);
        }
    }

    fn apply_controls(&mut self, pending: PendingControls) {
        log::debug!("applying queued controls: {pending:?}");

        if let Some(value) = pending.flow_intensity {
            if value.is_finite() {
                self.set_flow_intensity(value);
            } else {
                log::warn!("discarding non-finite flow intensity {value}");
            }
        }
        if let Some(count) = pending.segment_count {
            if let Err(err) = self.set_segment_count(count) {
                log::warn!("discarding segment count {count}: {err}");
            }
        }
        if let Some(length) = pending.segment_length {
            if let Err(err) = self.set_segment_length(length) {
                log::warn!("discarding segment length {length}: {err}");
            }
        }
        if let Some(target) = pending.population {
            self.resize_population(target);
        }
        if pending.reinitialize {
            if let Err(err) = self.reinitialize() {
                log::warn!("reinitialize request failed: {err}");
            }
        }
    }

    /// Sets the shared flow intensity (nominally [0, 100]) without clamping.
    pub fn set_flow_intensity(&mut self, value: f32) {
        self.config.flow_intensity = value;
    }

    /// Particles per chain for chains built by the next reinitialize.
    pub fn set_segment_count(&mut self, segment_count: usize) -> Result<()> {
        validate_segment_count(segment_count)?;
        self.config.segment_count = segment_count;
        Ok(())
    }

    /// Rest length for chains built by the next reinitialize.
    pub fn set_segment_length(&mut self, segment_length: f32) -> Result<()> {
        validate_segment_length(segment_length)?;
        self.config.segment_length = segment_length;
        Ok(())
    }

    /// Truncates or extends the population to exactly `target` chains.
    ///
    /// New chains start at uniformly random domain positions, match the
    /// shape of the live population and continue the color cycle.
    pub fn resize_population(&mut self, target: usize) {
        let current = self.chains.len();
        if target <= current {
            self.chains.truncate(target);
        } else {
            self.chains.reserve(target - current);
            for index in current..target {
                let anchor = Vec2::new(
                    self.rng.gen::<f32>() * self.config.width,
                    self.rng.gen::<f32>() * self.config.height,
                );
                self.chains.push(Chain::spawn(
                    anchor,
                    self.active_segment_count,
                    self.solver.segment_length,
                    ChainColor::cycle(index),
                    &mut self.rng,
                ));
            }
        }
        self.config.population = target;
        log::debug!("population resized {current} -> {target}");
    }

    /// Rebuilds every chain around `config.cluster_count` fresh cluster centers.
    pub fn reinitialize(&mut self) -> Result<()> {
        self.reinitialize_with_clusters(self.config.cluster_count)
    }

    /// Discards all chains and distributes the configured population
    /// round-robin across `cluster_count` random centers inside the inset
    /// region, each within `cluster_radius` of its center.
    pub fn reinitialize_with_clusters(&mut self, cluster_count: usize) -> Result<()> {
        if cluster_count == 0 && self.config.population > 0 {
            return Err(SimulationError::InvalidClusterCount);
        }
        validate_segment_count(self.config.segment_count)?;
        validate_segment_length(self.config.segment_length)?;

        self.config.cluster_count = cluster_count;
        self.flow = FlowField::new(self.config.flow, self.config.height);
        self.forces = ForceRegistry::from_config(&self.config);
        self.solver = ConstraintSolver::from_config(&self.config);
        self.active_segment_count = self.config.segment_count;

        let inset = self.config.cluster_inset;
        let (width, height) = (self.config.width, self.config.height);
        self.cluster_centers = (0..cluster_count)
            .map(|_| {
                Vec2::new(
                    self.rng.gen_range(width * inset..=width * (1.0 - inset)),
                    self.rng.gen_range(height * inset..=height * (1.0 - inset)),
                )
            })
            .collect();

        self.chains.clear();
        self.chains.reserve(self.config.population);
        for index in 0..self.config.population {
            let center = self.cluster_centers[index % cluster_count];
            let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
            let radius = self.rng.gen::<f32>() * self.config.cluster_radius;
            let anchor = center + Vec2::from_angle(angle) * radius;
            self.chains.push(Chain::spawn(
                anchor,
                self.config.segment_count,
                self.config.segment_length,
                ChainColor::cycle(index),
                &mut self.rng,
            ));
        }

        log::debug!(
            "reinitialized {} chains x {} particles around {} clusters",
            self.chains.len(),
            self.config.segment_count,
            cluster_count
        );
        Ok(())
    }

    /// Attaches an external control channel drained at the start of every tick.
    pub fn attach_controls(&mut self, panel: ControlPanel) {
        self.controls = Some(panel);
    }

    pub fn detach_controls(&mut self) -> Option<ControlPanel> {
        self.controls.take()
    }

    /// Enables or disables Rayon-parallel chain updates. Results are
    /// identical either way; without the `parallel` feature this is a no-op.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        if enabled && !cfg!(feature = "parallel") {
            log::warn!("parallel stepping requested but the `parallel` feature is disabled");
            return;
        }
        self.parallel_enabled = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn particle_count(&self) -> usize {
        self.chains.iter().map(Chain::len).sum()
    }

    pub fn flow_intensity(&self) -> f32 {
        self.config.flow_intensity
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn domain(&self) -> Domain {
        Domain::new(self.config.width, self.config.height)
    }

    pub fn cluster_centers(&self) -> &[Vec2] {
        &self.cluster_centers
    }

    pub fn flow_field(&self) -> &FlowField {
        &self.flow
    }

    pub fn solver(&self) -> &ConstraintSolver {
        &self.solver
    }

    pub fn profiler(&self) -> &TickProfiler {
        &self.profiler
    }

    /// Visualization samples of the flow field at the current time and intensity.
    pub fn flow_grid(&self, spacing: f32) -> Vec<FlowSample> {
        self.flow
            .sample_grid(self.domain(), spacing, self.time, self.config.flow_intensity)
    }

    /// Geometry quality across every chain, measured against the active solver.
    pub fn metrics(&self) -> SolverMetrics {
        let mut metrics = SolverMetrics::default();
        for chain in &self.chains {
            metrics.record_chain(&chain.measure(&self.solver));
        }
        metrics
    }
}
