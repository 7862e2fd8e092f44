//! Experiment grid: repeat generation + reachability per configuration and
//! average the wall-clock time of the reachability step.
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{ReachError, Result};
use crate::generate::generate;
use crate::reachability::{ReachabilityComputer, Representation};
use crate::traversal::Method;

pub const DEFAULT_VERTEX_COUNTS: [usize; 7] = [20, 50, 80, 110, 140, 170, 200];
pub const DEFAULT_DENSITIES: [u32; 5] = [15, 35, 55, 75, 95];
pub const DEFAULT_ITERATIONS: usize = 100;

/// Axes of the sweep and how often each configuration is repeated.
#[derive(Clone, Debug)]
pub struct ExperimentConfig {
    pub vertex_counts: Vec<usize>,
    pub densities: Vec<u32>,
    pub methods: Vec<Method>,
    pub representations: Vec<Representation>,
    pub iterations: usize,
    /// Fixed seed for reproducible graphs; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Worker count; `None` uses the host's available parallelism.
    pub threads: Option<NonZeroUsize>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            vertex_counts: DEFAULT_VERTEX_COUNTS.to_vec(),
            densities: DEFAULT_DENSITIES.to_vec(),
            methods: Method::ALL.to_vec(),
            representations: Representation::ALL.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            threads: None,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(ReachError::InvalidConfig("iterations must be at least 1".into()));
        }
        let empty_axis = [
            ("vertex counts", self.vertex_counts.is_empty()),
            ("densities", self.densities.is_empty()),
            ("methods", self.methods.is_empty()),
            ("representations", self.representations.is_empty()),
        ]
        .into_iter()
        .find(|(_, empty)| *empty);
        if let Some((axis, _)) = empty_axis {
            return Err(ReachError::InvalidConfig(format!("no {axis} to sweep")));
        }
        if let Some(&density) = self.densities.iter().find(|&&d| d > 100) {
            return Err(ReachError::InvalidDensity { density });
        }
        Ok(())
    }

    /// Total number of timed iterations in the sweep.
    pub fn total_runs(&self) -> usize {
        self.vertex_counts.len()
            * self.densities.len()
            * self.methods.len()
            * self.representations.len()
            * self.iterations
    }
}

/// Mean timing of one (method, representation, n, density) configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub method: Method,
    pub representation: Representation,
    pub nodes: usize,
    pub density: u32,
    pub average_time_sec: f64,
    /// Estimated size of the graph in the timed representation. The edge
    /// count is fixed per configuration, so this is the same every iteration.
    pub mem_bytes: usize,
}

/// Sweep progress reported after every timed iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

pub struct ExperimentRunner {
    config: ExperimentConfig,
    computer: ReachabilityComputer,
}

impl ExperimentRunner {
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        let computer = config
            .threads
            .map_or_else(ReachabilityComputer::new, ReachabilityComputer::with_threads);
        Ok(Self { config, computer })
    }

    pub fn config(&self) -> &ExperimentConfig { &self.config }

    /// Runs one configuration `iterations` times, generating a fresh graph
    /// each time and timing only the reachability computation.
    pub fn run_configuration(
        &self,
        n: usize,
        density: u32,
        method: Method,
        representation: Representation,
    ) -> Result<ExperimentRecord> {
        self.run_configuration_with(n, density, method, representation, &mut |_: Duration| {})
    }

    fn run_configuration_with(
        &self,
        n: usize,
        density: u32,
        method: Method,
        representation: Representation,
        on_iteration: &mut dyn FnMut(Duration),
    ) -> Result<ExperimentRecord> {
        let mut rng = self.rng_for(n, density, method, representation);
        let mut total = Duration::ZERO;
        let mut mem_bytes = 0;
        for _ in 0..self.config.iterations {
            let graph = generate(n, density, &mut rng)?;
            mem_bytes = representation.memory_estimate_bytes(&graph);
            let start = Instant::now();
            let reachability = self.computer.compute_all(&graph, method, representation)?;
            let elapsed = start.elapsed();
            drop(reachability);
            total += elapsed;
            on_iteration(elapsed);
        }
        let average_time_sec = total.as_secs_f64() / self.config.iterations as f64;
        Ok(ExperimentRecord { method, representation, nodes: n, density, average_time_sec, mem_bytes })
    }

    /// Sweeps the whole grid (n, then density, then method, then
    /// representation) and returns the records in sweep order.
    #[instrument(skip(self, observer), fields(total = self.config.total_runs()))]
    pub fn run_grid(&self, mut observer: impl FnMut(Progress)) -> Result<Vec<ExperimentRecord>> {
        let total = self.config.total_runs();
        let mut completed = 0;
        let mut records = Vec::with_capacity(total / self.config.iterations);
        for &n in &self.config.vertex_counts {
            for &density in &self.config.densities {
                for &method in &self.config.methods {
                    for &representation in &self.config.representations {
                        let record = self.run_configuration_with(n, density, method, representation, &mut |_: Duration| {
                            completed += 1;
                            observer(Progress { completed, total });
                        })?;
                        info!(
                            %method,
                            %representation,
                            nodes = n,
                            density,
                            average_ms = record.average_time_sec * 1e3,
                            mem_bytes = record.mem_bytes,
                            "configuration finished"
                        );
                        records.push(record);
                    }
                }
            }
        }
        Ok(records)
    }

    fn rng_for(&self, n: usize, density: u32, method: Method, representation: Representation) -> StdRng {
        match self.config.seed {
            // Per-configuration stream so a record does not depend on where
            // its configuration sits in the sweep.
            Some(seed) => {
                let mix = ((n as u64) << 32)
                    ^ (u64::from(density) << 16)
                    ^ ((method as u64) << 8)
                    ^ (representation as u64);
                StdRng::seed_from_u64(seed ^ mix.wrapping_mul(0x9E37_79B9_7F4A_7C15))
            }
            None => StdRng::from_entropy(),
        }
    }
}
