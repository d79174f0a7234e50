use crate::computation::{ComputationNode, SampleContext, Sampler};
use crate::config::SamplingConfig;
use crate::error::{PressureDropError, Result};
use crate::operations::Arithmetic;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

/// Trials drawn by one rayon task; each chunk owns an RNG seeded from the
/// run seed's master stream, so parallel output does not depend on thread
/// scheduling.
#[cfg(feature = "parallel")]
pub const PARALLEL_CHUNK_SIZE: usize = 4_096;

/// A type that represents uncertain data as a probability distribution
/// using sampling-based computation.
///
/// `Uncertain` is the Monte Carlo stand-in for a distributional value: it is
/// a sampling function plus a computation graph. Arithmetic between
/// uncertain values builds the graph, and every drawn trial samples each
/// input leaf once.
#[derive(Clone)]
pub struct Uncertain<T> {
    /// The sampling function that generates values from this distribution
    pub sample_fn: Sampler<T>,
    /// The computation graph node for lazy evaluation
    pub(crate) node: ComputationNode<T>,
}

impl<T> Uncertain<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an uncertain value with the given sampling function.
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    /// use rand::{Rng, RngCore};
    ///
    /// let custom = Uncertain::new(|rng: &mut dyn RngCore| rng.random::<f64>() * 10.0);
    /// assert!((0.0..10.0).contains(&custom.sample()));
    /// ```
    pub fn new<F>(sampler: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> T + Send + Sync + 'static,
    {
        let sampler: Sampler<T> = Arc::new(sampler);
        let node = ComputationNode::Leaf {
            id: uuid::Uuid::new_v4(),
            sample: sampler.clone(),
        };

        Self {
            sample_fn: sampler,
            node,
        }
    }

    /// Internal constructor with computation node for building computation graphs
    pub(crate) fn with_node(node: ComputationNode<T>) -> Self
    where
        T: Arithmetic,
    {
        let node_clone = node.clone();
        let sample_fn: Sampler<T> = Arc::new(move |rng: &mut dyn RngCore| {
            let mut context = SampleContext::new();
            node_clone.evaluate(rng, &mut context)
        });

        Self { sample_fn, node }
    }

    /// Draws one trial from the supplied random source.
    pub fn sample_with(&self, rng: &mut dyn RngCore) -> T {
        (self.sample_fn)(rng)
    }

    /// Draws one trial from the thread-local random source.
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let length = Uncertain::uniform(0.99, 1.01);
    /// let sample = length.sample();
    /// assert!((0.99..=1.01).contains(&sample));
    /// ```
    pub fn sample(&self) -> T {
        let mut rng = rand::rng();
        self.sample_with(&mut rng)
    }

    /// Transforms an uncertain value by applying a function to each sample.
    ///
    /// The result is a new leaf: it does not share draws with `self` when
    /// both appear in one expression.
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let millimetres = Uncertain::uniform(990.0, 1010.0);
    /// let metres = millimetres.map(|mm| mm / 1000.0);
    /// ```
    pub fn map<U, F>(&self, transform: F) -> Uncertain<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let sample_fn = self.sample_fn.clone();
        Uncertain::new(move |rng: &mut dyn RngCore| transform(sample_fn(rng)))
    }

    /// Take a specific number of samples from the thread-local random source
    ///
    /// # Example
    /// ```rust
    /// use poiseuille_uncertain::Uncertain;
    ///
    /// let uniform = Uncertain::uniform(0.0, 1.0);
    /// let samples = uniform.take_samples(1000);
    /// assert_eq!(samples.len(), 1000);
    /// ```
    pub fn take_samples(&self, count: usize) -> Vec<T> {
        let mut rng = rand::rng();
        (0..count).map(|_| self.sample_with(&mut rng)).collect()
    }

    /// Take `count` samples from a `StdRng` seeded with `seed`.
    ///
    /// Identical seeds give identical sample vectors.
    pub fn take_samples_seeded(&self, count: usize, seed: u64) -> Vec<T> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count).map(|_| self.sample_with(&mut rng)).collect()
    }

    /// Take `count` samples in parallel.
    ///
    /// Trials are split into chunks of [`PARALLEL_CHUNK_SIZE`]. A master
    /// `StdRng` seeded with `seed` hands out one seed per chunk, in chunk
    /// order; chunks are reassembled in order, so the output for a given seed
    /// is deterministic and neighbouring seeds share no chunk streams.
    #[cfg(feature = "parallel")]
    pub fn take_samples_par(&self, count: usize, seed: u64) -> Vec<T> {
        use rayon::prelude::*;

        let mut master = StdRng::seed_from_u64(seed);
        let chunk_seeds: Vec<u64> = (0..count.div_ceil(PARALLEL_CHUNK_SIZE))
            .map(|_| master.next_u64())
            .collect();

        let partials: Vec<Vec<T>> = chunk_seeds
            .into_par_iter()
            .enumerate()
            .map(|(chunk, chunk_seed)| {
                let start = chunk * PARALLEL_CHUNK_SIZE;
                let len = PARALLEL_CHUNK_SIZE.min(count - start);
                let mut rng = StdRng::seed_from_u64(chunk_seed);
                (0..len).map(|_| self.sample_with(&mut rng)).collect()
            })
            .collect();

        partials.into_iter().flatten().collect()
    }

    /// Draws the trial set described by `config`.
    ///
    /// # Errors
    /// Returns [`PressureDropError::InvalidSampleCount`] when `config.trials` is zero.
    pub fn draw(&self, config: &SamplingConfig) -> Result<Vec<T>> {
        if config.trials == 0 {
            return Err(PressureDropError::invalid_sample_count(
                0,
                "must be greater than zero",
            ));
        }

        if config.parallel {
            return Ok(self.draw_parallel(config.trials, config.seed));
        }

        Ok(self.draw_sequential(config.trials, config.seed))
    }

    fn draw_sequential(&self, trials: usize, seed: Option<u64>) -> Vec<T> {
        tracing::debug!(trials, ?seed, "drawing trials sequentially");
        match seed {
            Some(seed) => self.take_samples_seeded(trials, seed),
            None => self.take_samples(trials),
        }
    }

    #[cfg(feature = "parallel")]
    fn draw_parallel(&self, trials: usize, seed: Option<u64>) -> Vec<T> {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        tracing::debug!(trials, seed, "drawing trials in parallel");
        self.take_samples_par(trials, seed)
    }

    #[cfg(not(feature = "parallel"))]
    fn draw_parallel(&self, trials: usize, seed: Option<u64>) -> Vec<T> {
        tracing::warn!("parallel sampling requested but the `parallel` feature is disabled");
        self.draw_sequential(trials, seed)
    }
}

impl<T> std::fmt::Debug for Uncertain<T>
where
    T: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uncertain")
            .field("nodes", &self.node.node_count())
            .field("sample", &self.sample())
            .finish()
    }
}
