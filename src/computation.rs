use crate::operations::{Arithmetic, arithmetic::BinaryOperation};
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;

/// A sampling function drawing one value from the supplied random source.
pub type Sampler<T> = Arc<dyn Fn(&mut dyn RngCore) -> T + Send + Sync>;

/// Context for memoizing samples within a single trial, so that a value
/// referenced twice in one expression (the `A` in `A * A`) takes one draw.
pub struct SampleContext {
    /// Memoized values indexed by node ID
    memoized_values: HashMap<uuid::Uuid, Box<dyn std::any::Any + Send>>,
}

impl SampleContext {
    /// Create a new empty sample context
    #[must_use]
    pub fn new() -> Self {
        Self {
            memoized_values: HashMap::new(),
        }
    }

    /// Get a memoized value for a given node ID
    #[must_use]
    pub fn get_value<T: Clone + 'static>(&self, id: &uuid::Uuid) -> Option<T> {
        self.memoized_values.get(id)?.downcast_ref::<T>().cloned()
    }

    /// Set a memoized value for a given node ID
    pub fn set_value<T: Clone + Send + 'static>(&mut self, id: uuid::Uuid, value: T) {
        self.memoized_values.insert(id, Box::new(value));
    }

    /// Get the number of memoized values
    #[must_use]
    pub fn len(&self) -> usize {
        self.memoized_values.len()
    }

    /// Check if the context is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memoized_values.is_empty()
    }
}

impl Default for SampleContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Computation graph node for lazy evaluation.
///
/// An expression such as `8π · μ · L · Q / (A · A)` is kept as a tree and only
/// evaluated when a trial is drawn. Leaves carry a unique id; within one trial
/// each leaf is sampled once and reused wherever it appears.
#[derive(Clone)]
pub enum ComputationNode<T> {
    /// Leaf node representing a direct sampling function with unique ID
    Leaf { id: uuid::Uuid, sample: Sampler<T> },

    /// Binary operation node for combining two uncertain values
    BinaryOp {
        left: Box<ComputationNode<T>>,
        right: Box<ComputationNode<T>>,
        operation: BinaryOperation,
    },
}

impl<T> ComputationNode<T>
where
    T: Arithmetic,
{
    /// Evaluates one trial of the graph, drawing leaves from `rng` and
    /// reusing draws already recorded in `context`.
    pub fn evaluate(&self, rng: &mut dyn RngCore, context: &mut SampleContext) -> T {
        match self {
            ComputationNode::Leaf { id, sample } => {
                if let Some(cached) = context.get_value::<T>(id) {
                    cached
                } else {
                    let value = sample(rng);
                    context.set_value(*id, value.clone());
                    value
                }
            }

            ComputationNode::BinaryOp {
                left,
                right,
                operation,
            } => {
                let left_val = left.evaluate(rng, context);
                let right_val = right.evaluate(rng, context);
                operation.apply(left_val, right_val)
            }
        }
    }

    /// Evaluates the graph in a new context, i.e. one independent trial.
    #[must_use]
    pub fn evaluate_fresh(&self, rng: &mut dyn RngCore) -> T {
        let mut context = SampleContext::new();
        self.evaluate(rng, &mut context)
    }
}

impl<T> ComputationNode<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a new leaf node
    pub fn leaf<F>(sample: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> T + Send + Sync + 'static,
    {
        ComputationNode::Leaf {
            id: uuid::Uuid::new_v4(),
            sample: Arc::new(sample),
        }
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary_op(
        left: ComputationNode<T>,
        right: ComputationNode<T>,
        operation: BinaryOperation,
    ) -> Self {
        ComputationNode::BinaryOp {
            left: Box::new(left),
            right: Box::new(right),
            operation,
        }
    }

    /// Counts the number of nodes in the computation graph
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            ComputationNode::Leaf { .. } => 1,
            ComputationNode::BinaryOp { left, right, .. } => {
                1 + left.node_count() + right.node_count()
            }
        }
    }

    /// Gets the depth of the computation graph
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            ComputationNode::Leaf { .. } => 1,
            ComputationNode::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}
