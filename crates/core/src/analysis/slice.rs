use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BinaryHeap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::{DependencyGraph, EdgeKind, NodeId, WeightTable};

/// Order in which pending nodes are relaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagationStrategy {
    /// First-in-first-out relaxation; a node is re-enqueued whenever a
    /// better path to it turns up. On dense graphs with many paths of
    /// increasing weight this re-relaxes the same nodes over and over and can
    /// get much slower than `BestFirst`.
    Fifo,
    /// Highest current weight first; every node settles in one pop.
    #[default]
    BestFirst,
    /// Three staged FIFO queues gated by dependency class.
    Phased,
}

impl PropagationStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            PropagationStrategy::Fifo => "fifo",
            PropagationStrategy::BestFirst => "best_first",
            PropagationStrategy::Phased => "phased",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SliceError {
    #[error("Slice threshold must be a finite number >= 0, got {0}")]
    InvalidThreshold(f64),
}

/// Check that `threshold` is usable as a pruning threshold.
///
/// Values above 1 are accepted; they yield an empty slice.
pub fn validate_threshold(threshold: f64) -> Result<(), SliceError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(SliceError::InvalidThreshold(threshold))
    }
}

/// Relevance-weighted dependency slice for one criterion and threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub criterion: NodeId,
    pub threshold: f64,
    /// Members and their best propagated weight; never contains the criterion.
    pub relevance: BTreeMap<NodeId, f64>,
    /// Number of accepted relaxations while computing the slice.
    pub relaxations: usize,
}

impl Slice {
    pub fn len(&self) -> usize {
        self.relevance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relevance.is_empty()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.relevance.contains_key(node)
    }

    pub fn relevance(&self, node: &str) -> Option<f64> {
        self.relevance.get(node).copied()
    }

    /// Member ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.relevance.keys().map(String::as_str)
    }
}

/// Computes slices by best-path relevance propagation over a fixed weight table.
#[derive(Debug, Clone, Copy)]
pub struct SliceEngine<'w> {
    weights: &'w WeightTable,
    strategy: PropagationStrategy,
}

impl<'w> SliceEngine<'w> {
    pub fn new(weights: &'w WeightTable) -> Self {
        Self { weights, strategy: PropagationStrategy::default() }
    }

    pub fn with_strategy(mut self, strategy: PropagationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> PropagationStrategy {
        self.strategy
    }

    /// Like [`SliceEngine::slice`], but rejects NaN, infinite and negative
    /// thresholds instead of computing with them.
    pub fn try_slice(
        &self,
        graph: &DependencyGraph,
        criterion: &str,
        threshold: f64,
    ) -> Result<Slice, SliceError> {
        validate_threshold(threshold)?;
        Ok(self.slice(graph, criterion, threshold))
    }

    /// Slice of `graph` for `criterion`, keeping nodes whose relevance is at
    /// least `threshold`. An unknown or isolated criterion yields an empty slice.
    /// A NaN threshold admits nothing.
    pub fn slice(&self, graph: &DependencyGraph, criterion: &str, threshold: f64) -> Slice {
        let mut state = Relaxation::new(criterion, threshold, self.weights);
        match self.strategy {
            PropagationStrategy::Fifo => state.run_fifo(graph),
            PropagationStrategy::BestFirst => state.run_best_first(graph),
            PropagationStrategy::Phased => state.run_phased(graph),
        }

        let relaxations = state.relaxations;
        let relevance: BTreeMap<NodeId, f64> = state
            .best
            .into_iter()
            .filter(|(node, _)| *node != criterion)
            .map(|(node, w)| (node.to_string(), w))
            .collect();

        debug!(
            criterion,
            threshold,
            strategy = self.strategy.as_str(),
            size = relevance.len(),
            relaxations,
            "computed slice"
        );

        Slice { criterion: criterion.to_string(), threshold, relevance, relaxations }
    }
}

/// Per-invocation propagation state; nothing survives between slices.
struct Relaxation<'a> {
    threshold: f64,
    weights: &'a WeightTable,
    best: HashMap<&'a str, f64>,
    relaxations: usize,
    criterion: &'a str,
}

impl<'a> Relaxation<'a> {
    fn new(criterion: &'a str, threshold: f64, weights: &'a WeightTable) -> Self {
        let mut best = HashMap::new();
        best.insert(criterion, 1.0);
        Self { threshold, weights, best, relaxations: 0, criterion }
    }

    /// Accept `candidate` for `node` if it clears the threshold and beats the
    /// best weight recorded so far.
    fn relax(&mut self, node: &'a str, candidate: f64) -> bool {
        if self.threshold.is_nan() || candidate < self.threshold {
            return false;
        }
        match self.best.entry(node) {
            Entry::Occupied(mut slot) => {
                if candidate <= *slot.get() {
                    return false;
                }
                slot.insert(candidate);
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
        self.relaxations += 1;
        true
    }

    fn run_fifo(&mut self, graph: &'a DependencyGraph) {
        let mut queue = VecDeque::from([(self.criterion, 1.0)]);
        while let Some((node, weight)) = queue.pop_front() {
            for (dep, kind) in graph.dependencies_of(node) {
                let candidate = weight * self.weights.decay(*kind);
                if self.relax(dep, candidate) {
                    queue.push_back((dep.as_str(), candidate));
                }
            }
        }
    }

    fn run_best_first(&mut self, graph: &'a DependencyGraph) {
        let mut heap = BinaryHeap::from([Pending { weight: 1.0, node: self.criterion }]);
        while let Some(Pending { weight, node }) = heap.pop() {
            // Stale entry superseded by a later, heavier push.
            if self.best.get(node).is_some_and(|&b| weight < b) {
                continue;
            }
            for (dep, kind) in graph.dependencies_of(node) {
                let candidate = weight * self.weights.decay(*kind);
                if self.relax(dep, candidate) {
                    heap.push(Pending { weight: candidate, node: dep.as_str() });
                }
            }
        }
    }

    fn run_phased(&mut self, graph: &'a DependencyGraph) {
        use EdgeKind::*;

        let mut direct = VecDeque::from([(self.criterion, 1.0)]);
        let mut message = VecDeque::new();
        let mut control = VecDeque::new();

        while let Some((node, weight)) = direct.pop_front() {
            for (dep, kind) in graph.dependencies_of(node) {
                let candidate = weight * self.weights.decay(*kind);
                if self.relax(dep, candidate) {
                    let entry = (dep.as_str(), candidate);
                    match kind {
                        ProcedureCall | Return | InterAgentData | Data => direct.push_back(entry),
                        InterAgentMessage => message.push_back(entry),
                        Control | Other(_) => control.push_back(entry),
                    }
                }
            }
        }

        while let Some((node, weight)) = message.pop_front() {
            for (dep, kind) in graph.dependencies_of(node) {
                let candidate = weight * self.weights.decay(*kind);
                if self.relax(dep, candidate) {
                    let entry = (dep.as_str(), candidate);
                    match kind {
                        InterAgentData | Data => message.push_back(entry),
                        Return | Control => control.push_back(entry),
                        _ => {}
                    }
                }
            }
        }

        while let Some((node, weight)) = control.pop_front() {
            for (dep, kind) in graph.dependencies_of(node) {
                if !matches!(kind, ProcedureCall | InterAgentData | Data) {
                    continue;
                }
                let candidate = weight * self.weights.decay(*kind);
                if self.relax(dep, candidate) {
                    control.push_back((dep.as_str(), candidate));
                }
            }
        }
    }
}

/// Heap entry ordered by weight.
struct Pending<'a> {
    weight: f64,
    node: &'a str,
}

impl PartialEq for Pending<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending<'_> {}

impl PartialOrd for Pending<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.total_cmp(&other.weight).then_with(|| other.node.cmp(self.node))
    }
}
