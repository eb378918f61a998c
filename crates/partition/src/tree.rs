//! crates/partition/src/tree.rs
//! Vantage-point tree over a shared fingerprint array.
//!
//! The tree never copies the fingerprints. It owns a permutation of their
//! absolute indices, partitioned in place so that every node covers one
//! contiguous slice of it, plus a flat arena of nodes. Construction and
//! queries both walk the arena with explicit stacks.

use std::fmt;
use std::sync::Arc;

use logging::trace_index;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::TreeError;
use crate::metric::Metric;

/// Tuning knobs for tree construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeSettings {
    /// Seed of the generator that samples split candidates.
    pub seed: u64,
    /// Upper bound on vantage point candidates scored per node.
    pub vertex_samples: usize,
    /// Upper bound on distances sampled per candidate.
    pub median_samples: usize,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            vertex_samples: 4,
            median_samples: 16,
        }
    }
}

/// Ranges this small are never split.
const LEAF_SIZE: usize = 2;
/// Ranges up to this size pick their vantage point exhaustively.
const EXHAUSTIVE_SIZE: usize = 5;

type NodeId = usize;

#[derive(Clone, Copy, Debug)]
enum Kind {
    Leaf,
    Split {
        /// Absolute index of the vantage point.
        center: usize,
        /// Points strictly closer than this go inside.
        radius: u32,
        inner: NodeId,
        outer: NodeId,
    },
}

#[derive(Clone, Copy, Debug)]
struct Node {
    start: usize,
    end: usize,
    depth: usize,
    kind: Kind,
}

/// Best candidate found for one needle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    needle: u64,
    index: Option<usize>,
    value: u64,
    distance: u32,
    offered: u32,
    updated: u32,
}

impl Match {
    /// An empty match for `needle`.
    #[must_use]
    pub const fn new(needle: u64) -> Self {
        Self {
            needle,
            index: None,
            value: 0,
            distance: u32::MAX,
            offered: 0,
            updated: 0,
        }
    }

    /// Considers `value` at `index`, keeping it if strictly closer.
    #[inline]
    pub fn offer<M: Metric>(&mut self, index: usize, value: u64, metric: &M) {
        self.offered += 1;
        let distance = metric.distance(self.needle, value);
        if distance < self.distance {
            self.updated += 1;
            self.index = Some(index);
            self.value = value;
            self.distance = distance;
        }
    }

    /// Returns `false` once an exact match was found.
    #[inline]
    #[must_use]
    pub const fn is_receptive(&self) -> bool {
        self.distance != 0
    }

    /// Fingerprint searched for.
    #[must_use]
    pub const fn needle(&self) -> u64 {
        self.needle
    }

    /// Absolute index of the best candidate.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// Fingerprint of the best candidate.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Distance to the best candidate, `u32::MAX` while nothing was offered.
    #[must_use]
    pub const fn distance(&self) -> u32 {
        self.distance
    }

    /// Candidates compared.
    #[must_use]
    pub const fn offered(&self) -> u32 {
        self.offered
    }

    /// Times a closer candidate replaced the best one.
    #[must_use]
    pub const fn updated(&self) -> u32 {
        self.updated
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(
                f,
                "{:016x} ~= {:016x} @{} d={} |{} offers/{} updates",
                self.needle, self.value, index, self.distance, self.offered, self.updated
            ),
            None => write!(f, "{:016x} not found |{} offers", self.needle, self.offered),
        }
    }
}

/// Pending work of a query.
enum Visit {
    Node(NodeId),
    /// Outer child of a split, decided after the inner one was searched.
    Outer {
        id: NodeId,
        center_distance: u32,
        radius: u32,
    },
}

/// Exact nearest neighbor index under a [`Metric`].
#[derive(Clone, Debug)]
pub struct MetricTree<M> {
    metric: M,
    source: Arc<[u64]>,
    first: usize,
    order: Box<[usize]>,
    nodes: Vec<Node>,
    height: usize,
}

impl<M: Metric> MetricTree<M> {
    /// Indexes `source[first..]`.
    ///
    /// Reported indices are absolute positions in `source`.
    pub fn new(
        source: Arc<[u64]>,
        first: usize,
        metric: M,
        settings: &TreeSettings,
    ) -> Result<Self, TreeError> {
        if first >= source.len() {
            return Err(TreeError::Empty {
                first,
                len: source.len(),
            });
        }

        let mut tree = Self {
            metric,
            order: (first..source.len()).collect(),
            source,
            first,
            nodes: Vec::new(),
            height: 0,
        };
        tree.build(settings);

        trace_index!(
            points = tree.len(),
            nodes = tree.nodes.len(),
            height = tree.height,
            "built metric tree"
        );
        Ok(tree)
    }

    /// Indexes a copy of `values`.
    pub fn from_slice(values: &[u64], metric: M) -> Result<Self, TreeError> {
        Self::new(Arc::from(values), 0, metric, &TreeSettings::default())
    }

    fn build(&mut self, settings: &TreeSettings) {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        let mut samples = Vec::with_capacity(settings.median_samples);
        let mut best = Vec::with_capacity(settings.median_samples);

        self.nodes.push(Node {
            start: 0,
            end: self.order.len(),
            depth: 0,
            kind: Kind::Leaf,
        });
        let mut pending = vec![0];

        while let Some(id) = pending.pop() {
            let Node { start, end, depth, .. } = self.nodes[id];
            self.height = self.height.max(depth + 1);

            let count = end - start;
            if count <= LEAF_SIZE {
                continue;
            }
            let pick = if count <= EXHAUSTIVE_SIZE {
                self.exhaustive_center(start, end)
            } else {
                self.sampled_center(start, end, settings, &mut rng, &mut samples, &mut best)
            };
            let Some((center, radius)) = pick else {
                continue;
            };

            let split = self.partition(start, end, center, radius);
            if split == start || split == end {
                continue;
            }

            let inner = self.nodes.len();
            let outer = inner + 1;
            for (start, end) in [(start, split), (split, end)] {
                self.nodes.push(Node {
                    start,
                    end,
                    depth: depth + 1,
                    kind: Kind::Leaf,
                });
            }
            self.nodes[id].kind = Kind::Split {
                center,
                radius,
                inner,
                outer,
            };
            pending.push(outer);
            pending.push(inner);
        }
    }

    /// Picks the point whose farthest neighbor is closest. Everything nearer
    /// than that farthest distance goes inside.
    fn exhaustive_center(&self, start: usize, end: usize) -> Option<(usize, u32)> {
        let points = &self.order[start..end];
        let (center, radius) = points
            .iter()
            .map(|&candidate| {
                let value = self.source[candidate];
                let farthest = points
                    .iter()
                    .map(|&other| self.metric.distance(value, self.source[other]))
                    .max()
                    .unwrap_or(0);
                (candidate, farthest)
            })
            .min_by_key(|&(_, farthest)| farthest)?;
        (radius > 0).then_some((center, radius))
    }

    /// Scores the first few points of the range by the variance of their
    /// distances to random points and splits the winner at the median.
    fn sampled_center(
        &self,
        start: usize,
        end: usize,
        settings: &TreeSettings,
        rng: &mut StdRng,
        samples: &mut Vec<u32>,
        best: &mut Vec<u32>,
    ) -> Option<(usize, u32)> {
        let count = end - start;
        let centers = settings.vertex_samples.min(count >> 1);
        let sample_count = settings.median_samples.min(count).max(1);

        let mut max_variance = 0.0f64;
        let mut winner = None;
        for c in 0..centers {
            let value = self.source[self.order[start + c]];
            samples.clear();
            samples.extend((0..sample_count).map(|_| {
                let other = self.order[start + rng.gen_range(0..count)];
                self.metric.distance(value, self.source[other])
            }));

            let n = sample_count as f64;
            let sum: f64 = samples.iter().map(|&d| f64::from(d)).sum();
            let squares: f64 = samples.iter().map(|&d| f64::from(d) * f64::from(d)).sum();
            let variance = (squares - sum * sum / n) / n;
            if variance > max_variance {
                max_variance = variance;
                winner = Some(self.order[start + c]);
                std::mem::swap(samples, best);
            }
        }

        let center = winner?;
        let mid = best.len() / 2;
        let (_, &mut median, _) = best.select_nth_unstable(mid);
        Some((center, median))
    }

    /// Moves points closer than `radius` to the front and returns where the
    /// outer points begin.
    fn partition(&mut self, start: usize, end: usize, center: usize, radius: u32) -> usize {
        let center = self.source[center];
        let (mut lo, mut hi) = (start, end);
        while lo < hi {
            if self.metric.distance(center, self.source[self.order[lo]]) < radius {
                lo += 1;
            } else {
                hi -= 1;
                self.order.swap(lo, hi);
            }
        }
        lo
    }

    /// Nearest point to `needle`.
    ///
    /// A `hint` that addresses an indexed point is offered first to tighten
    /// the search bound; hints outside the index are ignored.
    #[must_use]
    pub fn nearest(&self, needle: u64, hint: Option<usize>) -> Match {
        let mut found = Match::new(needle);
        if let Some(hint) = hint.filter(|h| (self.first..self.source.len()).contains(h)) {
            found.offer(hint, self.source[hint], &self.metric);
        }
        self.search(&mut found);
        found
    }

    /// Continues a search, improving `found` in place.
    pub fn search(&self, found: &mut Match) {
        let needle = found.needle();
        let mut stack = vec![Visit::Node(0)];

        while let Some(visit) = stack.pop() {
            if !found.is_receptive() {
                break;
            }
            match visit {
                Visit::Node(id) => {
                    let node = self.nodes[id];
                    match node.kind {
                        Kind::Leaf => {
                            for &index in &self.order[node.start..node.end] {
                                if !found.is_receptive() {
                                    break;
                                }
                                found.offer(index, self.source[index], &self.metric);
                            }
                        }
                        Kind::Split {
                            center,
                            radius,
                            inner,
                            outer,
                        } => {
                            let center_distance = self.metric.distance(needle, self.source[center]);
                            stack.push(Visit::Outer {
                                id: outer,
                                center_distance,
                                radius,
                            });
                            let bound = i64::from(found.distance());
                            if i64::from(center_distance) - bound < i64::from(radius) {
                                stack.push(Visit::Node(inner));
                            }
                        }
                    }
                }
                Visit::Outer {
                    id,
                    center_distance,
                    radius,
                } => {
                    let bound = i64::from(found.distance());
                    if i64::from(center_distance) + bound >= i64::from(radius) {
                        stack.push(Visit::Node(id));
                    }
                }
            }
        }
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`; empty trees cannot be built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Absolute index of the first indexed point.
    #[must_use]
    pub const fn first(&self) -> usize {
        self.first
    }

    /// Number of levels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Distance function of the tree.
    #[must_use]
    pub const fn metric(&self) -> &M {
        &self.metric
    }

    /// The indexed values, warm-up prefix included.
    #[must_use]
    pub fn source(&self) -> &[u64] {
        &self.source
    }
}

/// One line per node, indented by depth: `start..last *radius`.
impl<M> fmt::Display for MetricTree<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            let radius = match node.kind {
                Kind::Leaf => 0,
                Kind::Split {
                    radius,
                    inner,
                    outer,
                    ..
                } => {
                    stack.push(outer);
                    stack.push(inner);
                    radius
                }
            };
            writeln!(
                f,
                "{}{}..{} *{}",
                "\t".repeat(node.depth),
                node.start + self.first,
                node.end + self.first - 1,
                radius
            )?;
        }
        Ok(())
    }
}
