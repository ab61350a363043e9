//! Speaker clustering
//!
//! Groups segment embeddings into a bounded number of speaker identities via
//! bottom-up (agglomerative) hierarchical clustering with average linkage.
//!
//! Distinguishing more than a small, fixed number of speakers reliably from
//! short recordings is not feasible without an estimated speaker count, so
//! the cluster count is capped at a configured ceiling (default 2). This is
//! a documented limitation, not a defect.

use tracing::debug;

use super::embedding::SpeakerEmbedding;
use crate::error::{VoxError, VoxResult};

/// Clustering configuration
#[derive(Debug, Clone)]
pub struct ClusteringConfig {
    /// Ceiling on the number of speaker clusters (default: 2)
    pub max_speakers: usize,
    /// Use cosine distance instead of Euclidean
    pub use_cosine_distance: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            max_speakers: 2,
            use_cosine_distance: true,
        }
    }
}

impl ClusteringConfig {
    /// Set the speaker ceiling
    #[must_use]
    pub fn with_max_speakers(mut self, max_speakers: usize) -> Self {
        self.max_speakers = max_speakers;
        self
    }

    /// Select Euclidean distance instead of cosine
    #[must_use]
    pub fn with_euclidean_distance(mut self) -> Self {
        self.use_cosine_distance = false;
        self
    }
}

/// Agglomerative (hierarchical) speaker clustering
#[derive(Debug, Clone)]
pub struct AgglomerativeClustering {
    config: ClusteringConfig,
}

impl AgglomerativeClustering {
    /// Create a new clusterer
    #[must_use]
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Cluster embeddings into `min(max_speakers, N)` groups.
    ///
    /// Returns exactly one label per embedding. Labels are small integers
    /// renumbered by order of first appearance, so runs are deterministic;
    /// only the partition they induce is meaningful.
    ///
    /// A single embedding short-circuits to `[0]` — clustering one sample is
    /// undefined and never reaches the merge loop. An empty slice yields an
    /// empty label vector.
    pub fn cluster(&self, embeddings: &[SpeakerEmbedding]) -> VoxResult<Vec<usize>> {
        let n = embeddings.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if n == 1 {
            return Ok(vec![0]);
        }

        let dim = embeddings[0].dim();
        if embeddings.iter().any(|e| e.dim() != dim) {
            return Err(VoxError::Diarization(
                "embeddings have mismatched dimensions".to_string(),
            ));
        }

        // Fewer embeddings than the ceiling: clamp, never error
        let k = self.config.max_speakers.min(n).max(1);

        let distances = self.pairwise_distances(embeddings);

        // Every embedding starts as its own cluster; merge the closest pair
        // (average linkage) until k clusters remain.
        let mut clusters: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        while clusters.len() > k {
            let (a, b) = closest_pair(&clusters, &distances);
            let merged = clusters.remove(b);
            clusters[a].extend(merged);
        }

        debug!(
            embeddings = n,
            clusters = clusters.len(),
            ceiling = self.config.max_speakers,
            "clustered speaker embeddings"
        );

        Ok(labels_by_first_appearance(&clusters, n))
    }

    /// Distance between two embeddings under the configured metric
    fn distance(&self, a: &SpeakerEmbedding, b: &SpeakerEmbedding) -> f32 {
        if self.config.use_cosine_distance {
            1.0 - a.cosine_similarity(b)
        } else {
            a.euclidean_distance(b)
        }
    }

    /// Symmetric pairwise distance matrix
    fn pairwise_distances(&self, embeddings: &[SpeakerEmbedding]) -> Vec<Vec<f32>> {
        let n = embeddings.len();
        let mut distances = vec![vec![0.0f32; n]; n];

        for i in 0..n {
            for j in i + 1..n {
                let d = self.distance(&embeddings[i], &embeddings[j]);
                distances[i][j] = d;
                distances[j][i] = d;
            }
        }

        distances
    }
}

/// Find the pair of clusters with minimal average linkage.
///
/// Ties resolve to the first pair in scan order, keeping merges
/// deterministic. Returns indices with `a < b`.
fn closest_pair(clusters: &[Vec<usize>], distances: &[Vec<f32>]) -> (usize, usize) {
    let mut best = (0, 1);
    let mut best_dist = f32::MAX;

    for a in 0..clusters.len() {
        for b in a + 1..clusters.len() {
            let linkage = average_linkage(&clusters[a], &clusters[b], distances);
            if linkage < best_dist {
                best_dist = linkage;
                best = (a, b);
            }
        }
    }

    best
}

/// Mean pairwise distance between two clusters
fn average_linkage(a: &[usize], b: &[usize], distances: &[Vec<f32>]) -> f32 {
    let total: f32 = a
        .iter()
        .flat_map(|&i| b.iter().map(move |&j| distances[i][j]))
        .sum();
    total / (a.len() * b.len()) as f32
}

/// Renumber clusters by the order their first member appears in the input
fn labels_by_first_appearance(clusters: &[Vec<usize>], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..clusters.len()).collect();
    order.sort_by_key(|&c| clusters[c].iter().copied().min().unwrap_or(usize::MAX));

    let mut labels = vec![0usize; n];
    for (label, &c) in order.iter().enumerate() {
        for &member in &clusters[c] {
            labels[member] = label;
        }
    }

    labels
}
