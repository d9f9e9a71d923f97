use kurbo::Point;

use crate::morph::kmeans;
use crate::state::contours::VertexLoop;

/// Correspondence between the holes of two contour sets.
///
/// `pairs` holds matched `(source, destination)` hole indices; indices
/// may repeat when a strategy merges or splits holes. `shrink` lists
/// source holes with no destination (they collapse to a point at their
/// own centroid) and `grow` lists destination holes with no source (they
/// emerge from a point at their own centroid).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HoleCorrespondence {
    /// Matched (source index, destination index) pairs.
    pub pairs: Vec<(usize, usize)>,
    /// Source holes shrinking to nothing.
    pub shrink: Vec<usize>,
    /// Destination holes growing from nothing.
    pub grow: Vec<usize>,
}

fn default_max_iterations() -> usize {
    50
}

fn default_seed() -> u64 {
    42
}

fn default_balance() -> bool {
    true
}

/// Selectable hole matching strategy with its explicit parameters.
///
/// All strategies share one contract: given the hole lists of a source
/// and destination contour set, produce a [`HoleCorrespondence`]. Two
/// rules apply before any strategy runs: an empty side reduces to pure
/// grow/shrink, and equal counts always reduce to direct one-to-one
/// nearest-centroid pairing (clustering with as many clusters as holes
/// degenerates to exactly that).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum HoleStrategy {
    /// Nearest-centroid matching with replacement from the larger side.
    Greedy,
    /// Deterministic k-means grouping of the larger side; spatially close
    /// holes merge or split together.
    Clustering {
        /// k-means iteration cap.
        #[serde(default = "default_max_iterations")]
        max_iterations: usize,
        /// Seed for reproducible clustering.
        #[serde(default = "default_seed")]
        seed: u64,
        /// Rebalance clusters so sizes differ by at most one.
        #[serde(default = "default_balance")]
        balance: bool,
    },
    /// min(N, M) holes move; the excess shrinks or grows in place.
    Discrete,
    /// No matching: every source hole shrinks, every destination hole
    /// grows.
    Simple,
    /// Globally distance-minimizing assignment (Kuhn-Munkres); excess
    /// handled as in `Discrete`.
    #[cfg(feature = "optimal")]
    Optimal,
}

impl Default for HoleStrategy {
    fn default() -> Self {
        Self::Clustering {
            max_iterations: default_max_iterations(),
            seed: default_seed(),
            balance: default_balance(),
        }
    }
}

impl HoleStrategy {
    /// Compute the hole correspondence for `src` and `dst` hole lists.
    pub fn correspond(&self, src: &[VertexLoop], dst: &[VertexLoop]) -> HoleCorrespondence {
        let n = src.len();
        let m = dst.len();

        if n == 0 && m == 0 {
            return HoleCorrespondence::default();
        }
        if m == 0 {
            return HoleCorrespondence {
                shrink: (0..n).collect(),
                ..HoleCorrespondence::default()
            };
        }
        if n == 0 {
            return HoleCorrespondence {
                grow: (0..m).collect(),
                ..HoleCorrespondence::default()
            };
        }

        let src_c = centroids(src);
        let dst_c = centroids(dst);

        if let Self::Simple = self {
            return HoleCorrespondence {
                pairs: Vec::new(),
                shrink: (0..n).collect(),
                grow: (0..m).collect(),
            };
        }

        if n == m {
            return HoleCorrespondence {
                pairs: match_equal(&src_c, &dst_c),
                ..HoleCorrespondence::default()
            };
        }

        match self {
            Self::Greedy => greedy_unequal(&src_c, &dst_c),
            Self::Clustering {
                max_iterations,
                seed,
                balance,
            } => clustering_unequal(&src_c, &dst_c, *max_iterations, *seed, *balance),
            Self::Discrete => discrete_unequal(&src_c, &dst_c),
            Self::Simple => unreachable!("handled above"),
            #[cfg(feature = "optimal")]
            Self::Optimal => optimal_unequal(&src_c, &dst_c),
        }
    }
}

fn centroids(holes: &[VertexLoop]) -> Vec<Point> {
    holes.iter().map(VertexLoop::centroid).collect()
}

/// One-to-one nearest-centroid pairing without replacement.
///
/// Destinations pick in order; each claims its nearest unused source.
fn match_equal(src_c: &[Point], dst_c: &[Point]) -> Vec<(usize, usize)> {
    let mut used = vec![false; src_c.len()];
    let mut pairs = Vec::with_capacity(dst_c.len());
    for (j, dc) in dst_c.iter().enumerate() {
        let best = (0..src_c.len())
            .filter(|&i| !used[i])
            .min_by(|&a, &b| src_c[a].distance(*dc).total_cmp(&src_c[b].distance(*dc)));
        if let Some(i) = best {
            used[i] = true;
            pairs.push((i, j));
        }
    }
    pairs
}

/// With-replacement nearest matching driven from the larger side, so
/// every hole participates: merging when sources outnumber destinations,
/// splitting otherwise.
fn greedy_unequal(src_c: &[Point], dst_c: &[Point]) -> HoleCorrespondence {
    let mut pairs = Vec::new();
    if src_c.len() > dst_c.len() {
        for (i, sc) in src_c.iter().enumerate() {
            pairs.push((i, nearest_index(dst_c, *sc)));
        }
    } else {
        for (j, dc) in dst_c.iter().enumerate() {
            pairs.push((nearest_index(src_c, *dc), j));
        }
    }
    HoleCorrespondence {
        pairs,
        ..HoleCorrespondence::default()
    }
}

/// Cluster the larger side's centroids into min(N, M) groups, pair each
/// cluster with its nearest opposite hole, then map every member of the
/// cluster onto that hole.
fn clustering_unequal(
    src_c: &[Point],
    dst_c: &[Point],
    max_iterations: usize,
    seed: u64,
    balance: bool,
) -> HoleCorrespondence {
    let merging = src_c.len() > dst_c.len();
    let (larger, smaller) = if merging { (src_c, dst_c) } else { (dst_c, src_c) };
    let k = smaller.len();

    let assignments = kmeans::cluster(larger, k, max_iterations, seed, balance);

    // Pair each cluster with its nearest unused hole on the smaller side.
    let mut cluster_target = vec![usize::MAX; k];
    let mut used = vec![false; k];
    for ci in 0..k {
        let members: Vec<Point> = larger
            .iter()
            .zip(&assignments)
            .filter(|&(_, &a)| a == ci)
            .map(|(p, _)| *p)
            .collect();
        if members.is_empty() {
            continue;
        }
        let cc = kmeans::mean(&members);
        let best = (0..k)
            .filter(|&j| !used[j])
            .min_by(|&a, &b| smaller[a].distance(cc).total_cmp(&smaller[b].distance(cc)));
        if let Some(j) = best {
            used[j] = true;
            cluster_target[ci] = j;
        }
    }

    let mut pairs = Vec::with_capacity(larger.len());
    for (i, &ci) in assignments.iter().enumerate() {
        let target = if cluster_target[ci] != usize::MAX {
            cluster_target[ci]
        } else {
            nearest_index(smaller, larger[i])
        };
        if merging {
            pairs.push((i, target));
        } else {
            pairs.push((target, i));
        }
    }
    pairs.sort_unstable();
    HoleCorrespondence {
        pairs,
        ..HoleCorrespondence::default()
    }
}

/// Match min(N, M) pairs by repeatedly taking the globally closest
/// unused (source, destination) pair; excess holes shrink or grow at
/// their own position.
fn discrete_unequal(src_c: &[Point], dst_c: &[Point]) -> HoleCorrespondence {
    let n = src_c.len();
    let m = dst_c.len();
    let want = n.min(m);

    let mut src_used = vec![false; n];
    let mut dst_used = vec![false; m];
    let mut pairs = Vec::with_capacity(want);
    for _ in 0..want {
        let mut best = None;
        let mut best_dist = f64::INFINITY;
        for i in (0..n).filter(|&i| !src_used[i]) {
            for j in (0..m).filter(|&j| !dst_used[j]) {
                let d = src_c[i].distance(dst_c[j]);
                if d < best_dist {
                    best_dist = d;
                    best = Some((i, j));
                }
            }
        }
        let Some((i, j)) = best else { break };
        src_used[i] = true;
        dst_used[j] = true;
        pairs.push((i, j));
    }
    pairs.sort_unstable();

    HoleCorrespondence {
        pairs,
        shrink: (0..n).filter(|&i| !src_used[i]).collect(),
        grow: (0..m).filter(|&j| !dst_used[j]).collect(),
    }
}

/// Globally minimal assignment of the smaller side onto the larger via
/// Kuhn-Munkres on a scaled integer cost matrix.
#[cfg(feature = "optimal")]
fn optimal_unequal(src_c: &[Point], dst_c: &[Point]) -> HoleCorrespondence {
    use pathfinding::matrix::Matrix;
    use pathfinding::prelude::kuhn_munkres_min;

    const SCALE: f64 = 1e6;

    let n = src_c.len();
    let m = dst_c.len();
    let src_rows = n <= m;
    let (rows, cols) = if src_rows { (src_c, dst_c) } else { (dst_c, src_c) };

    let weights = Matrix::from_rows(rows.iter().map(|r| {
        cols.iter()
            .map(|c| (r.distance(*c) * SCALE).round() as i64)
            .collect::<Vec<_>>()
    }))
    .expect("cost matrix rows have equal length");
    let (_, assignment) = kuhn_munkres_min(&weights);

    let mut pairs: Vec<(usize, usize)> = assignment
        .iter()
        .enumerate()
        .map(|(row, &col)| if src_rows { (row, col) } else { (col, row) })
        .collect();
    pairs.sort_unstable();

    let mut src_used = vec![false; n];
    let mut dst_used = vec![false; m];
    for &(i, j) in &pairs {
        src_used[i] = true;
        dst_used[j] = true;
    }
    HoleCorrespondence {
        pairs,
        shrink: (0..n).filter(|&i| !src_used[i]).collect(),
        grow: (0..m).filter(|&j| !dst_used[j]).collect(),
    }
}

fn nearest_index(candidates: &[Point], from: Point) -> usize {
    candidates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| from.distance(**a).total_cmp(&from.distance(**b)))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/morph/holes.rs"]
mod tests;
