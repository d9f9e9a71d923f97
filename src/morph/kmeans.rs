use kurbo::Point;

use crate::foundation::math::Rng64;

/// Deterministic k-means over 2-D points.
///
/// Seeding uses k-means++ driven by a seeded SplitMix64 generator, so a
/// given (points, k, seed) always yields the same assignment. Returns
/// one cluster index per input point.
pub(crate) fn cluster(
    points: &[Point],
    k: usize,
    max_iterations: usize,
    seed: u64,
    balance: bool,
) -> Vec<usize> {
    if k == 0 || points.is_empty() {
        return vec![0; points.len()];
    }
    if k >= points.len() {
        return (0..points.len()).collect();
    }

    let mut rng = Rng64::new(seed);
    let mut centroids = plus_plus_init(points, k, &mut rng);

    let mut assignments = vec![0usize; points.len()];
    for _ in 0..max_iterations {
        for (i, p) in points.iter().enumerate() {
            assignments[i] = nearest(&centroids, *p);
        }

        let mut converged = true;
        for (ci, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<Point> = points
                .iter()
                .zip(&assignments)
                .filter(|&(_, &a)| a == ci)
                .map(|(p, _)| *p)
                .collect();
            if members.is_empty() {
                continue; // keep the old centroid for empty clusters
            }
            let next = mean(&members);
            if centroid.distance(next) > 1e-6 {
                converged = false;
            }
            *centroid = next;
        }
        if converged {
            break;
        }
    }

    if balance {
        rebalance(points, &mut assignments, &centroids, k);
    }
    assignments
}

fn plus_plus_init(points: &[Point], k: usize, rng: &mut Rng64) -> Vec<Point> {
    let mut centroids = vec![points[rng.next_usize(points.len())]];
    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| {
                let d = centroids
                    .iter()
                    .map(|c| c.distance(*p))
                    .fold(f64::INFINITY, f64::min);
                d * d
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            centroids.push(points[rng.next_usize(points.len())]);
            continue;
        }
        let r = rng.next_f64_01() * total;
        let mut cumsum = 0.0;
        let mut chosen = points.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            cumsum += w;
            if cumsum >= r {
                chosen = i;
                break;
            }
        }
        centroids.push(points[chosen]);
    }
    centroids
}

/// Move boundary points from over-sized to under-sized clusters until no
/// two cluster sizes differ by more than 1. The moved point is always
/// the member of the largest cluster closest to the smallest cluster's
/// centroid.
fn rebalance(points: &[Point], assignments: &mut [usize], centroids: &[Point], k: usize) {
    for _ in 0..points.len() {
        let mut sizes = vec![0usize; k];
        for &a in assignments.iter() {
            sizes[a] += 1;
        }
        let largest = (0..k).max_by_key(|&i| sizes[i]).unwrap_or(0);
        let smallest = (0..k).min_by_key(|&i| sizes[i]).unwrap_or(0);
        if sizes[largest] - sizes[smallest] <= 1 {
            break;
        }

        let candidate = assignments
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a == largest)
            .min_by(|(i, _), (j, _)| {
                let di = points[*i].distance(centroids[smallest]);
                let dj = points[*j].distance(centroids[smallest]);
                di.total_cmp(&dj)
            })
            .map(|(i, _)| i);
        match candidate {
            Some(i) => assignments[i] = smallest,
            None => break,
        }
    }
}

fn nearest(centroids: &[Point], p: Point) -> usize {
    centroids
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| p.distance(**a).total_cmp(&p.distance(**b)))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(crate) fn mean(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}
