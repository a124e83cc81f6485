//! Traffic-class volume clustering: reduce per-epoch volume vectors to `num_clusters`
//! representatives before a selection run, trading per-TC fidelity for a smaller solver instance.

use crate::error::{Error, Result};
use crate::traffic_class::TrafficClass;

/// Which clustering method [`cluster_tcs`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterMethod {
    /// Fit `num_clusters` centers over the epoch-volume vectors; traffic class `i` receives
    /// `centers[i]` by position. Only defined when `num_clusters == tcs.len()`.
    KMeans,
    /// Agglomeratively merge traffic classes down to `num_clusters` buckets; each traffic class
    /// receives the element-wise maximum volume vector of the bucket it ends up in.
    Agg,
}

/// Overwrite each traffic class's `vol_flows` in place, per `method`.
pub fn cluster_tcs(tcs: &mut [TrafficClass], num_clusters: usize, method: ClusterMethod) -> Result<()> {
    if tcs.is_empty() {
        return Ok(());
    }
    if num_clusters == 0 || num_clusters > tcs.len() {
        return Err(Error::InvalidConfig {
            reason: format!(
                "num_clusters ({num_clusters}) must be in 1..={} for {} traffic classes",
                tcs.len(),
                tcs.len()
            ),
        });
    }

    let epochs = tcs[0].num_epochs();
    let points: Vec<Vec<f64>> = tcs.iter().map(|tc| tc.vol_flows.clone()).collect();

    match method {
        ClusterMethod::KMeans => {
            if num_clusters != tcs.len() {
                return Err(Error::InvalidConfig {
                    reason: format!(
                        "kmeans requires num_clusters ({num_clusters}) == number of traffic classes ({})",
                        tcs.len()
                    ),
                });
            }
            let centers = kmeans(&points, num_clusters, epochs);
            for (tc, center) in tcs.iter_mut().zip(centers) {
                tc.vol_flows = center;
            }
        }
        ClusterMethod::Agg => {
            let membership = agglomerative(&points, num_clusters);
            let mut cluster_max = vec![vec![0.0_f64; epochs]; num_clusters];
            let mut seen = vec![false; num_clusters];
            for (&cluster, point) in membership.iter().zip(&points) {
                let bucket = &mut cluster_max[cluster];
                if !seen[cluster] {
                    *bucket = point.clone();
                    seen[cluster] = true;
                } else {
                    for e in 0..epochs {
                        bucket[e] = bucket[e].max(point[e]);
                    }
                }
            }
            for (tc, &cluster) in tcs.iter_mut().zip(&membership) {
                tc.vol_flows = cluster_max[cluster].clone();
            }
        }
    }
    Ok(())
}

fn sq_dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Lloyd's algorithm, centers seeded from the first `k` points.
fn kmeans(points: &[Vec<f64>], k: usize, epochs: usize) -> Vec<Vec<f64>> {
    let mut centers: Vec<Vec<f64>> = points.iter().take(k).cloned().collect();
    for _ in 0..50 {
        let mut sums = vec![vec![0.0_f64; epochs]; k];
        let mut counts = vec![0usize; k];
        for p in points {
            let closest = centers
                .iter()
                .enumerate()
                .map(|(i, c)| (i, sq_dist(p, c)))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
                .map(|(i, _)| i)
                .unwrap();
            for e in 0..epochs {
                sums[closest][e] += p[e];
            }
            counts[closest] += 1;
        }
        let mut changed = false;
        for i in 0..k {
            if counts[i] == 0 {
                continue;
            }
            let updated: Vec<f64> = (0..epochs).map(|e| sums[i][e] / counts[i] as f64).collect();
            if updated != centers[i] {
                changed = true;
            }
            centers[i] = updated;
        }
        if !changed {
            break;
        }
    }
    centers
}

/// Single-linkage agglomerative clustering: repeatedly merge the two clusters with the smallest
/// minimum pairwise distance until `num_clusters` remain. Returns each point's final cluster
/// index.
fn agglomerative(points: &[Vec<f64>], num_clusters: usize) -> Vec<usize> {
    let n = points.len();
    let mut clusters: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

    while clusters.len() > num_clusters {
        let mut best = (0usize, 1usize, f64::INFINITY);
        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let d = clusters[i]
                    .iter()
                    .flat_map(|&a| clusters[j].iter().map(move |&b| (a, b)))
                    .map(|(a, b)| sq_dist(&points[a], &points[b]))
                    .fold(f64::INFINITY, f64::min);
                if d < best.2 {
                    best = (i, j, d);
                }
            }
        }
        let (i, j, _) = best;
        let mut merged = clusters[i].clone();
        merged.extend(clusters[j].clone());
        clusters.remove(j);
        clusters.remove(i);
        clusters.push(merged);
    }

    let mut membership = vec![0usize; n];
    for (cluster_idx, members) in clusters.iter().enumerate() {
        for &p in members {
            membership[p] = cluster_idx;
        }
    }
    membership
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::NodeIndex;
    use ipnet::Ipv4Net;
    use std::str::FromStr;

    fn tc(id: u64, vol: Vec<f64>) -> TrafficClass {
        TrafficClass {
            id,
            ingress: NodeIndex::new(0),
            egress: NodeIndex::new(1),
            priority: 0,
            vol_flows: vol,
            src_prefix: Ipv4Net::from_str("10.0.0.0/24").unwrap(),
            dst_prefix: Ipv4Net::from_str("10.0.1.0/24").unwrap(),
        }
    }

    #[test]
    fn agg_assigns_element_wise_max_per_bucket() {
        let mut tcs = vec![
            tc(1, vec![1.0, 1.0]),
            tc(2, vec![10.0, 10.0]),
            tc(3, vec![1.0, 1.0]),
        ];
        cluster_tcs(&mut tcs, 2, ClusterMethod::Agg).unwrap();
        assert_eq!(tcs[0].vol_flows, vec![1.0, 1.0]);
        assert_eq!(tcs[1].vol_flows, vec![10.0, 10.0]);
        assert_eq!(tcs[2].vol_flows, vec![1.0, 1.0]);
    }

    #[test]
    fn kmeans_requires_num_clusters_equal_to_tc_count() {
        let mut tcs = vec![tc(1, vec![1.0]), tc(2, vec![2.0])];
        let err = cluster_tcs(&mut tcs, 1, ClusterMethod::KMeans).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn kmeans_with_num_clusters_equal_tcs_is_near_identity() {
        let mut tcs = vec![tc(1, vec![1.0, 2.0]), tc(2, vec![50.0, 60.0])];
        cluster_tcs(&mut tcs, 2, ClusterMethod::KMeans).unwrap();
        // Distinct, well-separated points converge to themselves as their own centers.
        assert_eq!(tcs[0].vol_flows, vec![1.0, 2.0]);
        assert_eq!(tcs[1].vol_flows, vec![50.0, 60.0]);
    }

    #[test]
    fn num_clusters_out_of_range_is_invalid_config() {
        let mut tcs = vec![tc(1, vec![1.0])];
        assert!(cluster_tcs(&mut tcs, 0, ClusterMethod::Agg).is_err());
        assert!(cluster_tcs(&mut tcs, 2, ClusterMethod::Agg).is_err());
    }
}
