//! Replace policy: refill a mask up to `k` visible paths after an expel step, avoiding masks
//! already present in the explored set.

use itertools::Itertools;

use crate::pathtree::PathTree;
use crate::rng::Rng;

/// Which replace policy to apply. Discriminants match the upstream numbering; the gaps (no `2`
/// or `5`) are preserved rather than renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    /// Walk ascending combinations of unused indices (by a prior sort order) until one is unseen.
    NextSorted = 1,
    /// Draw unused indices uniformly at random, retrying against the explored set.
    Random = 3,
    /// Draw unused indices via a [`PathTree`] round-robin, retrying against the explored set.
    PathTree = 4,
    /// Like `NextSorted`, but walking a path-score order instead of a length/resource order.
    PathScore = 6,
}

const MAX_RETRIES: usize = 100;

/// Refill `mask` up to `k` visible paths using `mode`, recording the result in `explored` if it
/// commits a new mask.
///
/// `order` is the ascending sort order (by length, resource score, or path score, depending on
/// caller) used by `NextSorted`/`PathScore`. `tree`, when present, backs `PathTree`.
pub fn replace(
    explored: &mut Vec<Vec<bool>>,
    mask: &mut Vec<bool>,
    k: usize,
    mode: ReplaceMode,
    order: &[usize],
    tree: Option<&mut PathTree>,
    rng: &mut Rng,
) {
    let visible = mask.iter().filter(|m| !**m).count();
    let replace_len = k.saturating_sub(visible);
    if replace_len == 0 {
        // Nothing to refill, but the round still committed this mask; record it so a later
        // round's expel can't walk the annealer back into the same visible set.
        explored.push(mask.clone());
        return;
    }

    let unused: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter(|(_, m)| **m)
        .map(|(i, _)| i)
        .collect();

    if unused.len() < replace_len {
        mask.iter_mut().for_each(|m| *m = false);
        explored.push(mask.clone());
        return;
    }

    match mode {
        ReplaceMode::NextSorted | ReplaceMode::PathScore => {
            next_sorted(explored, mask, order, replace_len, rng)
        }
        ReplaceMode::Random => random_fill(explored, mask, &unused, replace_len, rng),
        ReplaceMode::PathTree => {
            let tree = tree.expect("PathTree replace mode requires a PathTree");
            pathtree_fill(explored, mask, tree, replace_len, rng)
        }
    }
    explored.push(mask.clone());
}

fn apply_candidate(mask: &[bool], picked: &[usize]) -> Vec<bool> {
    let mut out = mask.to_vec();
    for &i in picked {
        out[i] = false;
    }
    out
}

fn next_sorted(
    explored: &mut [Vec<bool>],
    mask: &mut Vec<bool>,
    order: &[usize],
    replace_len: usize,
    rng: &mut Rng,
) {
    let unused_sorted: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| mask.get(i).copied().unwrap_or(false))
        .collect();

    for combo in unused_sorted.iter().copied().combinations(replace_len) {
        let candidate = apply_candidate(mask, &combo);
        if !explored.iter().any(|e| *e == candidate) {
            *mask = candidate;
            return;
        }
    }

    let unused: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter(|(_, m)| **m)
        .map(|(i, _)| i)
        .collect();
    let picked_idx = rng.choose(unused.len(), replace_len);
    let picked: Vec<usize> = picked_idx.into_iter().map(|i| unused[i]).collect();
    *mask = apply_candidate(mask, &picked);
}

fn random_fill(
    explored: &[Vec<bool>],
    mask: &mut Vec<bool>,
    unused: &[usize],
    replace_len: usize,
    rng: &mut Rng,
) {
    let mut candidate = mask.clone();
    for _ in 0..MAX_RETRIES {
        let picked_idx = rng.choose(unused.len(), replace_len);
        let picked: Vec<usize> = picked_idx.into_iter().map(|i| unused[i]).collect();
        candidate = apply_candidate(mask, &picked);
        if !explored.iter().any(|e| *e == candidate) {
            break;
        }
    }
    *mask = candidate;
}

fn pathtree_fill(
    explored: &[Vec<bool>],
    mask: &mut Vec<bool>,
    tree: &mut PathTree,
    replace_len: usize,
    rng: &mut Rng,
) {
    for _ in 0..MAX_RETRIES {
        let mut picked = Vec::with_capacity(replace_len);
        while picked.len() < replace_len {
            match tree.next() {
                Some(i) if mask.get(i).copied().unwrap_or(false) && !picked.contains(&i) => {
                    picked.push(i)
                }
                Some(_) => continue,
                None => break,
            }
        }
        if picked.len() < replace_len {
            // Tree ran dry before collecting enough distinct indices; fall back to random.
            return random_fill(
                explored,
                mask,
                &mask
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| **m)
                    .map(|(i, _)| i)
                    .collect::<Vec<_>>(),
                replace_len,
                rng,
            );
        }
        let candidate = apply_candidate(mask, &picked);
        if !explored.iter().any(|e| *e == candidate) {
            *mask = candidate;
            return;
        }
    }
    // exhausted retries: accept the last attempted candidate regardless, matching `Random`'s
    // fallback behaviour.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_len_zero_still_records_explored() {
        let mut explored = Vec::new();
        let mut mask = vec![false, false, true];
        replace(&mut explored, &mut mask, 2, ReplaceMode::NextSorted, &[0, 1, 2], None, &mut Rng::seeded(1));
        assert_eq!(mask, vec![false, false, true]);
        assert_eq!(explored, vec![vec![false, false, true]]);
    }

    #[test]
    fn next_sorted_avoids_explored_masks() {
        let mut explored = vec![vec![false, false, true, true]];
        let mut mask = vec![true, true, true, true];
        replace(
            &mut explored,
            &mut mask,
            2,
            ReplaceMode::NextSorted,
            &[0, 1, 2, 3],
            None,
            &mut Rng::seeded(1),
        );
        assert_ne!(mask, vec![false, false, true, true]);
        assert_eq!(mask.iter().filter(|m| !**m).count(), 2);
    }

    #[test]
    fn insufficient_unused_enables_all() {
        let mut explored = Vec::new();
        let mut mask = vec![false, true, true];
        replace(&mut explored, &mut mask, 4, ReplaceMode::Random, &[0, 1, 2], None, &mut Rng::seeded(1));
        assert_eq!(mask, vec![false, false, false]);
    }

    #[test]
    fn pathtree_mode_fills_from_tree() {
        let mut explored = Vec::new();
        let mut mask = vec![true, true, true];
        let mut tree = PathTree::new(&[
            crate::path::Path::Plain { nodes: vec![] },
            crate::path::Path::Plain { nodes: vec![] },
            crate::path::Path::Plain { nodes: vec![] },
        ]);
        replace(
            &mut explored,
            &mut mask,
            2,
            ReplaceMode::PathTree,
            &[],
            Some(&mut tree),
            &mut Rng::seeded(3),
        );
        assert_eq!(mask.iter().filter(|m| !**m).count(), 2);
    }
}
