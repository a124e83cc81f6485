//! The Paths-Per-Traffic-Class container: the sole selection state a selector mutates.
//!
//! `mask[i] == true` means path `i` is masked out (suppressed); `false` means it is visible and
//! participates in the next solver composition.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::path::Path;
use crate::traffic_class::{Application, TcId};

/// Mapping from traffic class to its candidate paths and current mask.
#[derive(Debug, Clone, Default)]
pub struct Pptc {
    paths: HashMap<TcId, Vec<Path>>,
    masks: HashMap<TcId, Vec<bool>>,
}

impl Pptc {
    /// Build a PPTC from a set of applications, with every candidate path initially visible.
    pub fn from_apps(apps: &[Application]) -> Self {
        let mut pptc = Self::default();
        for app in apps {
            for (tc, paths) in &app.classes {
                pptc.masks.insert(tc.id, vec![false; paths.len()]);
                pptc.paths.insert(tc.id, paths.clone());
            }
        }
        pptc
    }

    /// All candidate paths for `tc`, regardless of mask state.
    pub fn all_paths(&self, tc: TcId) -> &[Path] {
        self.paths.get(&tc).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of candidate paths for `tc`; `all = false` counts only visible (unmasked) paths.
    pub fn num_paths(&self, tc: TcId, all: bool) -> usize {
        match self.masks.get(&tc) {
            None => 0,
            Some(mask) if all => mask.len(),
            Some(mask) => mask.iter().filter(|m| !**m).count(),
        }
    }

    /// Replace the mask for `tc`. `m.len()` must equal the candidate count.
    pub fn mask(&mut self, tc: TcId, m: Vec<bool>) -> Result<()> {
        let want = self.paths.get(&tc).map(Vec::len).unwrap_or(0);
        if m.len() != want {
            return Err(Error::MaskLengthMismatch { got: m.len(), want });
        }
        self.masks.insert(tc, m);
        Ok(())
    }

    /// Clear the mask for `tc`, making every candidate path visible.
    pub fn unmask(&mut self, tc: TcId) {
        if let Some(mask) = self.masks.get_mut(&tc) {
            mask.iter_mut().for_each(|m| *m = false);
        }
    }

    /// Mutable reference to the current mask for `tc`.
    pub fn get_mask(&mut self, tc: TcId) -> &mut Vec<bool> {
        self.masks.entry(tc).or_default()
    }

    /// Read-only view of the current mask for `tc`.
    pub fn mask_of(&self, tc: TcId) -> &[bool] {
        self.masks.get(&tc).map(Vec::as_slice).unwrap_or_default()
    }

    /// Maximum candidate count across all traffic classes; `all = false` counts only visible
    /// paths.
    pub fn max_paths(&self, all: bool) -> usize {
        self.tcs().map(|tc| self.num_paths(tc, all)).max().unwrap_or(0)
    }

    /// Iterate over every traffic class id present in this container.
    pub fn tcs(&self) -> impl Iterator<Item = TcId> + '_ {
        self.paths.keys().copied()
    }

    /// Indices of currently-visible paths for `tc`, in path order.
    pub fn visible_indices(&self, tc: TcId) -> impl Iterator<Item = usize> + '_ {
        self.mask_of(tc)
            .iter()
            .enumerate()
            .filter(|(_, m)| !**m)
            .map(|(i, _)| i)
    }

    /// Union many PPTCs into one. Traffic classes appearing in more than one input keep the
    /// last-seen entry.
    pub fn merge(list: Vec<Pptc>) -> Pptc {
        let mut out = Pptc::default();
        for p in list {
            out.paths.extend(p.paths);
            out.masks.extend(p.masks);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::NodeIndex;
    use ipnet::Ipv4Net;
    use std::str::FromStr;

    fn n(i: u32) -> crate::topology::NodeId {
        NodeIndex::new(i as usize)
    }

    fn app_with_lengths(tc_id: TcId, lens: &[usize]) -> Application {
        let paths = lens
            .iter()
            .map(|&l| Path::Plain {
                nodes: (0..l as u32).map(n).collect(),
            })
            .collect();
        let tc = crate::traffic_class::TrafficClass {
            id: tc_id,
            ingress: n(0),
            egress: n(1),
            priority: 0,
            vol_flows: vec![1.0],
            src_prefix: Ipv4Net::from_str("10.0.0.0/24").unwrap(),
            dst_prefix: Ipv4Net::from_str("10.0.1.0/24").unwrap(),
        };
        Application {
            name: "app".into(),
            classes: vec![(tc, paths)],
        }
    }

    #[test]
    fn from_apps_starts_fully_visible() {
        let apps = vec![app_with_lengths(1, &[4, 5, 6])];
        let pptc = Pptc::from_apps(&apps);
        assert_eq!(pptc.num_paths(1, true), 3);
        assert_eq!(pptc.num_paths(1, false), 3);
    }

    #[test]
    fn mask_rejects_wrong_length() {
        let apps = vec![app_with_lengths(1, &[4, 5, 6])];
        let mut pptc = Pptc::from_apps(&apps);
        assert!(pptc.mask(1, vec![true, false]).is_err());
        assert!(pptc.mask(1, vec![true, false, false]).is_ok());
        assert_eq!(pptc.num_paths(1, false), 2);
    }

    #[test]
    fn unmask_clears_mask() {
        let apps = vec![app_with_lengths(1, &[4, 5])];
        let mut pptc = Pptc::from_apps(&apps);
        pptc.mask(1, vec![true, true]).unwrap();
        pptc.unmask(1);
        assert_eq!(pptc.num_paths(1, false), 2);
    }

    #[test]
    fn merge_unions_traffic_classes() {
        let a = Pptc::from_apps(&[app_with_lengths(1, &[2])]);
        let b = Pptc::from_apps(&[app_with_lengths(2, &[3])]);
        let merged = Pptc::merge(vec![a, b]);
        let mut tcs: Vec<_> = merged.tcs().collect();
        tcs.sort();
        assert_eq!(tcs, vec![1, 2]);
    }

    #[test]
    fn visible_indices_respects_mask() {
        let apps = vec![app_with_lengths(1, &[1, 1, 1])];
        let mut pptc = Pptc::from_apps(&apps);
        pptc.mask(1, vec![true, false, true]).unwrap();
        assert_eq!(pptc.visible_indices(1).collect::<Vec<_>>(), vec![1]);
    }
}
