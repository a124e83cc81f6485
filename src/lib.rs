//! # Path selection core
//!
//! Given a set of applications — each carrying traffic classes with candidate end-to-end paths
//! through a network topology — this crate chooses a small subset of paths per traffic class so
//! that a downstream optimizer, composing every application under a chosen fairness rule, can
//! produce a high-quality solution without considering every candidate path.
//!
//! ## Structure
//! - [`topology`] and [`path`] define the read-only network snapshot and the candidate routes
//!   through it.
//! - [`traffic_class`] and [`pptc`] define the traffic classes being routed and the
//!   Paths-Per-Traffic-Class mask container every selector mutates.
//! - [`scoring`] holds the pure ordering functions (`length_order`, `resource_order`,
//!   `path_score_order`) the selectors and the replace kernel share.
//! - [`pathtree`], [`expel`], and [`replace`] are the mask-mutation kernel used by
//!   [`selectors::select_sa`].
//! - [`selectors`] exposes the six top-level strategies: [`selectors::choose_rand`],
//!   [`selectors::k_shortest_paths`], [`selectors::k_resource_paths`], [`selectors::select_ilp`],
//!   [`selectors::select_iterative`], and [`selectors::select_sa`].
//! - [`clustering`] reduces per-epoch traffic volumes ahead of a selection run.
//! - [`solver`] defines the external optimizer contract ([`solver::Opt`], [`solver::Compose`]) and
//!   ships the `good_lp`/CBC reference backend plus a scriptable in-memory test double.
//! - [`rng`], [`config`], and [`error`] are the ambient stack: a seeded RNG handle threaded
//!   through every random draw, solver-agnostic configuration, and the crate's error taxonomy.

#![deny(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod clustering;
pub mod config;
pub mod error;
pub mod expel;
pub mod path;
pub mod pathtree;
pub mod pptc;
pub mod replace;
pub mod rng;
pub mod scoring;
pub mod selectors;
pub mod solver;
#[cfg(test)]
mod test;
pub mod topology;
pub mod traffic_class;

pub use error::{Error, Result};
