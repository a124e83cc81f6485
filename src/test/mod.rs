//! Higher-level fixtures and cross-module scenario tests, mirroring the teacher's own `src/test`
//! layout: small topologies and applications built once, reused by scenario-level tests that
//! don't belong to any single selector's own module.

mod sa_scenario;
