//! Decision Analyzer - Multi-criteria decision evaluation under uncertainty
//!
//! This crate ranks competing alternatives against weighted criteria with a
//! weighted-sum model, derives weights directly or from pairwise comparisons
//! (AHP), and propagates declared value ranges through a Monte Carlo
//! simulation into a risk-adjusted ranking.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
