//! # Wodboard
//!
//! A local competition leaderboard service built around a pure workout
//! ranking engine.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (workouts, submissions, standings)
//! - **scoring**: The ranking engine (normalize, compare, rank, aggregate)
//! - **storage**: Filesystem document store (JSONL)
//! - **service**: Ranking orchestration over the stores
//! - **api**: REST API endpoints
//! - **seed**: Deterministic demo data generation
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod scoring;
pub mod seed;
pub mod service;
pub mod storage;

pub use models::*;
