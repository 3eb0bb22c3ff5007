//! Core types for Trellis architecture models.
//!
//! This crate carries the foundation types shared by the modeling crates:
//! interned identifiers, ordered tag sets, and the HTTP health check value
//! object attached to deployed container instances. It contains no
//! model-level logic.

pub mod healthcheck;
pub mod identifier;
pub mod tags;
