//! # zf-core
//!
//! Core types and error types for ZenFocus.
//!
//! This crate provides the foundational types shared across all ZenFocus crates:
//! - The `Task` entity and its `NewTask` insert payload
//! - `TaskStatus` with the backlog/basket/completed state machine
//! - `Quadrant` and the static `QuadrantInfo` board table
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod quadrant;
