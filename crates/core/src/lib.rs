//! Core business logic for Sabliere.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `weighing` - Weighbridge transaction validation rules
//! - `pricing` - Tiered sand pricing with peak-hour and weekend adjustments
//! - `receipt` - Receipt integrity hashing and verification
//! - `lifecycle` - Transaction and payment state machines
//!
//! Every operation here is a synchronous pure function over plain
//! values: no I/O, no locks, no shared mutable state. Callers may
//! invoke them concurrently without coordination.

pub mod lifecycle;
pub mod pricing;
pub mod receipt;
pub mod weighing;
