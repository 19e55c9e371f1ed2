//! Session progression: the reveal controller.
//!
//! State itself lives in [`crate::core::session`]; this module holds the
//! component that advances it against a catalog, enforcing reveal order,
//! hint gating, and lifecycle rules.

pub mod controller;
