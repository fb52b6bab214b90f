//! Domain operations.
//!
//! Everything except templates and the log works on an in-memory
//! `DomainData`; the command layer loads it, calls one operation and saves.

pub mod allowance;
pub mod config;
pub mod holiday;
pub mod import;
pub mod leave;
pub mod log;
pub mod roster;
pub mod schedule;
pub mod tardy;
pub mod task;
pub mod templates;
