//! Report generation.
//!
//! `data` builds one row per employee and day, `tokens` turns rows into
//! placeholder values, `template` substitutes them into a worksheet read by
//! `package`, and `generate` ties it together (or falls back to the
//! built-in XLSX/PDF layouts).

pub mod data;
pub mod generate;
pub mod package;
pub mod sheet;
pub mod template;
pub mod tokens;
