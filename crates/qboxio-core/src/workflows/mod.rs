//! # Workflows Module
//!
//! High-level entry points that operate on whole files.
//!
//! - **Conversion** ([`convert`]) - Qbox input <-> JSON document conversion, with the
//!   pseudopotential assignment merged from the input file, a TOML table and explicit
//!   overrides. Also provides [`convert::inspect`] for summarizing a structure file.

pub mod convert;
