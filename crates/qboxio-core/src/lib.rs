//! # qboxio
//!
//! Reads and writes Qbox molecular-dynamics input files through an in-memory crystal
//! structure model.
//!
//! ## Layout
//!
//! - **[`core`]: The Foundation.** Structure models (elements, species, lattices, sites),
//!   the Qbox and JSON file formats, pseudopotential tables, and unit handling.
//!
//! - **[`workflows`]: The Public API.** Whole-file procedures built on `core`: converting
//!   between formats with a merged pseudopotential assignment, and summarizing a file.

pub mod core;
pub mod workflows;
