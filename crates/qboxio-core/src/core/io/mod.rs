//! Provides input/output functionality for crystal-structure file formats.
//!
//! [`qbox`] reads and writes Qbox input files; [`json`] is the interchange document
//! used on the structure-modeling side. Both implement the [`traits::StructureFile`]
//! interface.

pub mod json;
pub mod qbox;
pub mod traits;
