//! Pseudopotential assignment for structures.
//!
//! [`table::Pseudopotentials`] is the ordered species-to-file map written into
//! `species` declarations; [`loader::PseudoTable`] describes a pseudopotential
//! library on disk and resolves it against a structure.

pub mod loader;
pub mod table;
