//! # Core Module
//!
//! The building blocks of the library: the crystal-structure data model, the file
//! formats that read and write it, and the pseudopotential tables that accompany a
//! structure in a Qbox input file.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Elements, species, lattices, sites and structures
//! - **File I/O** ([`io`]) - Qbox input files and JSON structure documents
//! - **Pseudopotentials** ([`pseudo`]) - Species-to-file assignment and TOML-described libraries
//! - **Utilities** ([`utils`]) - Bohr/Angstrom conversion and number formatting

pub mod io;
pub mod models;
pub mod pseudo;
pub mod utils;
