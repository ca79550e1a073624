//! # Core Models Module
//!
//! Data structures for periodic crystal structures.
//!
//! ## Key Components
//!
//! - [`element`] - Chemical elements with symbol and name lookup tables
//! - [`species`] - Elements with an optional oxidation state
//! - [`lattice`] - Lattice vectors and fractional/Cartesian conversion
//! - [`site`] - A species at a Cartesian position, with per-site metadata
//! - [`structure`] - A lattice together with its sites
//!
//! All lengths are in Angstrom. File formats that use other units convert at the
//! boundary.
//!
//! ```ignore
//! use qboxio::core::models::{lattice::Lattice, structure::Structure};
//!
//! let structure = Structure::from_cartesian(
//!     Lattice::cubic(5.43),
//!     vec!["Si".parse()?, "Si".parse()?],
//!     vec![Point3::origin(), Point3::new(1.3575, 1.3575, 1.3575)],
//! );
//! assert_eq!(structure.formula(), "Si2");
//! ```

pub mod element;
pub mod lattice;
pub mod site;
pub mod species;
pub mod structure;
