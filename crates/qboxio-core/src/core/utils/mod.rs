//! Small helpers shared by the models and the file formats: unit conversion between
//! bohr and Angstrom, and number formatting compatible with files written by Python
//! structure tooling.

pub mod format;
pub mod units;
