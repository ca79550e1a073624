use nalgebra::{Point3, Vector3};
use std::fmt;
use std::str::FromStr;

/// The Bohr radius in Angstrom (CODATA 2018).
pub const BOHR_IN_ANGSTROM: f64 = 0.529177210903;

#[inline]
pub fn bohr_to_angstrom(value: f64) -> f64 {
    value * BOHR_IN_ANGSTROM
}

#[inline]
pub fn angstrom_to_bohr(value: f64) -> f64 {
    value / BOHR_IN_ANGSTROM
}

#[inline]
pub fn vector_bohr_to_angstrom(v: &Vector3<f64>) -> Vector3<f64> {
    v.map(bohr_to_angstrom)
}

#[inline]
pub fn vector_angstrom_to_bohr(v: &Vector3<f64>) -> Vector3<f64> {
    v.map(angstrom_to_bohr)
}

/// Length unit attached to coordinates in a Qbox input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// Atomic units. Qbox's default for every length.
    #[default]
    Bohr,
    Angstrom,
}

impl LengthUnit {
    /// Converts a length in this unit to Angstrom.
    pub fn to_angstrom(self, value: f64) -> f64 {
        match self {
            LengthUnit::Bohr => bohr_to_angstrom(value),
            LengthUnit::Angstrom => value,
        }
    }

    /// Converts a point in this unit to Angstrom.
    pub fn point_to_angstrom(self, p: Point3<f64>) -> Point3<f64> {
        p.map(|c| self.to_angstrom(c))
    }
}

impl FromStr for LengthUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bohr" | "au" | "a.u." => Ok(LengthUnit::Bohr),
            "angstrom" | "ang" => Ok(LengthUnit::Angstrom),
            _ => Err(()),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Bohr => write!(f, "bohr"),
            LengthUnit::Angstrom => write!(f, "angstrom"),
        }
    }
}
