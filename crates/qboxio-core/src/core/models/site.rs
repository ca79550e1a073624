use super::species::Species;
use nalgebra::{Point3, Vector3};

/// Per-site metadata carried alongside the species and position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteProperties {
    /// Pseudopotential file used for this site's species.
    pub pseudo: Option<String>,
    /// Velocity in atomic units, kept exactly as read.
    pub velocity: Option<Vector3<f64>>,
}

/// A single atomic site of a periodic structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub species: Species,
    /// Cartesian position in Angstrom.
    pub coords: Point3<f64>,
    /// Site name from the source file (e.g. `Si01`), if there was one.
    pub label: Option<String>,
    pub properties: SiteProperties,
}

impl Site {
    pub fn new(species: Species, coords: Point3<f64>) -> Self {
        Self {
            species,
            coords,
            label: None,
            properties: SiteProperties::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_pseudo(mut self, pseudo: impl Into<String>) -> Self {
        self.properties.pseudo = Some(pseudo.into());
        self
    }

    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.properties.velocity = Some(velocity);
        self
    }

    /// The species string used as pseudopotential key (`Si`, `O2-`).
    pub fn species_string(&self) -> String {
        self.species.to_string()
    }
}
