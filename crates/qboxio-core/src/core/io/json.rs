use crate::core::io::traits::StructureFile;
use crate::core::models::lattice::Lattice;
use crate::core::models::site::{Site, SiteProperties};
use crate::core::models::species::{Species, SpeciesError};
use crate::core::models::structure::Structure;
use crate::core::pseudo::table::Pseudopotentials;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid species '{species}' at site {index}: {source}")]
    InvalidSpecies {
        index: usize,
        species: String,
        #[source]
        source: SpeciesError,
    },
}

/// Serialized form of a structure, as exchanged with structure-modeling tools.
///
/// Lengths are in Angstrom and positions are Cartesian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructureDocument {
    pub lattice: [[f64; 3]; 3],
    pub sites: Vec<SiteDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudos: Option<Vec<(String, String)>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteDocument {
    pub species: String,
    pub xyz: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "PropertiesDocument::is_empty")]
    pub properties: PropertiesDocument,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertiesDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<[f64; 3]>,
}

impl PropertiesDocument {
    fn is_empty(&self) -> bool {
        self.pseudo.is_none() && self.velocity.is_none()
    }
}

impl StructureDocument {
    pub fn from_structure(structure: &Structure, pseudos: Option<&Pseudopotentials>) -> Self {
        let sites = structure
            .sites()
            .iter()
            .map(|site| SiteDocument {
                species: site.species_string(),
                xyz: [site.coords.x, site.coords.y, site.coords.z],
                label: site.label.clone(),
                properties: PropertiesDocument {
                    pseudo: site.properties.pseudo.clone(),
                    velocity: site.properties.velocity.map(|v| [v.x, v.y, v.z]),
                },
            })
            .collect();

        Self {
            lattice: structure.lattice().vectors(),
            sites,
            pseudos: pseudos.map(|p| {
                p.iter()
                    .map(|(species, file)| (species.to_string(), file.to_string()))
                    .collect()
            }),
        }
    }

    pub fn into_structure(self) -> Result<(Structure, Option<Pseudopotentials>), JsonError> {
        let mut sites = Vec::with_capacity(self.sites.len());
        for (index, doc) in self.sites.into_iter().enumerate() {
            let species: Species =
                doc.species
                    .parse()
                    .map_err(|source| JsonError::InvalidSpecies {
                        index,
                        species: doc.species.clone(),
                        source,
                    })?;
            sites.push(Site {
                species,
                coords: Point3::from(doc.xyz),
                label: doc.label,
                properties: SiteProperties {
                    pseudo: doc.properties.pseudo,
                    velocity: doc.properties.velocity.map(Vector3::from),
                },
            });
        }

        let pseudos = self.pseudos.map(|entries| entries.into_iter().collect());
        Ok((Structure::new(Lattice::from_vectors(self.lattice), sites), pseudos))
    }
}

/// JSON structure documents (see [`StructureDocument`]).
pub struct JsonFile;

impl StructureFile for JsonFile {
    type Metadata = Option<Pseudopotentials>;
    type Error = JsonError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let document: StructureDocument = serde_json::from_reader(reader)?;
        document.into_structure()
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let document = StructureDocument::from_structure(structure, metadata.as_ref());
        serde_json::to_writer_pretty(&mut *writer, &document)?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_structure_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        Self::write_to(structure, &None, writer)
    }
}
