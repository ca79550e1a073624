use crate::core::io::traits::StructureFile;
use crate::core::models::lattice::Lattice;
use crate::core::models::site::Site;
use crate::core::models::species::{Species, SpeciesError};
use crate::core::models::structure::Structure;
use crate::core::pseudo::table::Pseudopotentials;
use crate::core::utils::format::python_float_repr;
use crate::core::utils::units::{LengthUnit, angstrom_to_bohr, bohr_to_angstrom};
use nalgebra::{Matrix3, Point3, Vector3};
use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Debug, Error)]
pub enum QboxError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: QboxParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Atom on line {line} uses undeclared species '{name}'")]
    UndeclaredSpecies { line: usize, name: String },
    #[error("Missing {0} in pseudo specification!")]
    MissingPseudo(String),
}

#[derive(Debug, Error)]
pub enum QboxParseErrorKind {
    #[error("Invalid number for {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("'{directive}' expects {expected} values, found {found}")]
    MissingField {
        directive: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Cannot resolve species name '{name}': {source}")]
    UnknownSpecies {
        name: String,
        #[source]
        source: SpeciesError,
    },
}

/// Data from a Qbox input file that is not part of the structure itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QboxMetadata {
    /// Pseudopotential per species string, in declaration order.
    pub pseudos: Option<Pseudopotentials>,
    /// Species names as written in the file, with what they resolved to.
    pub species_names: Vec<(String, Species)>,
}

/// A structure together with the pseudopotentials of its species, i.e. the content
/// of a Qbox input file restricted to `set cell`, `species` and `atom` directives.
#[derive(Debug, Clone, PartialEq)]
pub struct QboxInput {
    structure: Structure,
    pseudos: Option<Pseudopotentials>,
}

impl QboxInput {
    /// Creates an input, checking that every species of the structure has a
    /// pseudopotential when pseudopotentials are given.
    ///
    /// # Errors
    ///
    /// Returns [`QboxError::MissingPseudo`] naming the first uncovered species.
    pub fn new(structure: Structure, pseudos: Option<Pseudopotentials>) -> Result<Self, QboxError> {
        check_pseudos(&structure, pseudos.as_ref())?;
        Ok(Self { structure, pseudos })
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn pseudos(&self) -> Option<&Pseudopotentials> {
        self.pseudos.as_ref()
    }

    pub fn into_parts(self) -> (Structure, Option<Pseudopotentials>) {
        (self.structure, self.pseudos)
    }

    pub fn from_reader(reader: &mut impl BufRead) -> Result<Self, QboxError> {
        let (structure, metadata) = QboxFile::read_from(reader)?;
        Self::new(structure, metadata.pseudos)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QboxError> {
        let (structure, metadata) = QboxFile::read_from_path(path)?;
        Self::new(structure, metadata.pseudos)
    }

    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), QboxError> {
        writer.write_all(self.to_string().as_bytes())?;
        Ok(())
    }

    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<(), QboxError> {
        std::fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl FromStr for QboxInput {
    type Err = QboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(&mut s.as_bytes())
    }
}

impl fmt::Display for QboxInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(&self.structure, self.pseudos.as_ref(), f)
    }
}

fn check_pseudos(structure: &Structure, pseudos: Option<&Pseudopotentials>) -> Result<(), QboxError> {
    if let Some(missing) = pseudos.and_then(|p| p.first_missing(structure)) {
        return Err(QboxError::MissingPseudo(missing));
    }
    Ok(())
}

fn render(
    structure: &Structure,
    pseudos: Option<&Pseudopotentials>,
    out: &mut impl fmt::Write,
) -> fmt::Result {
    out.write_str("set cell ")?;
    for vector in structure.lattice().vectors() {
        for value in vector {
            write!(out, "{} ", python_float_repr(angstrom_to_bohr(value)))?;
        }
    }
    out.write_char('\n')?;

    if let Some(pseudos) = pseudos {
        for (species, file) in pseudos.iter() {
            writeln!(out, "species {} {}", species, file)?;
        }
    }

    for (i, site) in structure.sites().iter().enumerate() {
        write!(out, "atom {}{} {} ", site.species.symbol(), i + 1, site.species)?;
        for value in site.coords.iter() {
            write!(out, "{} ", python_float_repr(angstrom_to_bohr(*value)))?;
        }
        if let Some(velocity) = &site.properties.velocity {
            for value in velocity.iter() {
                write!(out, "{} ", python_float_repr(*value))?;
            }
        }
        out.write_char('\n')?;
    }
    Ok(())
}

struct PendingAtom {
    line: usize,
    label: String,
    species_name: String,
    coords: Point3<f64>,
    unit: LengthUnit,
    velocity: Option<Vector3<f64>>,
}

fn parse_float(token: &str, field: &'static str, line: usize) -> Result<f64, QboxError> {
    token.parse().map_err(|_| QboxError::Parse {
        line,
        kind: QboxParseErrorKind::InvalidFloat {
            field,
            value: token.to_string(),
        },
    })
}

fn require_args(
    tokens: &[&str],
    skip: usize,
    expected: usize,
    directive: &'static str,
    line: usize,
) -> Result<(), QboxError> {
    let found = tokens.len().saturating_sub(skip);
    if found < expected {
        return Err(QboxError::Parse {
            line,
            kind: QboxParseErrorKind::MissingField {
                directive,
                expected,
                found,
            },
        });
    }
    Ok(())
}

fn parse_cell(tokens: &[&str], line: usize) -> Result<Lattice, QboxError> {
    require_args(tokens, 2, 9, "set cell", line)?;
    let mut values = [0.0; 9];
    for (value, token) in values.iter_mut().zip(&tokens[2..11]) {
        *value = bohr_to_angstrom(parse_float(token, "cell vector component", line)?);
    }
    Ok(Lattice::new(Matrix3::from_row_slice(&values)))
}

fn parse_atom(tokens: &[&str], line: usize) -> Result<PendingAtom, QboxError> {
    require_args(tokens, 1, 5, "atom", line)?;
    let x = parse_float(tokens[3], "x coordinate", line)?;
    let y = parse_float(tokens[4], "y coordinate", line)?;
    let z = parse_float(tokens[5], "z coordinate", line)?;

    let mut unit = LengthUnit::default();
    let mut rest = Vec::with_capacity(3);
    for token in &tokens[6..] {
        match token.parse::<LengthUnit>() {
            Ok(u) => unit = u,
            Err(()) => rest.push(parse_float(token, "velocity component", line)?),
        }
    }
    let velocity = match rest.len() {
        0 => None,
        3 => Some(Vector3::new(rest[0], rest[1], rest[2])),
        found => {
            return Err(QboxError::Parse {
                line,
                kind: QboxParseErrorKind::MissingField {
                    directive: "atom velocity",
                    expected: 3,
                    found,
                },
            });
        }
    };

    Ok(PendingAtom {
        line,
        label: tokens[1].to_string(),
        species_name: tokens[2].to_string(),
        coords: Point3::new(x, y, z),
        unit,
        velocity,
    })
}

/// Qbox input files (`set cell`, `species` and `atom` directives).
///
/// Lengths in the file are in bohr; the structure side is in Angstrom. Other
/// commands are skipped when reading and never written.
pub struct QboxFile;

impl StructureFile for QboxFile {
    type Metadata = QboxMetadata;
    type Error = QboxError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut lattice: Option<Lattice> = None;
        let mut pseudos = Pseudopotentials::new();
        let mut species_names: Vec<(String, Species)> = Vec::new();
        let mut pending_atoms: Vec<PendingAtom> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();

            match tokens.as_slice() {
                [] => continue,
                [first, ..] if first.starts_with('#') => continue,
                ["set", "cell", ..] => {
                    if lattice.is_some() {
                        debug!("Line {}: 'set cell' replaces an earlier cell", line_num);
                    }
                    lattice = Some(parse_cell(&tokens, line_num)?);
                }
                ["species", ..] => {
                    require_args(&tokens, 1, 2, "species", line_num)?;
                    let name = tokens[1];
                    let uri = tokens[tokens.len() - 1];
                    let species = Species::resolve(name).map_err(|e| QboxError::Parse {
                        line: line_num,
                        kind: QboxParseErrorKind::UnknownSpecies {
                            name: name.to_string(),
                            source: e,
                        },
                    })?;

                    match species_names.iter_mut().find(|(n, _)| n == name) {
                        Some(entry) => {
                            warn!(
                                "Line {}: species '{}' is declared again; the last declaration wins",
                                line_num, name
                            );
                            entry.1 = species;
                        }
                        None => species_names.push((name.to_string(), species)),
                    }
                    if let Some(previous) = pseudos.insert(species.to_string(), uri) {
                        if previous != uri {
                            warn!(
                                "Line {}: pseudopotential for '{}' changes from '{}' to '{}'",
                                line_num, species, previous, uri
                            );
                        }
                    }
                }
                ["atom", ..] => pending_atoms.push(parse_atom(&tokens, line_num)?),
                [command, ..] => {
                    trace!("Line {}: skipping unsupported command '{}'", line_num, command);
                }
            }
        }

        let lattice = lattice.ok_or_else(|| QboxError::MissingRecord("set cell".into()))?;
        let species_by_name: HashMap<&str, Species> = species_names
            .iter()
            .map(|(name, species)| (name.as_str(), *species))
            .collect();

        let mut sites = Vec::with_capacity(pending_atoms.len());
        for atom in pending_atoms {
            let species = *species_by_name
                .get(atom.species_name.as_str())
                .ok_or_else(|| QboxError::UndeclaredSpecies {
                    line: atom.line,
                    name: atom.species_name.clone(),
                })?;
            let mut site = Site::new(species, atom.unit.point_to_angstrom(atom.coords))
                .with_label(atom.label);
            if let Some(pseudo) = pseudos.get(&species.to_string()) {
                site = site.with_pseudo(pseudo);
            }
            site.properties.velocity = atom.velocity;
            sites.push(site);
        }

        if sites.is_empty() {
            warn!("Qbox input contains no atoms");
        }
        let structure = Structure::new(lattice, sites);
        debug!(
            "Read Qbox input with {} sites and {} species declarations",
            structure.len(),
            species_names.len()
        );

        Ok((
            structure,
            QboxMetadata {
                pseudos: Some(pseudos),
                species_names,
            },
        ))
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        check_pseudos(structure, metadata.pseudos.as_ref())?;
        let mut text = String::new();
        render(structure, metadata.pseudos.as_ref(), &mut text).map_err(io::Error::other)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn write_structure_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        let metadata = QboxMetadata {
            pseudos: Pseudopotentials::from_site_properties(structure),
            ..Default::default()
        };
        Self::write_to(structure, &metadata, writer)
    }
}
