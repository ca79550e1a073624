use super::table::Pseudopotentials;
use crate::core::models::species::Species;
use crate::core::models::structure::Structure;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// A pseudopotential library description loaded from TOML.
///
/// ```toml
/// template = "{symbol}_ONCV_PBE-1.0.xml"
///
/// [pseudopotentials]
/// Si = "Si_VBC_LDA-1.0.xml"
/// "O2-" = "O_test.xml"
/// ```
///
/// Explicit entries are matched by species string first and by element symbol
/// second. Species without an entry fall back to `template`, where `{symbol}`,
/// `{species}` and `{name}` are substituted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PseudoTable {
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub pseudopotentials: HashMap<String, String>,
}

#[derive(Debug, Error)]
pub enum PseudoLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl PseudoTable {
    pub fn load(path: &Path) -> Result<Self, PseudoLoadError> {
        debug!("Loading pseudopotential table from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| PseudoLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| PseudoLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Looks up the pseudopotential file for one species.
    pub fn lookup(&self, species: &Species) -> Option<String> {
        self.pseudopotentials
            .get(&species.to_string())
            .or_else(|| self.pseudopotentials.get(species.symbol()))
            .cloned()
            .or_else(|| {
                self.template.as_ref().map(|template| {
                    template
                        .replace("{species}", &species.to_string())
                        .replace("{symbol}", species.symbol())
                        .replace("{name}", species.element.name())
                })
            })
    }

    /// Builds the pseudopotential assignment for the species of `structure` that the
    /// table can name, in composition order. Species it cannot name are left out and
    /// logged; coverage is checked where the assignment is written.
    pub fn resolve(&self, structure: &Structure) -> Pseudopotentials {
        let mut resolved = Pseudopotentials::new();
        for species in structure.composition() {
            match self.lookup(&species) {
                Some(file) => {
                    resolved.insert(species.to_string(), file);
                }
                None => debug!("No table entry or template for species {}", species),
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::lattice::Lattice;
    use nalgebra::Point3;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_table(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("pseudos.toml");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    fn li2o() -> Structure {
        Structure::from_cartesian(
            Lattice::cubic(4.0),
            vec![
                "O2-".parse().unwrap(),
                "Li+".parse().unwrap(),
                "Li+".parse().unwrap(),
            ],
            vec![Point3::origin(); 3],
        )
    }

    #[test]
    fn load_reads_entries_and_template() {
        let dir = TempDir::new().unwrap();
        let path = write_table(
            &dir,
            r#"
template = "{symbol}_ONCV_PBE-1.0.xml"

[pseudopotentials]
Si = "Si_VBC_LDA-1.0.xml"
"O2-" = "O_test.xml"
"#,
        );
        let table = PseudoTable::load(&path).unwrap();
        assert_eq!(table.template.as_deref(), Some("{symbol}_ONCV_PBE-1.0.xml"));
        assert_eq!(table.pseudopotentials.len(), 2);
    }

    #[test]
    fn resolve_uses_species_then_symbol_then_template() {
        let table = PseudoTable {
            template: Some("{name}-{symbol}.xml".to_string()),
            pseudopotentials: HashMap::from([("O".to_string(), "O_plain.xml".to_string())]),
        };
        let resolved = table.resolve(&li2o());
        let entries: Vec<(&str, &str)> = resolved.iter().collect();
        assert_eq!(
            entries,
            vec![("O2-", "O_plain.xml"), ("Li+", "Lithium-Li.xml")]
        );
    }

    #[test]
    fn resolve_skips_species_without_entry_or_template() {
        let table = PseudoTable {
            template: None,
            pseudopotentials: HashMap::from([("O2-".to_string(), "O.xml".to_string())]),
        };
        let resolved = table.resolve(&li2o());
        assert_eq!(resolved.iter().collect::<Vec<_>>(), vec![("O2-", "O.xml")]);
        assert!(!resolved.covers(&li2o()));
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let dir = TempDir::new().unwrap();
        let err = PseudoTable::load(&dir.path().join("absent.toml")).unwrap_err();
        match err {
            PseudoLoadError::Io { path, .. } => assert!(path.ends_with("absent.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "pseudos = 1\n");
        assert!(matches!(
            PseudoTable::load(&path),
            Err(PseudoLoadError::Toml { .. })
        ));
    }
}
