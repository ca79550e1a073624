use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use anyhow::Context;
use qboxio::core::models::species::Species;
use qboxio::core::pseudo::loader::PseudoTable;
use qboxio::core::pseudo::table::Pseudopotentials;
use qboxio::workflows::convert::{ConvertError, ConvertOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Contents of the `--config` TOML file.
///
/// ```toml
/// pseudo-table = "pseudos.toml"
///
/// [pseudopotentials]
/// Si = "Si_VBC_LDA-1.0.xml"
/// ```
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub pseudo_table: Option<PathBuf>,
    #[serde(default)]
    pub pseudopotentials: BTreeMap<String, String>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let mut config: Self =
            toml::from_str(&content).map_err(|source| CliError::ConfigParsing {
                path: path.to_path_buf(),
                source,
            })?;

        // Relative table paths are relative to the config file.
        if let (Some(table), Some(dir)) = (&config.pseudo_table, path.parent()) {
            if table.is_relative() {
                config.pseudo_table = Some(dir.join(table));
            }
        }
        Ok(config)
    }

    /// Builds conversion options. Command-line values win over the file.
    pub fn merge_with_cli(self, args: &ConvertArgs) -> Result<ConvertOptions> {
        let table_path = args.pseudo_table.clone().or(self.pseudo_table);
        let pseudo_table = match table_path {
            Some(path) => Some(PseudoTable::load(&path).map_err(ConvertError::from)?),
            None => None,
        };

        let mut overrides = Pseudopotentials::new();
        for (name, file) in &self.pseudopotentials {
            overrides.insert(species_key(name)?, file.as_str());
        }
        for (name, file) in &args.pseudos {
            let key = species_key(name)?;
            if let Some(previous) = overrides.insert(key.as_str(), file.as_str()) {
                debug!(
                    "Command line replaces pseudopotential for {}: {} -> {}",
                    key, previous, file
                );
            }
        }

        Ok(ConvertOptions {
            pseudo_table,
            pseudos: (!overrides.is_empty()).then_some(overrides),
        })
    }
}

/// Normalizes a user-supplied species name (`silicon`, `Si`, `O2-`) to the key the
/// Qbox writer uses.
fn species_key(name: &str) -> Result<String> {
    Species::resolve(name)
        .map(|species| species.to_string())
        .map_err(|e| {
            CliError::Config(format!(
                "Unknown species '{}' in pseudopotential assignment: {}",
                name, e
            ))
        })
}
