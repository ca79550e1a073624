use crate::core::io::json::{JsonError, JsonFile};
use crate::core::io::qbox::{QboxError, QboxFile, QboxInput};
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use crate::core::pseudo::loader::{PseudoLoadError, PseudoTable};
use crate::core::pseudo::table::Pseudopotentials;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Qbox input error: {0}")]
    Qbox(#[from] QboxError),
    #[error("JSON document error: {0}")]
    Json(#[from] JsonError),
    #[error("Pseudopotential table error: {0}")]
    Pseudo(#[from] PseudoLoadError),
}

/// On-disk representation of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Qbox,
    Json,
}

impl Format {
    /// Picks the format from the file extension. Anything that is not `.json` is
    /// treated as a Qbox input file, since those carry no fixed extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Qbox,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Qbox => write!(f, "Qbox input"),
            Format::Json => write!(f, "JSON document"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Library used for species the input file does not assign.
    pub pseudo_table: Option<PseudoTable>,
    /// Explicit assignments; these win over the input file and the table.
    pub pseudos: Option<Pseudopotentials>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub input_format: Format,
    pub output_format: Format,
    pub sites: usize,
    pub species: Vec<String>,
    pub formula: String,
}

/// Reads a structure and whatever pseudopotential assignment the file carries.
pub fn read_structure(
    path: &Path,
    format: Format,
) -> Result<(Structure, Option<Pseudopotentials>), ConvertError> {
    debug!("Reading {} from {:?}", format, path);
    match format {
        Format::Qbox => {
            let (structure, metadata) = QboxFile::read_from_path(path)?;
            Ok((structure, metadata.pseudos))
        }
        Format::Json => Ok(JsonFile::read_from_path(path)?),
    }
}

/// Writes a structure. For Qbox output the assignment must cover every species.
pub fn write_structure(
    path: &Path,
    format: Format,
    structure: &Structure,
    pseudos: Option<&Pseudopotentials>,
) -> Result<(), ConvertError> {
    debug!("Writing {} to {:?}", format, path);
    match format {
        Format::Qbox => {
            let input = QboxInput::new(structure.clone(), pseudos.cloned())?;
            input.write_path(path)?;
        }
        Format::Json => JsonFile::write_to_path(structure, &pseudos.cloned(), path)?,
    }
    Ok(())
}

/// Combines the input file's assignment with the table and explicit overrides,
/// in increasing order of precedence. Files without a file-level assignment (JSON
/// documents without `pseudos`) fall back to the sites' `pseudo` properties.
pub fn merge_pseudos(
    structure: &Structure,
    from_file: Option<Pseudopotentials>,
    options: &ConvertOptions,
) -> Option<Pseudopotentials> {
    let from_file = from_file.or_else(|| Pseudopotentials::from_site_properties(structure));
    let had_any = from_file.is_some() || options.pseudo_table.is_some() || options.pseudos.is_some();
    let mut merged = from_file.unwrap_or_default();

    if let Some(table) = &options.pseudo_table {
        merged.merge(&table.resolve(structure));
    }
    if let Some(overrides) = &options.pseudos {
        merged.merge(overrides);
    }

    had_any.then_some(merged)
}

fn sync_site_pseudos(structure: &mut Structure, pseudos: &Pseudopotentials) {
    for site in structure.sites_mut() {
        if let Some(file) = pseudos.get(&site.species.to_string()) {
            site.properties.pseudo = Some(file.to_string());
        }
    }
}

/// Converts between formats chosen from the file extensions.
#[instrument(skip_all, name = "convert_workflow")]
pub fn convert(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConversionSummary, ConvertError> {
    let input_format = Format::from_path(input);
    let output_format = Format::from_path(output);
    info!(
        "Converting {:?} ({}) to {:?} ({})",
        input, input_format, output, output_format
    );

    let (mut structure, from_file) = read_structure(input, input_format)?;
    let pseudos = merge_pseudos(&structure, from_file, options);
    if let Some(pseudos) = &pseudos {
        sync_site_pseudos(&mut structure, pseudos);
    }

    write_structure(output, output_format, &structure, pseudos.as_ref())?;

    let summary = ConversionSummary {
        input_format,
        output_format,
        sites: structure.len(),
        species: structure
            .composition()
            .iter()
            .map(ToString::to_string)
            .collect(),
        formula: structure.formula(),
    };
    info!(
        "Wrote {} sites ({}) to {:?}",
        summary.sites, summary.formula, output
    );
    Ok(summary)
}

/// Human-readable overview of a structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureReport {
    pub format: Format,
    pub formula: String,
    pub sites: usize,
    pub lengths: [f64; 3],
    pub angles: [f64; 3],
    pub volume: f64,
    pub pseudos: Vec<(String, String)>,
}

#[instrument(skip_all, name = "inspect_workflow")]
pub fn inspect(path: &Path) -> Result<StructureReport, ConvertError> {
    let format = Format::from_path(path);
    let (structure, pseudos) = read_structure(path, format)?;
    let lattice = structure.lattice();
    Ok(StructureReport {
        format,
        formula: structure.formula(),
        sites: structure.len(),
        lengths: lattice.lengths(),
        angles: lattice.angles(),
        volume: lattice.volume(),
        pseudos: pseudos
            .map(|p| {
                p.iter()
                    .map(|(s, f)| (s.to_string(), f.to_string()))
                    .collect()
            })
            .unwrap_or_default(),
    })
}

impl fmt::Display for StructureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.lengths;
        let [alpha, beta, gamma] = self.angles;
        writeln!(f, "Format:   {}", self.format)?;
        writeln!(f, "Formula:  {}", self.formula)?;
        writeln!(f, "Sites:    {}", self.sites)?;
        writeln!(f, "a b c:    {:.6} {:.6} {:.6} Å", a, b, c)?;
        writeln!(f, "angles:   {:.4} {:.4} {:.4} °", alpha, beta, gamma)?;
        writeln!(f, "Volume:   {:.4} Å³", self.volume)?;
        if self.pseudos.is_empty() {
            writeln!(f, "Pseudopotentials: none")?;
        } else {
            writeln!(f, "Pseudopotentials:")?;
            for (species, file) in &self.pseudos {
                writeln!(f, "  {:<6} {}", species, file)?;
            }
        }
        Ok(())
    }
}
