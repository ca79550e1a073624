use crate::cli::ConvertArgs;
use crate::config::FileConfig;
use crate::error::Result;
use qboxio::workflows::convert;
use std::path::Path;
use tracing::info;

pub fn run(args: ConvertArgs, config_path: Option<&Path>) -> Result<()> {
    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let options = file_config.merge_with_cli(&args)?;

    let summary = convert::convert(&args.input, &args.output, &options)?;
    println!(
        "Wrote {} ({} sites, species: {}) to {}",
        summary.formula,
        summary.sites,
        summary.species.join(" "),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use qboxio::workflows::convert::ConvertError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SILICON: &str = r#"{"lattice": [[5.43,0,0],[0,5.43,0],[0,0,5.43]], "sites": [{"species": "Si", "xyz": [0,0,0]}]}"#;

    fn convert_args(dir: &TempDir, pseudos: &[(&str, &str)]) -> ConvertArgs {
        let input = dir.path().join("si.json");
        fs::write(&input, SILICON).unwrap();
        ConvertArgs {
            input,
            output: dir.path().join("si_out.i"),
            pseudo_table: None,
            pseudos: pseudos
                .iter()
                .map(|(s, f)| (s.to_string(), f.to_string()))
                .collect(),
        }
    }

    #[test]
    fn config_file_supplies_pseudos() {
        let dir = TempDir::new().unwrap();
        let config: PathBuf = dir.path().join("qboxio.toml");
        fs::write(&config, "[pseudopotentials]\nSi = \"Si_config.xml\"\n").unwrap();
        let args = convert_args(&dir, &[]);
        let output = args.output.clone();

        run(args, Some(&config)).unwrap();
        let text = fs::read_to_string(output).unwrap();
        assert!(text.contains("species Si Si_config.xml\n"));
    }

    #[test]
    fn missing_pseudo_fails_the_command() {
        let dir = TempDir::new().unwrap();
        let args = convert_args(&dir, &[("O", "O.xml")]);
        let err = run(args, None).unwrap_err();
        assert!(matches!(err, CliError::Convert(ConvertError::Qbox(_))));
    }
}
