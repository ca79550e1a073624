use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid pseudopotential assignment '{0}'. Expected 'SPECIES=FILE' (e.g., 'Si=Si_VBC_LDA-1.0.xml').")]
    InvalidAssignment(String),

    #[error("Component '{component}' cannot be empty in assignment '{value}'.")]
    EmptyComponent {
        component: &'static str,
        value: String,
    },
}

/// Splits `SPECIES=FILE` at the first `=`.
pub fn parse_pseudo_assignment(value: &str) -> Result<(String, String), ParseError> {
    let (species, file) = value
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidAssignment(value.to_string()))?;
    let (species, file) = (species.trim(), file.trim());
    if species.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "species",
            value: value.to_string(),
        });
    }
    if file.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "file",
            value: value.to_string(),
        });
    }
    Ok((species.to_string(), file.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_species_and_file() {
        assert_eq!(
            parse_pseudo_assignment("Si=Si_VBC_LDA-1.0.xml"),
            Ok(("Si".to_string(), "Si_VBC_LDA-1.0.xml".to_string()))
        );
    }

    #[test]
    fn keeps_equals_signs_in_file_name() {
        assert_eq!(
            parse_pseudo_assignment("O2-=pseudo/a=b.xml"),
            Ok(("O2-".to_string(), "pseudo/a=b.xml".to_string()))
        );
    }

    #[test]
    fn missing_separator_is_an_error() {
        assert_eq!(
            parse_pseudo_assignment("Si"),
            Err(ParseError::InvalidAssignment("Si".to_string()))
        );
    }

    #[test]
    fn empty_components_are_errors() {
        assert!(matches!(
            parse_pseudo_assignment("=Si.xml"),
            Err(ParseError::EmptyComponent { component: "species", .. })
        ));
        assert!(matches!(
            parse_pseudo_assignment("Si= "),
            Err(ParseError::EmptyComponent { component: "file", .. })
        ));
    }
}
