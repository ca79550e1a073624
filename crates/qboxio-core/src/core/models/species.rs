use super::element::{Element, ElementError};
use crate::core::utils::format::python_float_repr;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CHARGE_TOLERANCE: f64 = 1e-8;

/// An element, optionally decorated with an oxidation state.
///
/// The string form follows the usual structure-library notation: `Si` for a bare
/// element, `Li+`, `O2-` or `Fe2.5+` when an oxidation state is attached. This string
/// is also the key under which a species' pseudopotential is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Species {
    pub element: Element,
    pub oxidation_state: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesError {
    #[error(transparent)]
    Element(#[from] ElementError),
    #[error("Invalid oxidation state '{charge}' in species '{species}'")]
    InvalidOxidationState { species: String, charge: String },
}

impl Species {
    pub fn new(element: Element, oxidation_state: Option<f64>) -> Self {
        Self {
            element,
            oxidation_state,
        }
    }

    pub fn with_oxidation_state(element: Element, oxidation_state: f64) -> Self {
        Self::new(element, Some(oxidation_state))
    }

    /// Resolves a species name as it may appear in an input file: an element
    /// symbol, an element name such as `silicon`, or oxidation-state notation.
    pub fn resolve(name: &str) -> Result<Self, SpeciesError> {
        if let Ok(element) = Element::resolve(name) {
            return Ok(Self::from(element));
        }
        name.parse()
    }

    pub fn symbol(&self) -> &'static str {
        self.element.symbol()
    }
}

impl From<Element> for Species {
    fn from(element: Element) -> Self {
        Self::new(element, None)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element.symbol())?;
        if let Some(oxi) = self.oxidation_state {
            let magnitude = oxi.abs();
            if (magnitude - 1.0).abs() >= CHARGE_TOLERANCE {
                if (magnitude - magnitude.round()).abs() < CHARGE_TOLERANCE {
                    let text = python_float_repr(magnitude.round());
                    f.write_str(text.strip_suffix(".0").unwrap_or(&text))?;
                } else {
                    let rounded = (magnitude * 1e8).round() / 1e8;
                    f.write_str(&python_float_repr(rounded))?;
                }
            }
            f.write_str(if oxi >= 0.0 { "+" } else { "-" })?;
        }
        Ok(())
    }
}

impl FromStr for Species {
    type Err = SpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .char_indices()
            .skip(1)
            .find(|(_, c)| !c.is_ascii_lowercase())
            .map_or(s.len(), |(i, _)| i);
        let (symbol, charge) = s.split_at(split);
        let element =
            Element::from_symbol(symbol).ok_or_else(|| ElementError::Unknown(s.to_string()))?;

        if charge.is_empty() {
            return Ok(Self::from(element));
        }

        let invalid = || SpeciesError::InvalidOxidationState {
            species: s.to_string(),
            charge: charge.to_string(),
        };
        let (magnitude, sign) = match charge.as_bytes()[charge.len() - 1] {
            b'+' => (&charge[..charge.len() - 1], 1.0),
            b'-' => (&charge[..charge.len() - 1], -1.0),
            _ => return Err(invalid()),
        };
        let magnitude: f64 = if magnitude.is_empty() {
            1.0
        } else {
            magnitude.parse().map_err(|_| invalid())?
        };
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(invalid());
        }

        Ok(Self::with_oxidation_state(element, sign * magnitude))
    }
}
