use super::lattice::Lattice;
use super::site::Site;
use super::species::Species;
use nalgebra::{Point3, Vector3};

/// A periodic crystal structure: a lattice and the sites inside it.
///
/// Positions are always stored as Cartesian coordinates in Angstrom, whatever the
/// units of the file the structure came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    lattice: Lattice,
    sites: Vec<Site>,
}

impl Structure {
    pub fn new(lattice: Lattice, sites: Vec<Site>) -> Self {
        Self { lattice, sites }
    }

    /// Builds a structure from parallel lists of species and Cartesian coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the two lists differ in length.
    pub fn from_cartesian(
        lattice: Lattice,
        species: Vec<Species>,
        coords: Vec<Point3<f64>>,
    ) -> Self {
        assert_eq!(
            species.len(),
            coords.len(),
            "species and coordinate lists must have the same length"
        );
        let sites = species
            .into_iter()
            .zip(coords)
            .map(|(s, c)| Site::new(s, c))
            .collect();
        Self::new(lattice, sites)
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn set_lattice(&mut self, lattice: Lattice) {
        self.lattice = lattice;
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn sites_mut(&mut self) -> &mut [Site] {
        &mut self.sites
    }

    pub fn site(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    pub fn push_site(&mut self, site: Site) {
        self.sites.push(site);
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Distinct species in order of first appearance.
    pub fn composition(&self) -> Vec<Species> {
        let mut seen: Vec<Species> = Vec::new();
        for site in &self.sites {
            if !seen.contains(&site.species) {
                seen.push(site.species);
            }
        }
        seen
    }

    /// Element counts in order of first appearance, e.g. `OLi2` or `Si64`.
    pub fn formula(&self) -> String {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for site in &self.sites {
            let symbol = site.species.symbol();
            match counts.iter_mut().find(|(s, _)| *s == symbol) {
                Some((_, n)) => *n += 1,
                None => counts.push((symbol, 1)),
            }
        }
        counts
            .into_iter()
            .map(|(symbol, n)| {
                if n == 1 {
                    symbol.to_string()
                } else {
                    format!("{}{}", symbol, n)
                }
            })
            .collect()
    }

    /// Fractional coordinates of a site. `None` for an out-of-range index or a
    /// singular lattice.
    pub fn fractional_coords(&self, index: usize) -> Option<Vector3<f64>> {
        let site = self.sites.get(index)?;
        self.lattice.cartesian_to_fractional(&site.coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;

    fn species(text: &str) -> Species {
        text.parse().unwrap()
    }

    fn li2o() -> Structure {
        Structure::from_cartesian(
            Lattice::cubic(4.0),
            vec![species("O2-"), species("Li+"), species("Li+")],
            vec![
                Point3::origin(),
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(3.0, 3.0, 3.0),
            ],
        )
    }

    #[test]
    fn composition_lists_distinct_species_in_order() {
        let structure = li2o();
        let composition: Vec<String> = structure
            .composition()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(composition, vec!["O2-", "Li+"]);
    }

    #[test]
    fn composition_distinguishes_oxidation_states() {
        let fe = Element::from_symbol("Fe").unwrap();
        let structure = Structure::from_cartesian(
            Lattice::cubic(3.0),
            vec![
                Species::with_oxidation_state(fe, 2.0),
                Species::with_oxidation_state(fe, 3.0),
                Species::with_oxidation_state(fe, 2.0),
            ],
            vec![Point3::origin(); 3],
        );
        assert_eq!(structure.composition().len(), 2);
        assert_eq!(structure.formula(), "Fe3");
    }

    #[test]
    fn formula_omits_counts_of_one() {
        assert_eq!(li2o().formula(), "OLi2");
        assert_eq!(Structure::new(Lattice::cubic(1.0), vec![]).formula(), "");
    }

    #[test]
    fn fractional_coords_use_the_lattice() {
        let structure = li2o();
        let frac = structure.fractional_coords(1).unwrap();
        assert!((frac - Vector3::new(0.25, 0.25, 0.25)).norm() < 1e-12);
        assert!(structure.fractional_coords(3).is_none());
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn from_cartesian_rejects_mismatched_lists() {
        Structure::from_cartesian(Lattice::cubic(1.0), vec![species("Si")], vec![]);
    }
}
