use crate::core::models::structure::Structure;

/// Pseudopotential assignment keyed by species string (`Si`, `O2-`).
///
/// Entries keep their insertion order because species declarations are written in
/// that order. Re-inserting an existing key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pseudopotentials {
    entries: Vec<(String, String)>,
}

impl Pseudopotentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry. Returns the previous value for the key.
    pub fn insert(&mut self, species: impl Into<String>, file: impl Into<String>) -> Option<String> {
        let species = species.into();
        let file = file.into();
        match self.entries.iter_mut().find(|(key, _)| *key == species) {
            Some((_, existing)) => Some(std::mem::replace(existing, file)),
            None => {
                self.entries.push((species, file));
                None
            }
        }
    }

    pub fn get(&self, species: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == species)
            .map(|(_, file)| file.as_str())
    }

    pub fn contains(&self, species: &str) -> bool {
        self.get(species).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `other` into `self`. Values from `other` win; new keys are appended.
    pub fn merge(&mut self, other: &Pseudopotentials) {
        for (species, file) in other.iter() {
            self.insert(species, file);
        }
    }

    /// Returns the first species of the structure's composition without an entry.
    pub fn first_missing(&self, structure: &Structure) -> Option<String> {
        structure
            .composition()
            .iter()
            .map(ToString::to_string)
            .find(|species| !self.contains(species))
    }

    /// True when every species of the structure has an entry.
    pub fn covers(&self, structure: &Structure) -> bool {
        self.first_missing(structure).is_none()
    }

    /// Rebuilds the assignment from the `pseudo` site properties, in composition
    /// order. Returns `None` unless every site carries one, and for an empty structure.
    pub fn from_site_properties(structure: &Structure) -> Option<Self> {
        if structure.is_empty() {
            return None;
        }
        let mut table = Self::new();
        for site in structure.sites() {
            let pseudo = site.properties.pseudo.as_ref()?;
            let species = site.species_string();
            if !table.contains(&species) {
                table.insert(species, pseudo.clone());
            }
        }
        Some(table)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Pseudopotentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (species, file) in iter {
            table.insert(species, file);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::lattice::Lattice;
    use crate::core::models::site::Site;
    use nalgebra::Point3;

    #[test]
    fn insertion_order_is_preserved() {
        let table: Pseudopotentials = [("O2-", "O_test.xml"), ("Li+", "Li_test.xml")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["O2-", "Li+"]);
    }

    #[test]
    fn reinserting_replaces_in_place() {
        let mut table = Pseudopotentials::new();
        table.insert("Si", "a.xml");
        table.insert("O", "o.xml");
        assert_eq!(table.insert("Si", "b.xml"), Some("a.xml".to_string()));
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next(), Some(("Si", "b.xml")));
    }

    #[test]
    fn merge_prefers_the_other_table() {
        let mut base: Pseudopotentials = [("Si", "base.xml"), ("O", "o.xml")].into_iter().collect();
        let overrides: Pseudopotentials = [("Si", "override.xml"), ("H", "h.xml")].into_iter().collect();
        base.merge(&overrides);
        assert_eq!(base.get("Si"), Some("override.xml"));
        assert_eq!(base.get("O"), Some("o.xml"));
        assert_eq!(base.get("H"), Some("h.xml"));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn first_missing_reports_uncovered_species() {
        let structure = Structure::from_cartesian(
            Lattice::cubic(4.0),
            vec!["O2-".parse().unwrap(), "Li+".parse().unwrap()],
            vec![Point3::origin(), Point3::new(1.0, 1.0, 1.0)],
        );
        let partial: Pseudopotentials = [("O2-", "O.xml")].into_iter().collect();
        assert_eq!(partial.first_missing(&structure), Some("Li+".to_string()));
        assert!(!partial.covers(&structure));

        let bare: Pseudopotentials = [("O", "O.xml"), ("Li", "Li.xml")].into_iter().collect();
        assert_eq!(bare.first_missing(&structure), Some("O2-".to_string()));
    }

    #[test]
    fn site_properties_rebuild_the_assignment() {
        let si = "Si".parse().unwrap();
        let mut structure = Structure::new(
            Lattice::cubic(5.0),
            vec![
                Site::new(si, Point3::origin()).with_pseudo("Si.xml"),
                Site::new(si, Point3::new(1.0, 1.0, 1.0)).with_pseudo("Si.xml"),
            ],
        );
        let table = Pseudopotentials::from_site_properties(&structure).unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("Si", "Si.xml")]);

        structure.push_site(Site::new(si, Point3::new(2.0, 2.0, 2.0)));
        assert!(Pseudopotentials::from_site_properties(&structure).is_none());
    }

    #[test]
    fn empty_structure_has_no_site_assignment() {
        let structure = Structure::new(Lattice::cubic(5.0), vec![]);
        assert!(Pseudopotentials::from_site_properties(&structure).is_none());
    }
}
