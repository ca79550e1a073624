use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static ELEMENT_DATA: [(&str, &str); 118] = [
    ("H", "Hydrogen"), ("He", "Helium"), ("Li", "Lithium"), ("Be", "Beryllium"), ("B", "Boron"),
    ("C", "Carbon"), ("N", "Nitrogen"), ("O", "Oxygen"), ("F", "Fluorine"), ("Ne", "Neon"),
    ("Na", "Sodium"), ("Mg", "Magnesium"), ("Al", "Aluminum"), ("Si", "Silicon"), ("P", "Phosphorus"),
    ("S", "Sulfur"), ("Cl", "Chlorine"), ("Ar", "Argon"), ("K", "Potassium"), ("Ca", "Calcium"),
    ("Sc", "Scandium"), ("Ti", "Titanium"), ("V", "Vanadium"), ("Cr", "Chromium"), ("Mn", "Manganese"),
    ("Fe", "Iron"), ("Co", "Cobalt"), ("Ni", "Nickel"), ("Cu", "Copper"), ("Zn", "Zinc"),
    ("Ga", "Gallium"), ("Ge", "Germanium"), ("As", "Arsenic"), ("Se", "Selenium"), ("Br", "Bromine"),
    ("Kr", "Krypton"), ("Rb", "Rubidium"), ("Sr", "Strontium"), ("Y", "Yttrium"), ("Zr", "Zirconium"),
    ("Nb", "Niobium"), ("Mo", "Molybdenum"), ("Tc", "Technetium"), ("Ru", "Ruthenium"), ("Rh", "Rhodium"),
    ("Pd", "Palladium"), ("Ag", "Silver"), ("Cd", "Cadmium"), ("In", "Indium"), ("Sn", "Tin"),
    ("Sb", "Antimony"), ("Te", "Tellurium"), ("I", "Iodine"), ("Xe", "Xenon"), ("Cs", "Cesium"),
    ("Ba", "Barium"), ("La", "Lanthanum"), ("Ce", "Cerium"), ("Pr", "Praseodymium"), ("Nd", "Neodymium"),
    ("Pm", "Promethium"), ("Sm", "Samarium"), ("Eu", "Europium"), ("Gd", "Gadolinium"), ("Tb", "Terbium"),
    ("Dy", "Dysprosium"), ("Ho", "Holmium"), ("Er", "Erbium"), ("Tm", "Thulium"), ("Yb", "Ytterbium"),
    ("Lu", "Lutetium"), ("Hf", "Hafnium"), ("Ta", "Tantalum"), ("W", "Tungsten"), ("Re", "Rhenium"),
    ("Os", "Osmium"), ("Ir", "Iridium"), ("Pt", "Platinum"), ("Au", "Gold"), ("Hg", "Mercury"),
    ("Tl", "Thallium"), ("Pb", "Lead"), ("Bi", "Bismuth"), ("Po", "Polonium"), ("At", "Astatine"),
    ("Rn", "Radon"), ("Fr", "Francium"), ("Ra", "Radium"), ("Ac", "Actinium"), ("Th", "Thorium"),
    ("Pa", "Protactinium"), ("U", "Uranium"), ("Np", "Neptunium"), ("Pu", "Plutonium"), ("Am", "Americium"),
    ("Cm", "Curium"), ("Bk", "Berkelium"), ("Cf", "Californium"), ("Es", "Einsteinium"), ("Fm", "Fermium"),
    ("Md", "Mendelevium"), ("No", "Nobelium"), ("Lr", "Lawrencium"), ("Rf", "Rutherfordium"), ("Db", "Dubnium"),
    ("Sg", "Seaborgium"), ("Bh", "Bohrium"), ("Hs", "Hassium"), ("Mt", "Meitnerium"), ("Ds", "Darmstadtium"),
    ("Rg", "Roentgenium"), ("Cn", "Copernicium"), ("Nh", "Nihonium"), ("Fl", "Flerovium"), ("Mc", "Moscovium"),
    ("Lv", "Livermorium"), ("Ts", "Tennessine"), ("Og", "Oganesson"),
];

static SYMBOL_TO_NUMBER: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8,
    "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15, "S" => 16,
    "Cl" => 17, "Ar" => 18, "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22, "V" => 23, "Cr" => 24,
    "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29, "Zn" => 30, "Ga" => 31, "Ge" => 32,
    "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36, "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40,
    "Nb" => 41, "Mo" => 42, "Tc" => 43, "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48,
    "In" => 49, "Sn" => 50, "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54, "Cs" => 55, "Ba" => 56,
    "La" => 57, "Ce" => 58, "Pr" => 59, "Nd" => 60, "Pm" => 61, "Sm" => 62, "Eu" => 63, "Gd" => 64,
    "Tb" => 65, "Dy" => 66, "Ho" => 67, "Er" => 68, "Tm" => 69, "Yb" => 70, "Lu" => 71, "Hf" => 72,
    "Ta" => 73, "W" => 74, "Re" => 75, "Os" => 76, "Ir" => 77, "Pt" => 78, "Au" => 79, "Hg" => 80,
    "Tl" => 81, "Pb" => 82, "Bi" => 83, "Po" => 84, "At" => 85, "Rn" => 86, "Fr" => 87, "Ra" => 88,
    "Ac" => 89, "Th" => 90, "Pa" => 91, "U" => 92, "Np" => 93, "Pu" => 94, "Am" => 95, "Cm" => 96,
    "Bk" => 97, "Cf" => 98, "Es" => 99, "Fm" => 100, "Md" => 101, "No" => 102, "Lr" => 103, "Rf" => 104,
    "Db" => 105, "Sg" => 106, "Bh" => 107, "Hs" => 108, "Mt" => 109, "Ds" => 110, "Rg" => 111, "Cn" => 112,
    "Nh" => 113, "Fl" => 114, "Mc" => 115, "Lv" => 116, "Ts" => 117, "Og" => 118,
};

static NAME_TO_NUMBER: Map<&'static str, u8> = phf_map! {
    "Hydrogen" => 1, "Helium" => 2, "Lithium" => 3, "Beryllium" => 4, "Boron" => 5, "Carbon" => 6,
    "Nitrogen" => 7, "Oxygen" => 8, "Fluorine" => 9, "Neon" => 10, "Sodium" => 11, "Magnesium" => 12,
    "Aluminum" => 13, "Silicon" => 14, "Phosphorus" => 15, "Sulfur" => 16, "Chlorine" => 17, "Argon" => 18,
    "Potassium" => 19, "Calcium" => 20, "Scandium" => 21, "Titanium" => 22, "Vanadium" => 23, "Chromium" => 24,
    "Manganese" => 25, "Iron" => 26, "Cobalt" => 27, "Nickel" => 28, "Copper" => 29, "Zinc" => 30,
    "Gallium" => 31, "Germanium" => 32, "Arsenic" => 33, "Selenium" => 34, "Bromine" => 35, "Krypton" => 36,
    "Rubidium" => 37, "Strontium" => 38, "Yttrium" => 39, "Zirconium" => 40, "Niobium" => 41, "Molybdenum" => 42,
    "Technetium" => 43, "Ruthenium" => 44, "Rhodium" => 45, "Palladium" => 46, "Silver" => 47, "Cadmium" => 48,
    "Indium" => 49, "Tin" => 50, "Antimony" => 51, "Tellurium" => 52, "Iodine" => 53, "Xenon" => 54,
    "Cesium" => 55, "Barium" => 56, "Lanthanum" => 57, "Cerium" => 58, "Praseodymium" => 59, "Neodymium" => 60,
    "Promethium" => 61, "Samarium" => 62, "Europium" => 63, "Gadolinium" => 64, "Terbium" => 65, "Dysprosium" => 66,
    "Holmium" => 67, "Erbium" => 68, "Thulium" => 69, "Ytterbium" => 70, "Lutetium" => 71, "Hafnium" => 72,
    "Tantalum" => 73, "Tungsten" => 74, "Rhenium" => 75, "Osmium" => 76, "Iridium" => 77, "Platinum" => 78,
    "Gold" => 79, "Mercury" => 80, "Thallium" => 81, "Lead" => 82, "Bismuth" => 83, "Polonium" => 84,
    "Astatine" => 85, "Radon" => 86, "Francium" => 87, "Radium" => 88, "Actinium" => 89, "Thorium" => 90,
    "Protactinium" => 91, "Uranium" => 92, "Neptunium" => 93, "Plutonium" => 94, "Americium" => 95, "Curium" => 96,
    "Berkelium" => 97, "Californium" => 98, "Einsteinium" => 99, "Fermium" => 100, "Mendelevium" => 101, "Nobelium" => 102,
    "Lawrencium" => 103, "Rutherfordium" => 104, "Dubnium" => 105, "Seaborgium" => 106, "Bohrium" => 107, "Hassium" => 108,
    "Meitnerium" => 109, "Darmstadtium" => 110, "Roentgenium" => 111, "Copernicium" => 112, "Nihonium" => 113, "Flerovium" => 114,
    "Moscovium" => 115, "Livermorium" => 116, "Tennessine" => 117, "Oganesson" => 118, "Aluminium" => 13, "Sulphur" => 16,
    "Caesium" => 55,
};

/// A chemical element, identified by its atomic number (1 to 118).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    #[error("'{0}' is neither an element symbol nor an element name")]
    Unknown(String),
    #[error("Atomic number {0} is outside the periodic table")]
    InvalidAtomicNumber(u32),
}

impl Element {
    pub fn from_atomic_number(z: u32) -> Result<Self, ElementError> {
        if (1..=ELEMENT_DATA.len() as u32).contains(&z) {
            Ok(Self(z as u8))
        } else {
            Err(ElementError::InvalidAtomicNumber(z))
        }
    }

    /// Looks up an element by its symbol. The match is exact and case-sensitive.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOL_TO_NUMBER.get(symbol).map(|&z| Self(z))
    }

    /// Looks up an element by its English name.
    ///
    /// A lowercase first letter is capitalized before the lookup; the remaining
    /// characters must match the canonical name exactly, so `silicon` and
    /// `Silicon` resolve while `SILICON` does not.
    pub fn from_long_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let first = chars.next()?;
        let key = if first.is_lowercase() {
            first.to_uppercase().chain(chars).collect::<String>()
        } else {
            name.to_string()
        };
        NAME_TO_NUMBER.get(key.as_str()).map(|&z| Self(z))
    }

    pub fn is_valid_symbol(symbol: &str) -> bool {
        Self::from_symbol(symbol).is_some()
    }

    pub fn is_valid_long_name(name: &str) -> bool {
        Self::from_long_name(name).is_some()
    }

    /// Resolves a token that is either an element symbol or an element name.
    /// Symbols take precedence.
    pub fn resolve(token: &str) -> Result<Self, ElementError> {
        Self::from_symbol(token)
            .or_else(|| Self::from_long_name(token))
            .ok_or_else(|| ElementError::Unknown(token.to_string()))
    }

    pub fn atomic_number(self) -> u8 {
        self.0
    }

    pub fn symbol(self) -> &'static str {
        ELEMENT_DATA[(self.0 - 1) as usize].0
    }

    pub fn name(self) -> &'static str {
        ELEMENT_DATA[(self.0 - 1) as usize].1
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_case_sensitive() {
        assert_eq!(Element::from_symbol("Si").map(Element::atomic_number), Some(14));
        assert!(Element::from_symbol("si").is_none());
        assert!(Element::from_symbol("SI").is_none());
        assert!(Element::is_valid_symbol("Og"));
        assert!(!Element::is_valid_symbol("Xx"));
    }

    #[test]
    fn long_names_accept_a_lowercase_first_letter_only() {
        let si = Element::from_symbol("Si").unwrap();
        assert_eq!(Element::from_long_name("Silicon"), Some(si));
        assert_eq!(Element::from_long_name("silicon"), Some(si));
        assert_eq!(Element::from_long_name("SILICON"), None);
        assert_eq!(Element::from_long_name("sILICON"), None);
        assert!(!Element::is_valid_long_name("Zebra"));
        assert!(!Element::is_valid_long_name(""));
    }

    #[test]
    fn british_spellings_are_aliases() {
        assert_eq!(Element::from_long_name("aluminium").unwrap().symbol(), "Al");
        assert_eq!(Element::from_long_name("Caesium").unwrap().symbol(), "Cs");
        assert_eq!(Element::from_long_name("sulphur").unwrap().name(), "Sulfur");
    }

    #[test]
    fn resolve_prefers_symbols_then_names() {
        assert_eq!(Element::resolve("O").unwrap().name(), "Oxygen");
        assert_eq!(Element::resolve("oxygen").unwrap().symbol(), "O");
        assert_eq!(
            Element::resolve("Zebra"),
            Err(ElementError::Unknown("Zebra".to_string()))
        );
    }

    #[test]
    fn tables_are_consistent_for_every_element() {
        for z in 1..=118u32 {
            let element = Element::from_atomic_number(z).unwrap();
            assert_eq!(Element::from_symbol(element.symbol()), Some(element));
            assert_eq!(Element::from_long_name(element.name()), Some(element));
        }
    }

    #[test]
    fn atomic_numbers_outside_the_table_are_rejected() {
        assert!(Element::from_atomic_number(0).is_err());
        assert!(Element::from_atomic_number(119).is_err());
        assert_eq!(Element::from_atomic_number(26).unwrap().to_string(), "Fe");
    }
}
