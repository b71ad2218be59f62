use phf::{Map, phf_map};
use serde::Deserialize;
use std::fmt;

/// A sugar that a glycosyltransferase can transfer onto a scaffold hydroxyl.
///
/// `smiles` carries a single iodine on the anomeric carbon; the iodine is replaced
/// by the glycosidic bond when the sugar is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Sugar {
    pub name: String,
    pub smiles: String,
}

static KNOWN_SUGARS: Map<&'static str, &'static str> = phf_map! {
    "glucose" => "IC1OC(CO)C(O)C(O)C1O",
    "rhamnose" => "IC1OC(C)C(O)C(O)C1O",
    "olivose" => "IC1CC(O)C(O)C(C)O1",
    "vancosamine" => "IC1CC(C)(N)C(O)C(C)O1",
};

impl Sugar {
    pub fn new(name: impl Into<String>, smiles: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            smiles: smiles.into(),
        }
    }

    /// A sugar from the built-in table, looked up by lower-case name.
    pub fn named(name: &str) -> Option<Self> {
        KNOWN_SUGARS
            .get(name)
            .map(|smiles| Self::new(name, *smiles))
    }
}

impl fmt::Display for Sugar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
