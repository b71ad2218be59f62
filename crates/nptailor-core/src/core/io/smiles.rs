use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::{Atom, Element};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::{GraphError, Molecule};
use crate::core::models::topology::BondOrder;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmilesError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Input contains no atoms")]
    Empty,
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { position: usize, character: char },
    #[error("Unknown element '{symbol}' at position {position}")]
    UnknownElement { position: usize, symbol: String },
    #[error("Bracket atom starting at position {position} is not terminated")]
    UnterminatedBracket { position: usize },
    #[error("Branch closed at position {position} was never opened")]
    UnmatchedBranchClose { position: usize },
    #[error("{0} branch(es) left open at end of input")]
    UnclosedBranch(usize),
    #[error("Ring closure {0} is never closed")]
    UnclosedRing(u16),
    #[error("Bond symbol at position {position} is not followed by an atom")]
    DanglingBond { position: usize },
    #[error("No atom precedes the token at position {position}")]
    MissingAtom { position: usize },
    #[error("Invalid graph edit: {0}")]
    Graph(#[from] GraphError),
}

/// Optional record name following the notation on the same line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmilesMetadata {
    pub name: Option<String>,
}

/// The SMILES line notation as a [`MolecularFile`] format: one record per line,
/// the notation optionally followed by whitespace and a name.
pub struct SmilesFile;

impl MolecularFile for SmilesFile {
    type Metadata = SmilesMetadata;
    type Error = SmilesError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Molecule, Self::Metadata), Self::Error> {
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (notation, name) = match trimmed.split_once(char::is_whitespace) {
                Some((notation, rest)) => (notation, Some(rest.trim().to_string())),
                None => (trimmed, None),
            };
            let molecule = parse(notation)?;
            return Ok((molecule, SmilesMetadata { name }));
        }
        Err(SmilesError::Empty)
    }

    fn write_to(
        molecule: &Molecule,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        match &metadata.name {
            Some(name) => writeln!(writer, "{} {}", write(molecule), name)?,
            None => writeln!(writer, "{}", write(molecule))?,
        }
        Ok(())
    }

    fn write_molecule_to(molecule: &Molecule, writer: &mut impl Write) -> Result<(), Self::Error> {
        Self::write_to(molecule, &SmilesMetadata::default(), writer)
    }
}

/// Parses a SMILES string into a molecule.
///
/// Supported: organic-subset and bracket atoms (isotope, chirality and atom-class
/// annotations are accepted and ignored), aromatic lowercase atoms, branches, ring
/// closures (`1`-`9` and `%nn`), the bond symbols `- = # : / \` and `.` separators.
///
/// # Errors
///
/// Returns a [`SmilesError`] describing the first malformed token.
pub fn parse(input: &str) -> Result<Molecule, SmilesError> {
    Parser::new(input.trim()).run()
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    molecule: Molecule,
    previous: Option<AtomId>,
    pending_bond: Option<(BondOrder, usize)>,
    branches: Vec<Option<AtomId>>,
    rings: HashMap<u16, (AtomId, Option<BondOrder>)>,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            molecule: Molecule::new(),
            previous: None,
            pending_bond: None,
            branches: Vec::new(),
            rings: HashMap::new(),
        }
    }

    fn run(mut self) -> Result<Molecule, SmilesError> {
        while let Some(&c) = self.chars.get(self.pos) {
            match c {
                '(' => {
                    self.ensure_no_pending_bond()?;
                    let previous = self.previous.ok_or(SmilesError::MissingAtom { position: self.pos })?;
                    self.branches.push(Some(previous));
                    self.pos += 1;
                }
                ')' => {
                    self.ensure_no_pending_bond()?;
                    let restored = self
                        .branches
                        .pop()
                        .ok_or(SmilesError::UnmatchedBranchClose { position: self.pos })?;
                    self.previous = restored;
                    self.pos += 1;
                }
                '-' | '=' | '#' | ':' | '/' | '\\' => {
                    if self.pending_bond.is_some() {
                        return Err(SmilesError::UnexpectedCharacter {
                            position: self.pos,
                            character: c,
                        });
                    }
                    let order = match c {
                        '=' => BondOrder::Double,
                        '#' => BondOrder::Triple,
                        ':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    self.pending_bond = Some((order, self.pos));
                    self.pos += 1;
                }
                '.' => {
                    self.ensure_no_pending_bond()?;
                    self.previous = None;
                    self.pos += 1;
                }
                '%' | '0'..='9' => self.ring_closure()?,
                '[' => {
                    let atom = self.bracket_atom()?;
                    self.place_atom(atom)?;
                }
                _ if c.is_ascii_alphabetic() => {
                    let atom = self.organic_atom()?;
                    self.place_atom(atom)?;
                }
                _ => {
                    return Err(SmilesError::UnexpectedCharacter {
                        position: self.pos,
                        character: c,
                    });
                }
            }
        }

        self.ensure_no_pending_bond()?;
        if !self.branches.is_empty() {
            return Err(SmilesError::UnclosedBranch(self.branches.len()));
        }
        if let Some(&digit) = self.rings.keys().min() {
            return Err(SmilesError::UnclosedRing(digit));
        }
        if self.molecule.atom_count() == 0 {
            return Err(SmilesError::Empty);
        }
        Ok(self.molecule)
    }

    fn ensure_no_pending_bond(&self) -> Result<(), SmilesError> {
        match self.pending_bond {
            Some((_, position)) => Err(SmilesError::DanglingBond { position }),
            None => Ok(()),
        }
    }

    fn implicit_order(&self, a: AtomId, b: AtomId) -> BondOrder {
        let aromatic = |id| self.molecule.atom(id).is_some_and(|atom| atom.aromatic);
        if aromatic(a) && aromatic(b) {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn place_atom(&mut self, atom: Atom) -> Result<(), SmilesError> {
        let atom_id = self.molecule.add_atom(atom);
        if let Some(previous) = self.previous {
            let order = match self.pending_bond.take() {
                Some((order, _)) => order,
                None => self.implicit_order(previous, atom_id),
            };
            self.molecule.add_bond(previous, atom_id, order)?;
        }
        self.pending_bond = None;
        self.previous = Some(atom_id);
        Ok(())
    }

    fn ring_closure(&mut self) -> Result<(), SmilesError> {
        let start = self.pos;
        let atom_id = self.previous.ok_or(SmilesError::MissingAtom { position: start })?;
        let digit = if self.chars[self.pos] == '%' {
            let tens = self.chars.get(self.pos + 1).and_then(|c| c.to_digit(10));
            let ones = self.chars.get(self.pos + 2).and_then(|c| c.to_digit(10));
            match (tens, ones) {
                (Some(t), Some(o)) => {
                    self.pos += 3;
                    (t * 10 + o) as u16
                }
                _ => {
                    return Err(SmilesError::UnexpectedCharacter {
                        position: start,
                        character: '%',
                    });
                }
            }
        } else {
            let value = self.chars[self.pos].to_digit(10).unwrap_or(0) as u16;
            self.pos += 1;
            value
        };

        let pending = self.pending_bond.take().map(|(order, _)| order);
        match self.rings.remove(&digit) {
            Some((partner, opening_order)) => {
                let order = pending
                    .or(opening_order)
                    .unwrap_or_else(|| self.implicit_order(partner, atom_id));
                self.molecule.add_bond(partner, atom_id, order)?;
            }
            None => {
                self.rings.insert(digit, (atom_id, pending));
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<Atom, SmilesError> {
        let start = self.pos;
        let c = self.chars[self.pos];
        let next = self.chars.get(self.pos + 1).copied();
        let symbol = match (c, next) {
            ('C', Some('l')) | ('B', Some('r')) => {
                self.pos += 2;
                format!("{c}{}", next.unwrap_or_default())
            }
            _ => {
                self.pos += 1;
                c.to_string()
            }
        };
        let aromatic = c.is_ascii_lowercase();
        let element: Element = symbol.parse().map_err(|_| SmilesError::UnknownElement {
            position: start,
            symbol: symbol.clone(),
        })?;
        if !element.is_organic_subset() {
            return Err(SmilesError::UnknownElement {
                position: start,
                symbol,
            });
        }
        Ok(if aromatic {
            Atom::aromatic(element)
        } else {
            Atom::new(element)
        })
    }

    fn bracket_atom(&mut self) -> Result<Atom, SmilesError> {
        let start = self.pos;
        let close = self.chars[start..]
            .iter()
            .position(|&c| c == ']')
            .map(|offset| start + offset)
            .ok_or(SmilesError::UnterminatedBracket { position: start })?;
        let body: Vec<char> = self.chars[start + 1..close].to_vec();
        self.pos = close + 1;

        let mut i = 0;
        while i < body.len() && body[i].is_ascii_digit() {
            i += 1;
        }

        let unknown = |symbol: String| SmilesError::UnknownElement {
            position: start,
            symbol,
        };
        let first = *body.get(i).ok_or_else(|| unknown(String::new()))?;
        let two_letter: Option<Element> = body
            .get(i + 1)
            .filter(|c| c.is_ascii_lowercase() && first.is_ascii_uppercase())
            .and_then(|second| format!("{first}{second}").parse().ok());
        let (element, aromatic) = match two_letter {
            Some(element) => {
                i += 2;
                (element, false)
            }
            None => {
                let element: Element = first
                    .to_string()
                    .parse()
                    .map_err(|_| unknown(first.to_string()))?;
                i += 1;
                (element, first.is_ascii_lowercase())
            }
        };

        while i < body.len() && body[i] == '@' {
            i += 1;
        }

        let mut hydrogens = 0u8;
        if body.get(i) == Some(&'H') {
            i += 1;
            hydrogens = 1;
            if let Some(count) = body.get(i).and_then(|c| c.to_digit(10)) {
                hydrogens = count as u8;
                i += 1;
            }
        }

        let mut charge = 0i8;
        while let Some(&sign @ ('+' | '-')) = body.get(i) {
            let unit = if sign == '+' { 1 } else { -1 };
            i += 1;
            match body.get(i).and_then(|c| c.to_digit(10)) {
                Some(magnitude) => {
                    charge += unit * magnitude as i8;
                    i += 1;
                }
                None => charge += unit,
            }
        }

        if body.get(i) == Some(&':') {
            i += 1;
            while i < body.len() && body[i].is_ascii_digit() {
                i += 1;
            }
        }

        if let Some(&character) = body.get(i) {
            return Err(SmilesError::UnexpectedCharacter {
                position: start + 1 + i,
                character,
            });
        }

        let atom = if aromatic {
            Atom::aromatic(element)
        } else {
            Atom::new(element)
        };
        Ok(atom.with_charge(charge).with_hydrogens(hydrogens))
    }
}

/// Writes a molecule as a SMILES string.
///
/// The output is deterministic: components are started from the earliest live atom,
/// neighbors are visited in bond-formation order, and ring-closure digits are
/// allocated lowest-free-first. Disconnected components are joined with `.`.
pub fn write(molecule: &Molecule) -> String {
    let mut writer = Writer::new(molecule);
    let roots: Vec<AtomId> = molecule.atoms_iter().map(|(id, _)| id).collect();
    let mut components = Vec::new();
    for root in roots {
        if writer.visited.contains(&root) {
            continue;
        }
        writer.traverse(root, None);
        let mut out = String::new();
        writer.emit(root, &mut out);
        components.push(out);
    }
    components.join(".")
}

struct Writer<'a> {
    molecule: &'a Molecule,
    visited: HashSet<AtomId>,
    children: HashMap<AtomId, Vec<AtomId>>,
    ring_bonds: HashSet<(AtomId, AtomId)>,
    openings: HashMap<AtomId, Vec<AtomId>>,
    closings: HashMap<AtomId, Vec<AtomId>>,
    open_digits: HashMap<(AtomId, AtomId), u16>,
    free_digits: BTreeSet<u16>,
}

fn pair(a: AtomId, b: AtomId) -> (AtomId, AtomId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl<'a> Writer<'a> {
    fn new(molecule: &'a Molecule) -> Self {
        Self {
            molecule,
            visited: HashSet::new(),
            children: HashMap::new(),
            ring_bonds: HashSet::new(),
            openings: HashMap::new(),
            closings: HashMap::new(),
            open_digits: HashMap::new(),
            free_digits: (1..=99).collect(),
        }
    }

    fn traverse(&mut self, atom_id: AtomId, parent: Option<AtomId>) {
        let molecule = self.molecule;
        self.visited.insert(atom_id);
        for &neighbor in molecule.neighbors(atom_id) {
            if Some(neighbor) == parent {
                continue;
            }
            if self.visited.contains(&neighbor) {
                if self.ring_bonds.insert(pair(atom_id, neighbor)) {
                    self.openings.entry(neighbor).or_default().push(atom_id);
                    self.closings.entry(atom_id).or_default().push(neighbor);
                }
            } else {
                self.children.entry(atom_id).or_default().push(neighbor);
                self.traverse(neighbor, Some(atom_id));
            }
        }
    }

    fn emit(&mut self, atom_id: AtomId, out: &mut String) {
        if let Some(atom) = self.molecule.atom(atom_id) {
            out.push_str(&atom_symbol(atom));
        }

        for partner in self.closings.remove(&atom_id).unwrap_or_default() {
            let key = pair(atom_id, partner);
            if let Some(digit) = self.open_digits.remove(&key) {
                out.push_str(self.bond_symbol(partner, atom_id));
                push_ring_digit(out, digit);
                self.free_digits.insert(digit);
            }
        }
        for partner in self.openings.remove(&atom_id).unwrap_or_default() {
            if let Some(digit) = self.free_digits.pop_first() {
                self.open_digits.insert(pair(atom_id, partner), digit);
                push_ring_digit(out, digit);
            }
        }

        let children = self.children.remove(&atom_id).unwrap_or_default();
        let last = children.len().saturating_sub(1);
        for (i, child) in children.into_iter().enumerate() {
            let branch = i < last;
            if branch {
                out.push('(');
            }
            out.push_str(self.bond_symbol(atom_id, child));
            self.emit(child, out);
            if branch {
                out.push(')');
            }
        }
    }

    fn bond_symbol(&self, a: AtomId, b: AtomId) -> &'static str {
        let aromatic = |id| self.molecule.atom(id).is_some_and(|atom| atom.aromatic);
        let both_aromatic = aromatic(a) && aromatic(b);
        match self.molecule.bond(a, b).unwrap_or_default() {
            BondOrder::Single if both_aromatic => "-",
            BondOrder::Single => "",
            BondOrder::Double => "=",
            BondOrder::Triple => "#",
            BondOrder::Aromatic if both_aromatic => "",
            BondOrder::Aromatic => ":",
        }
    }
}

fn push_ring_digit(out: &mut String, digit: u16) {
    if digit < 10 {
        out.push_str(&digit.to_string());
    } else {
        out.push_str(&format!("%{digit:02}"));
    }
}

fn atom_symbol(atom: &Atom) -> String {
    let symbol = if atom.aromatic && atom.element.can_be_aromatic() {
        atom.element.symbol().to_lowercase()
    } else {
        atom.element.symbol().to_string()
    };
    if atom.charge == 0 && atom.hydrogens == 0 && atom.element.is_organic_subset() {
        return symbol;
    }

    let mut bracket = format!("[{symbol}");
    match atom.hydrogens {
        0 => {}
        1 => bracket.push('H'),
        n => bracket.push_str(&format!("H{n}")),
    }
    match atom.charge {
        0 => {}
        1 => bracket.push('+'),
        -1 => bracket.push('-'),
        c if c > 0 => bracket.push_str(&format!("+{c}")),
        c => bracket.push_str(&format!("-{}", -c)),
    }
    bracket.push(']');
    bracket
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn element_counts(molecule: &Molecule) -> Vec<(Element, usize)> {
        let mut counts: HashMap<Element, usize> = HashMap::new();
        for (_, atom) in molecule.atoms_iter() {
            *counts.entry(atom.element).or_default() += 1;
        }
        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort();
        counts
    }

    mod parsing {
        use super::*;

        #[test]
        fn parses_linear_chain_with_implicit_single_bonds() {
            let molecule = parse("CCO").unwrap();
            assert_eq!(molecule.atom_count(), 3);
            assert_eq!(molecule.bond_count_total(), 2);
            assert!(molecule.bonds().all(|b| b.order == BondOrder::Single));
        }

        #[test]
        fn parses_branches_and_explicit_bonds() {
            let molecule = parse("CC(=O)O").unwrap();
            let ids: Vec<AtomId> = molecule.atoms_iter().map(|(id, _)| id).collect();
            assert_eq!(molecule.bond(ids[1], ids[2]), Some(BondOrder::Double));
            assert_eq!(molecule.bond(ids[1], ids[3]), Some(BondOrder::Single));
            assert_eq!(molecule.bond_count(ids[1]), 3);
        }

        #[test]
        fn parses_aromatic_ring_with_implicit_aromatic_bonds() {
            let molecule = parse("c1ccccc1").unwrap();
            assert_eq!(molecule.atom_count(), 6);
            assert_eq!(molecule.bond_count_total(), 6);
            assert!(molecule.bonds().all(|b| b.order == BondOrder::Aromatic));
            assert!(molecule.atoms_iter().all(|(_, a)| a.aromatic));
        }

        #[test]
        fn ring_bond_order_can_be_given_at_opening() {
            let molecule = parse("C=1CCCCC1").unwrap();
            let ids: Vec<AtomId> = molecule.atoms_iter().map(|(id, _)| id).collect();
            assert_eq!(molecule.bond(ids[0], ids[5]), Some(BondOrder::Double));
            assert_eq!(molecule.bond(ids[0], ids[1]), Some(BondOrder::Single));
        }

        #[test]
        fn parses_two_digit_ring_closures() {
            let molecule = parse("C%12CCC%12").unwrap();
            assert_eq!(molecule.atom_count(), 4);
            assert_eq!(molecule.bond_count_total(), 4);
        }

        #[test]
        fn parses_bracket_atoms_with_hydrogens_and_charges() {
            let molecule = parse("[NH3+]CC(=O)[O-]").unwrap();
            let atoms: Vec<&Atom> = molecule.atoms_iter().map(|(_, a)| a).collect();
            assert_eq!(atoms[0].charge, 1);
            assert_eq!(atoms[0].hydrogens, 3);
            assert_eq!(atoms[4].charge, -1);

            let indole = parse("c1ccc2[nH]ccc2c1").unwrap();
            let nitrogen = indole
                .atoms_iter()
                .find(|(_, a)| a.is(Element::Nitrogen))
                .map(|(_, a)| a)
                .unwrap();
            assert!(nitrogen.aromatic);
            assert_eq!(nitrogen.hydrogens, 1);
        }

        #[test]
        fn parses_two_letter_organic_atoms() {
            let molecule = parse("ClCBr").unwrap();
            assert_eq!(
                element_counts(&molecule),
                vec![
                    (Element::Carbon, 1),
                    (Element::Chlorine, 1),
                    (Element::Bromine, 1)
                ]
            );
        }

        #[test]
        fn dot_separates_components() {
            let molecule = parse("CC.O").unwrap();
            assert_eq!(molecule.atom_count(), 3);
            assert_eq!(molecule.bond_count_total(), 1);
        }

        #[test]
        fn stereo_bond_marks_are_read_as_single_bonds() {
            let molecule = parse("F/C=C/F").unwrap();
            assert_eq!(molecule.bond_count_total(), 3);
            assert_eq!(
                molecule
                    .bonds()
                    .filter(|b| b.order == BondOrder::Double)
                    .count(),
                1
            );
        }

        #[test]
        fn rejects_malformed_input() {
            assert!(matches!(parse(""), Err(SmilesError::Empty)));
            assert!(matches!(parse("C(C"), Err(SmilesError::UnclosedBranch(1))));
            assert!(matches!(
                parse("C)C"),
                Err(SmilesError::UnmatchedBranchClose { position: 1 })
            ));
            assert!(matches!(parse("C1CC"), Err(SmilesError::UnclosedRing(1))));
            assert!(matches!(
                parse("[C"),
                Err(SmilesError::UnterminatedBracket { position: 0 })
            ));
            assert!(matches!(parse("CXC"), Err(SmilesError::UnknownElement { .. })));
            assert!(matches!(
                parse("C="),
                Err(SmilesError::DanglingBond { position: 1 })
            ));
            assert!(matches!(
                parse("(C)"),
                Err(SmilesError::MissingAtom { position: 0 })
            ));
            assert!(matches!(parse("C11"), Err(SmilesError::Graph(_))));
        }
    }

    mod writing {
        use super::*;

        #[test]
        fn writes_simple_structures_canonically() {
            assert_eq!(write(&parse("CCO").unwrap()), "CCO");
            assert_eq!(write(&parse("CC(=O)O").unwrap()), "CC(=O)O");
            assert_eq!(write(&parse("c1ccccc1").unwrap()), "c1ccccc1");
            assert_eq!(write(&parse("C#N").unwrap()), "C#N");
        }

        #[test]
        fn writes_charges_hydrogens_and_components() {
            assert_eq!(write(&parse("[NH4+].[Cl-]").unwrap()), "[NH4+].[Cl-]");
            assert_eq!(write(&parse("c1cc[nH]c1").unwrap()), "c1cc[nH]c1");
        }

        #[test]
        fn single_bonds_between_aromatic_atoms_are_explicit() {
            let text = write(&parse("c1ccccc1-c1ccccc1").unwrap());
            assert!(text.contains('-'));
            let reparsed = parse(&text).unwrap();
            assert_eq!(
                reparsed
                    .bonds()
                    .filter(|b| b.order == BondOrder::Single)
                    .count(),
                1
            );
        }

        #[test]
        fn writing_is_deterministic() {
            let molecule = parse("OC(=O)C1CCC2(CC1)CC(N)C2").unwrap();
            assert_eq!(write(&molecule), write(&molecule.clone()));
        }

        #[test]
        fn round_trip_preserves_atom_and_bond_counts() {
            for text in [
                "NC(CO)C(=O)O",
                "NC(Cc1c[nH]c2ccccc12)C(=O)O",
                "OC(=O)C1CCC2(CC1)CC(N)C2",
                "C1CC2CCC3CCC1C23",
                "CC(C)(C)c1ccc(O)cc1.[Na+]",
                "O=C1NC(=O)C(N1)Cc1ccccc1",
            ] {
                let molecule = parse(text).unwrap();
                let reparsed = parse(&write(&molecule)).unwrap();
                assert_eq!(reparsed.atom_count(), molecule.atom_count(), "{text}");
                assert_eq!(
                    reparsed.bond_count_total(),
                    molecule.bond_count_total(),
                    "{text}"
                );
                assert_eq!(element_counts(&reparsed), element_counts(&molecule));
            }
        }

        #[test]
        fn writer_skips_removed_atoms() {
            let mut molecule = parse("CCO").unwrap();
            let oxygen = molecule
                .atoms_iter()
                .find(|(_, a)| a.is(Element::Oxygen))
                .map(|(id, _)| id)
                .unwrap();
            molecule.remove_atom(oxygen);
            assert_eq!(write(&molecule), "CC");
        }
    }

    mod files {
        use super::*;

        #[test]
        fn reads_first_record_with_name() {
            let mut reader = Cursor::new("# comment\n\nNC(CS)C(=O)O cysteine\nCCO\n");
            let (molecule, metadata) = SmilesFile::read_from(&mut reader).unwrap();
            assert_eq!(molecule.atom_count(), 7);
            assert_eq!(metadata.name.as_deref(), Some("cysteine"));
        }

        #[test]
        fn empty_reader_is_an_error() {
            let mut reader = Cursor::new("\n  \n");
            assert!(matches!(
                SmilesFile::read_from(&mut reader),
                Err(SmilesError::Empty)
            ));
        }

        #[test]
        fn path_round_trip() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("product.smi");
            let molecule = parse("CC(=O)NCC(=O)O").unwrap();
            let metadata = SmilesMetadata {
                name: Some("acetylglycine".to_string()),
            };
            SmilesFile::write_to_path(&molecule, &metadata, &path).unwrap();

            let (reread, reread_metadata) = SmilesFile::read_from_path(&path).unwrap();
            assert_eq!(reread.atom_count(), molecule.atom_count());
            assert_eq!(reread.bond_count_total(), molecule.bond_count_total());
            assert_eq!(reread_metadata, metadata);
        }

        #[test]
        fn write_molecule_to_omits_name() {
            let molecule = parse("CO").unwrap();
            let mut buffer = Vec::new();
            SmilesFile::write_molecule_to(&molecule, &mut buffer).unwrap();
            assert_eq!(String::from_utf8(buffer).unwrap(), "CO\n");
        }
    }
}
