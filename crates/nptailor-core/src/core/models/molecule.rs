use super::atom::{Atom, Hybridization};
use super::ids::AtomId;
use super::topology::{Bond, BondOrder};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Errors raised by primitive graph edits on a [`Molecule`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Atom {0:?} does not exist in the molecule")]
    AtomNotFound(AtomId),
    #[error("Bond between {0:?} and {1:?} already exists")]
    BondExists(AtomId, AtomId),
    #[error("No bond exists between {0:?} and {1:?}")]
    BondNotFound(AtomId, AtomId),
    #[error("Cannot bond atom {0:?} to itself")]
    SelfBond(AtomId),
}

/// An atom/bond graph addressed by opaque atom ids.
///
/// Atoms live in a slot map, so removal tombstones the slot and never invalidates
/// other ids. Bonds are stored once under their normalized id pair; a cached
/// adjacency list gives constant-time neighbor lookups and preserves the order in
/// which bonds were formed.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Bond orders keyed by the normalized `(smaller, larger)` atom id pair.
    bonds: BTreeMap<(AtomId, AtomId), BondOrder>,
    /// Cached adjacency list, indexed by atom ID.
    adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
}

fn bond_key(a: AtomId, b: AtomId) -> (AtomId, AtomId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Molecule {
    /// Creates a new, empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all live atoms in insertion order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn contains_atom(&self, id: AtomId) -> bool {
        self.atoms.contains_key(id)
    }

    /// Returns an iterator over all bonds.
    pub fn bonds(&self) -> impl Iterator<Item = Bond> + '_ {
        self.bonds
            .iter()
            .map(|(&(a, b), &order)| Bond::new(a, b, order))
    }

    pub fn bond_count_total(&self) -> usize {
        self.bonds.len()
    }

    /// Inserts an atom and initializes its adjacency entry.
    ///
    /// # Return
    ///
    /// The ID of the newly inserted atom.
    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let atom_id = self.atoms.insert(atom);
        self.adjacency.insert(atom_id, Vec::new());
        atom_id
    }

    /// Adds a bond between two atoms.
    ///
    /// # Arguments
    ///
    /// * `atom1_id` - ID of the first atom.
    /// * `atom2_id` - ID of the second atom.
    /// * `order` - The order of the bond.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AtomNotFound`] if either atom is missing,
    /// [`GraphError::SelfBond`] for a loop, and [`GraphError::BondExists`] if the two
    /// atoms are already bonded. Bond orders are changed with [`Self::set_bond_order`].
    pub fn add_bond(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
        order: BondOrder,
    ) -> Result<(), GraphError> {
        self.require(atom1_id)?;
        self.require(atom2_id)?;
        if atom1_id == atom2_id {
            return Err(GraphError::SelfBond(atom1_id));
        }
        let key = bond_key(atom1_id, atom2_id);
        if self.bonds.contains_key(&key) {
            return Err(GraphError::BondExists(atom1_id, atom2_id));
        }

        self.bonds.insert(key, order);
        self.adjacency[atom1_id].push(atom2_id);
        self.adjacency[atom2_id].push(atom1_id);
        Ok(())
    }

    /// Returns the order of the bond between two atoms, if they are bonded.
    pub fn bond(&self, atom1_id: AtomId, atom2_id: AtomId) -> Option<BondOrder> {
        self.bonds.get(&bond_key(atom1_id, atom2_id)).copied()
    }

    /// Changes the order of an existing bond.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::BondNotFound`] if the atoms are not bonded.
    pub fn set_bond_order(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
        order: BondOrder,
    ) -> Result<(), GraphError> {
        let slot = self
            .bonds
            .get_mut(&bond_key(atom1_id, atom2_id))
            .ok_or(GraphError::BondNotFound(atom1_id, atom2_id))?;
        *slot = order;
        Ok(())
    }

    /// Removes the bond between two atoms.
    ///
    /// # Return
    ///
    /// The order the bond had before removal.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::BondNotFound`] if the atoms are not bonded.
    pub fn remove_bond(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
    ) -> Result<BondOrder, GraphError> {
        let order = self
            .bonds
            .remove(&bond_key(atom1_id, atom2_id))
            .ok_or(GraphError::BondNotFound(atom1_id, atom2_id))?;
        if let Some(adjacency) = self.adjacency.get_mut(atom1_id) {
            adjacency.retain(|&id| id != atom2_id);
        }
        if let Some(adjacency) = self.adjacency.get_mut(atom2_id) {
            adjacency.retain(|&id| id != atom1_id);
        }
        Ok(order)
    }

    /// Removes an atom from the molecule.
    ///
    /// Every incident bond is removed and the adjacency lists of former neighbors are
    /// cleaned up, so no bond ever references a dead atom.
    ///
    /// # Return
    ///
    /// Returns `Some(Atom)` if the atom existed and was removed, otherwise `None`.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(atom_id)?;

        let neighbors = self.adjacency.remove(atom_id).unwrap_or_default();
        for neighbor_id in neighbors {
            self.bonds.remove(&bond_key(atom_id, neighbor_id));
            if let Some(adjacency) = self.adjacency.get_mut(neighbor_id) {
                adjacency.retain(|&id| id != atom_id);
            }
        }

        Some(atom)
    }

    /// Retrieves the bonded neighbors of an atom in bond-formation order.
    ///
    /// Returns an empty slice for atoms that do not exist.
    pub fn neighbors(&self, atom_id: AtomId) -> &[AtomId] {
        self.adjacency
            .get(atom_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of atoms directly bonded to `atom_id`.
    pub fn bond_count(&self, atom_id: AtomId) -> usize {
        self.neighbors(atom_id).len()
    }

    /// Sum of the valence contributions of every bond incident to `atom_id`.
    pub fn bond_order_sum(&self, atom_id: AtomId) -> f64 {
        self.neighbors(atom_id)
            .iter()
            .filter_map(|&nb| self.bond(atom_id, nb))
            .map(BondOrder::valence_contribution)
            .sum()
    }

    /// Infers the hybridization of an atom from its incident bonds.
    ///
    /// # Return
    ///
    /// `Sp` for a triple bond or two double bonds, `Sp2` for any double or aromatic
    /// bond, `Sp3` otherwise; `None` if the atom does not exist.
    pub fn hybridization(&self, atom_id: AtomId) -> Option<Hybridization> {
        if !self.contains_atom(atom_id) {
            return None;
        }
        let orders: Vec<BondOrder> = self
            .neighbors(atom_id)
            .iter()
            .filter_map(|&nb| self.bond(atom_id, nb))
            .collect();
        let doubles = orders.iter().filter(|&&o| o == BondOrder::Double).count();
        let hybridization = if orders.contains(&BondOrder::Triple) || doubles >= 2 {
            Hybridization::Sp
        } else if doubles == 1 || orders.contains(&BondOrder::Aromatic) {
            Hybridization::Sp2
        } else {
            Hybridization::Sp3
        };
        Some(hybridization)
    }

    /// Copies every atom and bond of `other` into this molecule.
    ///
    /// # Return
    ///
    /// A map from the atom ids of `other` to the ids of their copies.
    pub fn merge(&mut self, other: &Molecule) -> HashMap<AtomId, AtomId> {
        let mapping: HashMap<AtomId, AtomId> = other
            .atoms
            .iter()
            .map(|(old_id, atom)| (old_id, self.add_atom(atom.clone())))
            .collect();
        for (&(a, b), &order) in &other.bonds {
            let (new_a, new_b) = (mapping[&a], mapping[&b]);
            self.bonds.insert(bond_key(new_a, new_b), order);
            self.adjacency[new_a].push(new_b);
            self.adjacency[new_b].push(new_a);
        }
        mapping
    }

    fn require(&self, atom_id: AtomId) -> Result<(), GraphError> {
        if self.atoms.contains_key(atom_id) {
            Ok(())
        } else {
            Err(GraphError::AtomNotFound(atom_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Element;

    struct TestRefs {
        c1: AtomId,
        c2: AtomId,
        o: AtomId,
    }

    // C-C=O
    fn create_acetaldehyde() -> (Molecule, TestRefs) {
        let mut molecule = Molecule::new();
        let c1 = molecule.add_atom(Atom::new(Element::Carbon));
        let c2 = molecule.add_atom(Atom::new(Element::Carbon));
        let o = molecule.add_atom(Atom::new(Element::Oxygen));
        molecule.add_bond(c1, c2, BondOrder::Single).unwrap();
        molecule.add_bond(c2, o, BondOrder::Double).unwrap();
        (molecule, TestRefs { c1, c2, o })
    }

    #[test]
    fn molecule_creation_and_access() {
        let (molecule, refs) = create_acetaldehyde();
        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(molecule.bond_count_total(), 2);
        assert_eq!(molecule.bond(refs.c2, refs.o), Some(BondOrder::Double));
        assert_eq!(molecule.bond(refs.o, refs.c2), Some(BondOrder::Double));
        assert_eq!(molecule.bond(refs.c1, refs.o), None);
        assert_eq!(molecule.neighbors(refs.c2), &[refs.c1, refs.o]);
    }

    #[test]
    fn add_bond_rejects_duplicates_missing_atoms_and_loops() {
        let (mut molecule, refs) = create_acetaldehyde();
        assert_eq!(
            molecule.add_bond(refs.o, refs.c2, BondOrder::Single),
            Err(GraphError::BondExists(refs.o, refs.c2))
        );
        assert_eq!(
            molecule.add_bond(refs.c1, refs.c1, BondOrder::Single),
            Err(GraphError::SelfBond(refs.c1))
        );
        molecule.remove_atom(refs.o);
        assert_eq!(
            molecule.add_bond(refs.c1, refs.o, BondOrder::Single),
            Err(GraphError::AtomNotFound(refs.o))
        );
        assert_eq!(molecule.bond_count_total(), 1);
    }

    #[test]
    fn set_bond_order_and_remove_bond_require_existing_bond() {
        let (mut molecule, refs) = create_acetaldehyde();
        molecule
            .set_bond_order(refs.o, refs.c2, BondOrder::Single)
            .unwrap();
        assert_eq!(molecule.bond(refs.c2, refs.o), Some(BondOrder::Single));
        assert_eq!(
            molecule.set_bond_order(refs.c1, refs.o, BondOrder::Double),
            Err(GraphError::BondNotFound(refs.c1, refs.o))
        );

        assert_eq!(molecule.remove_bond(refs.c1, refs.c2), Ok(BondOrder::Single));
        assert!(molecule.neighbors(refs.c1).is_empty());
        assert_eq!(molecule.neighbors(refs.c2), &[refs.o]);
        assert_eq!(
            molecule.remove_bond(refs.c1, refs.c2),
            Err(GraphError::BondNotFound(refs.c1, refs.c2))
        );
    }

    #[test]
    fn atom_removal_cleans_up_bonds_and_adjacency() {
        let (mut molecule, refs) = create_acetaldehyde();
        let removed = molecule.remove_atom(refs.c2).unwrap();
        assert!(removed.is(Element::Carbon));
        assert_eq!(molecule.atom_count(), 2);
        assert_eq!(molecule.bond_count_total(), 0);
        assert!(molecule.neighbors(refs.c1).is_empty());
        assert!(molecule.neighbors(refs.o).is_empty());
        assert!(molecule.remove_atom(refs.c2).is_none());
        assert!(molecule.bonds().all(|b| !b.contains(refs.c2)));
    }

    #[test]
    fn bond_order_sum_and_hybridization_follow_incident_bonds() {
        let (mut molecule, refs) = create_acetaldehyde();
        assert_eq!(molecule.bond_order_sum(refs.c2), 3.0);
        assert_eq!(molecule.hybridization(refs.c2), Some(Hybridization::Sp2));
        assert_eq!(molecule.hybridization(refs.c1), Some(Hybridization::Sp3));

        let n = molecule.add_atom(Atom::new(Element::Nitrogen));
        molecule.add_bond(refs.c1, n, BondOrder::Triple).unwrap();
        assert_eq!(molecule.hybridization(refs.c1), Some(Hybridization::Sp));
        assert_eq!(molecule.bond_order_sum(refs.c1), 4.0);

        molecule.remove_atom(n);
        assert_eq!(molecule.hybridization(n), None);
    }

    #[test]
    fn clone_is_independent_of_original() {
        let (molecule, refs) = create_acetaldehyde();
        let mut copy = molecule.clone();
        copy.remove_atom(refs.o);
        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(molecule.bond(refs.c2, refs.o), Some(BondOrder::Double));
        assert_eq!(copy.atom_count(), 2);
    }

    #[test]
    fn merge_copies_atoms_and_bonds_with_fresh_ids() {
        let (mut molecule, refs) = create_acetaldehyde();
        let (fragment, fragment_refs) = create_acetaldehyde();
        let mapping = molecule.merge(&fragment);

        assert_eq!(molecule.atom_count(), 6);
        assert_eq!(molecule.bond_count_total(), 4);
        let new_c2 = mapping[&fragment_refs.c2];
        let new_o = mapping[&fragment_refs.o];
        assert_eq!(molecule.bond(new_c2, new_o), Some(BondOrder::Double));
        assert!(molecule.bond(refs.c2, new_o).is_none());
    }
}
