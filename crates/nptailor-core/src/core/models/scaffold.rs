use super::atom::{Atom, Hybridization};
use super::ids::{AtomId, ResidueId};
use super::molecule::{GraphError, Molecule};
use super::residue::Residue;
use super::topology::BondOrder;
use slotmap::SlotMap;
use std::collections::{BTreeMap, HashMap};

/// The mutable molecular graph of one combinatorial branch.
///
/// A scaffold pairs a [`Molecule`] with the residues built for each backbone
/// position. All graph edits go through the scaffold so that residue bookkeeping
/// stays consistent: removing an atom also drops it from its residue and clears any
/// handle that pointed at it.
///
/// `Clone` is a deep arena copy; branches never share a scaffold.
#[derive(Debug, Clone, Default)]
pub struct Scaffold {
    molecule: Molecule,
    residues: SlotMap<ResidueId, Residue>,
    positions: BTreeMap<usize, ResidueId>,
}

impl Scaffold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the underlying molecular graph.
    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Resolves the residue built for a backbone position.
    ///
    /// # Arguments
    ///
    /// * `position` - The zero-based backbone position.
    ///
    /// # Return
    ///
    /// Returns `Some(&Residue)` if a residue exists at that position, otherwise `None`.
    pub fn residue(&self, position: usize) -> Option<&Residue> {
        self.positions
            .get(&position)
            .and_then(|&id| self.residues.get(id))
    }

    pub fn residue_id(&self, position: usize) -> Option<ResidueId> {
        self.positions.get(&position).copied()
    }

    pub fn residue_by_id(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub(crate) fn residue_mut(&mut self, position: usize) -> Option<&mut Residue> {
        let id = *self.positions.get(&position)?;
        self.residues.get_mut(id)
    }

    /// Iterates residues in backbone order.
    pub fn residues(&self) -> impl Iterator<Item = &Residue> {
        self.positions
            .values()
            .filter_map(|&id| self.residues.get(id))
    }

    /// Backbone positions that carry a residue, in order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.keys().copied()
    }

    pub fn residue_count(&self) -> usize {
        self.positions.len()
    }

    /// Registers a residue for a backbone position, returning the existing one if
    /// the position is already occupied.
    pub fn add_residue(&mut self, position: usize) -> ResidueId {
        *self
            .positions
            .entry(position)
            .or_insert_with(|| self.residues.insert(Residue::new(position)))
    }

    /// Returns the residue that owns `atom_id`, if any.
    pub fn owner(&self, atom_id: AtomId) -> Option<&Residue> {
        self.molecule
            .atom(atom_id)
            .and_then(|atom| atom.residue_id)
            .and_then(|id| self.residues.get(id))
    }

    /// Inserts an atom, optionally assigning it to a residue.
    pub fn add_atom(&mut self, mut atom: Atom, residue_id: Option<ResidueId>) -> AtomId {
        let residue_id = residue_id.filter(|&id| self.residues.contains_key(id));
        atom.residue_id = residue_id;
        let atom_id = self.molecule.add_atom(atom);
        if let Some(residue) = residue_id.and_then(|id| self.residues.get_mut(id)) {
            residue.add_atom(atom_id);
        }
        atom_id
    }

    /// Moves an existing atom into a residue.
    pub fn attach_to_residue(
        &mut self,
        atom_id: AtomId,
        residue_id: ResidueId,
    ) -> Result<(), GraphError> {
        let atom = self
            .molecule
            .atom_mut(atom_id)
            .ok_or(GraphError::AtomNotFound(atom_id))?;
        let previous = atom.residue_id.replace(residue_id);
        if let Some(old) = previous.and_then(|id| self.residues.get_mut(id)) {
            old.remove_atom(atom_id);
        }
        if let Some(residue) = self.residues.get_mut(residue_id) {
            residue.add_atom(atom_id);
        }
        Ok(())
    }

    /// Removes an atom, its incident bonds, and every residue reference to it.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.molecule.remove_atom(atom_id)?;
        if let Some(residue) = atom.residue_id.and_then(|id| self.residues.get_mut(id)) {
            residue.remove_atom(atom_id);
        }
        Some(atom)
    }

    pub fn add_bond(&mut self, a: AtomId, b: AtomId, order: BondOrder) -> Result<(), GraphError> {
        self.molecule.add_bond(a, b, order)
    }

    pub fn set_bond_order(
        &mut self,
        a: AtomId,
        b: AtomId,
        order: BondOrder,
    ) -> Result<(), GraphError> {
        self.molecule.set_bond_order(a, b, order)
    }

    pub fn remove_bond(&mut self, a: AtomId, b: AtomId) -> Result<BondOrder, GraphError> {
        self.molecule.remove_bond(a, b)
    }

    /// Copies a fragment into the scaffold, assigning its atoms to `residue_id`.
    ///
    /// # Return
    ///
    /// A map from fragment atom ids to their ids in the scaffold.
    pub fn merge_fragment(
        &mut self,
        fragment: &Molecule,
        residue_id: Option<ResidueId>,
    ) -> HashMap<AtomId, AtomId> {
        let mapping = self.molecule.merge(fragment);
        if let Some(residue_id) = residue_id.filter(|&id| self.residues.contains_key(id)) {
            let mut new_ids: Vec<AtomId> = fragment
                .atoms_iter()
                .filter_map(|(old, _)| mapping.get(&old).copied())
                .collect();
            new_ids.sort();
            for atom_id in new_ids {
                if let Some(atom) = self.molecule.atom_mut(atom_id) {
                    atom.residue_id = Some(residue_id);
                }
                self.residues[residue_id].add_atom(atom_id);
            }
        }
        mapping
    }

    pub fn atom(&self, atom_id: AtomId) -> Option<&Atom> {
        self.molecule.atom(atom_id)
    }

    pub(crate) fn atom_mut(&mut self, atom_id: AtomId) -> Option<&mut Atom> {
        self.molecule.atom_mut(atom_id)
    }

    pub fn neighbors(&self, atom_id: AtomId) -> &[AtomId] {
        self.molecule.neighbors(atom_id)
    }

    pub fn bond(&self, a: AtomId, b: AtomId) -> Option<BondOrder> {
        self.molecule.bond(a, b)
    }

    pub fn bond_count(&self, atom_id: AtomId) -> usize {
        self.molecule.bond_count(atom_id)
    }

    pub fn bond_order_sum(&self, atom_id: AtomId) -> f64 {
        self.molecule.bond_order_sum(atom_id)
    }

    pub fn hybridization(&self, atom_id: AtomId) -> Option<Hybridization> {
        self.molecule.hybridization(atom_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Element;

    fn two_residue_scaffold() -> (Scaffold, AtomId, AtomId, AtomId) {
        let mut scaffold = Scaffold::new();
        let r0 = scaffold.add_residue(0);
        let r1 = scaffold.add_residue(1);
        let n = scaffold.add_atom(Atom::new(Element::Nitrogen), Some(r0));
        let ca = scaffold.add_atom(Atom::new(Element::Carbon), Some(r0));
        let n1 = scaffold.add_atom(Atom::new(Element::Nitrogen), Some(r1));
        scaffold.add_bond(n, ca, BondOrder::Single).unwrap();
        scaffold.add_bond(ca, n1, BondOrder::Single).unwrap();
        scaffold.residue_mut(0).unwrap().set_nitrogen(Some(n));
        scaffold.residue_mut(0).unwrap().set_alpha_carbon(Some(ca));
        scaffold.residue_mut(1).unwrap().set_nitrogen(Some(n1));
        (scaffold, n, ca, n1)
    }

    #[test]
    fn residue_lookup_by_position() {
        let (scaffold, n, ca, _) = two_residue_scaffold();
        let residue = scaffold.residue(0).unwrap();
        assert_eq!(residue.nitrogen(), Some(n));
        assert_eq!(residue.atoms(), &[n, ca]);
        assert!(scaffold.residue(2).is_none());
        assert_eq!(scaffold.residue_count(), 2);
        assert_eq!(scaffold.owner(ca).map(Residue::position), Some(0));
    }

    #[test]
    fn add_residue_is_idempotent_per_position() {
        let (mut scaffold, ..) = two_residue_scaffold();
        let first = scaffold.residue_id(0).unwrap();
        assert_eq!(scaffold.add_residue(0), first);
        assert_eq!(scaffold.residue_count(), 2);
    }

    #[test]
    fn remove_atom_clears_residue_handle_and_bonds() {
        let (mut scaffold, n, ca, _) = two_residue_scaffold();
        scaffold.remove_atom(n).unwrap();
        let residue = scaffold.residue(0).unwrap();
        assert!(residue.nitrogen().is_none());
        assert_eq!(residue.atoms(), &[ca]);
        assert_eq!(scaffold.bond_count(ca), 1);
    }

    #[test]
    fn attach_to_residue_moves_membership() {
        let (mut scaffold, _, ca, n1) = two_residue_scaffold();
        let r0 = scaffold.residue_id(0).unwrap();
        scaffold.attach_to_residue(n1, r0).unwrap();
        assert!(scaffold.residue(0).unwrap().contains(n1));
        assert!(!scaffold.residue(1).unwrap().contains(n1));
        assert_eq!(scaffold.owner(n1).map(Residue::position), Some(0));
        assert!(scaffold.owner(ca).is_some());
    }

    #[test]
    fn clone_gives_independent_branch_copy() {
        let (scaffold, n, ..) = two_residue_scaffold();
        let mut branch = scaffold.clone();
        branch.remove_atom(n);
        assert_eq!(scaffold.residue(0).unwrap().nitrogen(), Some(n));
        assert!(branch.residue(0).unwrap().nitrogen().is_none());
        assert_eq!(scaffold.molecule().atom_count(), 3);
        assert_eq!(branch.molecule().atom_count(), 2);
    }

    #[test]
    fn merge_fragment_assigns_atoms_to_residue() {
        let (mut scaffold, ..) = two_residue_scaffold();
        let mut fragment = Molecule::new();
        let c = fragment.add_atom(Atom::new(Element::Carbon));
        let o = fragment.add_atom(Atom::new(Element::Oxygen));
        fragment.add_bond(c, o, BondOrder::Double).unwrap();

        let r1 = scaffold.residue_id(1);
        let mapping = scaffold.merge_fragment(&fragment, r1);

        assert_eq!(scaffold.molecule().atom_count(), 5);
        assert!(scaffold.residue(1).unwrap().contains(mapping[&c]));
        assert_eq!(
            scaffold.bond(mapping[&c], mapping[&o]),
            Some(BondOrder::Double)
        );
    }
}
