use super::ids::AtomId;

/// Named atom handles for one backbone position inside a scaffold.
///
/// A residue records the nitrogen, alpha carbon and carbonyl ("ketone") carbon of the
/// monomer at `position`, plus every atom that belongs to it. Handles are cleared
/// when their atom is removed, so a present handle always names a live atom; bond
/// counts must still be re-checked at the time of use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    position: usize,
    nitrogen: Option<AtomId>,
    alpha_carbon: Option<AtomId>,
    ketone: Option<AtomId>,
    atoms: Vec<AtomId>,
}

impl Residue {
    pub(crate) fn new(position: usize) -> Self {
        Self {
            position,
            nitrogen: None,
            alpha_carbon: None,
            ketone: None,
            atoms: Vec::new(),
        }
    }

    /// The backbone position this residue was built for.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn nitrogen(&self) -> Option<AtomId> {
        self.nitrogen
    }

    pub fn alpha_carbon(&self) -> Option<AtomId> {
        self.alpha_carbon
    }

    pub fn ketone(&self) -> Option<AtomId> {
        self.ketone
    }

    /// Every atom that belongs to this residue, in insertion order.
    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atoms.contains(&atom_id)
    }

    pub(crate) fn set_nitrogen(&mut self, atom_id: Option<AtomId>) {
        self.nitrogen = atom_id;
    }

    pub(crate) fn set_alpha_carbon(&mut self, atom_id: Option<AtomId>) {
        self.alpha_carbon = atom_id;
    }

    pub(crate) fn set_ketone(&mut self, atom_id: Option<AtomId>) {
        self.ketone = atom_id;
    }

    pub(crate) fn add_atom(&mut self, atom_id: AtomId) {
        if !self.atoms.contains(&atom_id) {
            self.atoms.push(atom_id);
        }
    }

    /// Forgets an atom, clearing any handle that pointed at it.
    pub(crate) fn remove_atom(&mut self, atom_id: AtomId) {
        self.atoms.retain(|&id| id != atom_id);
        for handle in [&mut self.nitrogen, &mut self.alpha_carbon, &mut self.ketone] {
            if *handle == Some(atom_id) {
                *handle = None;
            }
        }
    }
}
