use crate::core::cluster::monomer::Monomer;
use phf::{Map, phf_map};

/// Atom marking the carbonyl ("ketone") carbon of a residue template.
pub const KETONE_MARKER: &str = "I";
/// Atom marking the extender atom (nitrogen or alpha carbon) of a residue template.
pub const EXTENDER_MARKER: &str = "F";

// Iodine sits on the carbonyl carbon, fluorine on the atom that bonds the previous
// residue's carbonyl. Both markers are removed once the residue is placed.
static RESIDUE_TEMPLATES: Map<&'static str, &'static str> = phf_map! {
    "Ala" => "FNC(C)C(I)=O",
    "Arg" => "FNC(CCCNC(N)=N)C(I)=O",
    "Asn" => "FNC(CC(N)=O)C(I)=O",
    "Asp" => "FNC(CC(O)=O)C(I)=O",
    "Cys" => "FNC(CS)C(I)=O",
    "Glu" => "FNC(CCC(O)=O)C(I)=O",
    "Gln" => "FNC(CCC(N)=O)C(I)=O",
    "Gly" => "FNCC(I)=O",
    "His" => "FNC(Cc1cnc[nH]1)C(I)=O",
    "Ile" => "FNC(C(C)CC)C(I)=O",
    "Leu" => "FNC(CC(C)C)C(I)=O",
    "Lys" => "FNC(CCCCN)C(I)=O",
    "Met" => "FNC(CCSC)C(I)=O",
    "Phe" => "FNC(Cc1ccccc1)C(I)=O",
    "Pro" => "FN1CCCC1C(I)=O",
    "Ser" => "FNC(CO)C(I)=O",
    "Thr" => "FNC(C(C)O)C(I)=O",
    "Trp" => "FNC(Cc1c[nH]c2ccccc12)C(I)=O",
    "Tyr" => "FNC(Cc1ccc(O)cc1)C(I)=O",
    "Val" => "FNC(C(C)C)C(I)=O",
    "Orn" => "FNC(CCCN)C(I)=O",
    "Hpg" => "FNC(c1ccc(O)cc1)C(I)=O",
    "Dpg" => "FNC(c1cc(O)cc(O)c1)C(I)=O",
    "Bht" => "FNC(C(O)c1ccc(O)cc1)C(I)=O",
    "Mal" => "FCC(I)=O",
    "MeMal" => "FC(C)C(I)=O",
};

/// Returns the marked residue template for a monomer.
pub fn residue_template(monomer: Monomer) -> Option<&'static str> {
    RESIDUE_TEMPLATES.get(monomer.code()).copied()
}
