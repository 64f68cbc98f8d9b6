//! Minimal PDB reader for C-alpha traces.
//!
//! Only fixed-column `ATOM` records with atom name `CA` are read; everything
//! else (HETATM, connectivity, headers) is ignored. Reading stops at the
//! first `ENDMDL`, so multi-model files yield the first model.

use std::ops::Range;
use std::path::Path;

use glam::Vec3;

use crate::error::TubeError;

// Fixed-width column ranges (0-based, end-exclusive)
const SERIAL: Range<usize> = 6..11;
const ATOM_NAME: Range<usize> = 12..16;
const ALT_LOC: usize = 16;
const RESIDUE_NAME: Range<usize> = 17..20;
const CHAIN_ID: usize = 21;
const RESIDUE_SEQ: Range<usize> = 22..26;
const X: Range<usize> = 30..38;
const Y: Range<usize> = 38..46;
const Z: Range<usize> = 46..54;

/// One C-alpha atom read from an `ATOM` record.
#[derive(Debug, Clone, PartialEq)]
pub struct CaAtom {
    /// Atom serial number.
    pub serial: i32,
    /// Three-letter residue name.
    pub residue_name: String,
    /// Chain identifier (blank when absent).
    pub chain_id: char,
    /// Residue sequence number.
    pub residue_seq: i32,
    /// Coordinates in angstroms.
    pub position: Vec3,
}

/// Parse every primary-conformer C-alpha atom in file order.
///
/// Alternate locations other than blank or `A` are skipped.
pub fn parse_ca_atoms(text: &str) -> Result<Vec<CaAtom>, TubeError> {
    let mut atoms = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.starts_with("ENDMDL") {
            break;
        }
        if !line.starts_with("ATOM") || field(line, ATOM_NAME) != "CA" {
            continue;
        }
        if !matches!(column(line, ALT_LOC), ' ' | 'A') {
            continue;
        }
        atoms.push(parse_atom(line, line_no + 1)?);
    }
    Ok(atoms)
}

/// Ordered C-alpha positions: chains in order of first appearance, residues
/// sorted by sequence number within each chain.
///
/// Fails with [`TubeError::StructureLoad`] when the text holds no C-alpha
/// atoms.
pub fn parse_ca_trace(text: &str) -> Result<Vec<Vec3>, TubeError> {
    let atoms = parse_ca_atoms(text)?;
    if atoms.is_empty() {
        return Err(TubeError::StructureLoad(
            "no CA atoms found".to_owned(),
        ));
    }

    let mut chain_order: Vec<char> = Vec::new();
    for atom in &atoms {
        if !chain_order.contains(&atom.chain_id) {
            chain_order.push(atom.chain_id);
        }
    }
    let mut keyed: Vec<(usize, i32, Vec3)> = atoms
        .iter()
        .map(|a| {
            let chain = chain_order
                .iter()
                .position(|&c| c == a.chain_id)
                .unwrap_or_default();
            (chain, a.residue_seq, a.position)
        })
        .collect();
    keyed.sort_by_key(|&(chain, seq, _)| (chain, seq));

    log::debug!(
        "parsed {} CA atoms in {} chain(s)",
        keyed.len(),
        chain_order.len()
    );
    Ok(keyed.into_iter().map(|(_, _, p)| p).collect())
}

/// Read a PDB file and return its ordered C-alpha trace.
pub fn load_ca_trace(path: &Path) -> Result<Vec<Vec3>, TubeError> {
    let text = std::fs::read_to_string(path)?;
    parse_ca_trace(&text).map_err(|e| match e {
        TubeError::StructureLoad(msg) => {
            TubeError::StructureLoad(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

fn parse_atom(line: &str, line_no: usize) -> Result<CaAtom, TubeError> {
    let int = |range: Range<usize>, what: &str| {
        field(line, range).parse::<i32>().map_err(|e| {
            TubeError::StructureLoad(format!(
                "line {line_no}: invalid {what}: {e}"
            ))
        })
    };
    let coord = |range: Range<usize>, axis: char| {
        field(line, range).parse::<f32>().map_err(|e| {
            TubeError::StructureLoad(format!(
                "line {line_no}: invalid {axis} coordinate: {e}"
            ))
        })
    };

    Ok(CaAtom {
        serial: int(SERIAL, "atom serial")?,
        residue_name: field(line, RESIDUE_NAME).to_owned(),
        chain_id: column(line, CHAIN_ID),
        residue_seq: int(RESIDUE_SEQ, "residue number")?,
        position: Vec3::new(coord(X, 'x')?, coord(Y, 'y')?, coord(Z, 'z')?),
    })
}

/// Trimmed contents of a column range; short lines yield what is present.
fn field(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    line.get(range.start..end).unwrap_or("").trim()
}

/// Single-character column, blank when the line is too short.
fn column(line: &str, index: usize) -> char {
    line.get(index..=index)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}
