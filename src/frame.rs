use crate::atom::Atom;
use std::ops::Index;

/// One step of a trajectory.
///
/// Frames only grow through [`Frame::add_atom`] while they are being read;
/// once handed out they are treated as values, and merging produces new
/// frames with [`Frame::with_atom`] instead of touching existing ones.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frame {
    pub comment: String,
    atoms: Vec<Atom>,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    pub fn with_comment(comment: String) -> Self {
        Frame {
            comment,
            atoms: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.atoms.iter().map(Atom::position).collect()
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom)
    }

    /// Returns a copy of this frame with `atom` appended after the existing atoms.
    pub fn with_atom(&self, atom: Atom) -> Frame {
        let mut atoms = Vec::with_capacity(self.atoms.len() + 1);
        atoms.extend_from_slice(&self.atoms);
        atoms.push(atom);
        Frame {
            comment: self.comment.clone(),
            atoms,
        }
    }
}

impl Index<usize> for Frame {
    type Output = Atom;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_frame_indexing() {
        let mut frame = Frame::new();
        frame.add_atom(Atom::new("H".to_string(), 1.0, 2.0, 3.0));
        frame.add_atom(Atom::new("O".to_string(), 4.0, 5.0, 6.0));

        assert_eq!(frame.size(), 2);
        assert_eq!(frame[0].symbol, "H");
        assert_eq!(frame[1].symbol, "O");
        assert_approx_eq!(frame[0].x, 1.0);
        assert_approx_eq!(frame[1].x, 4.0);
        assert_eq!(frame.positions()[1], [4.0, 5.0, 6.0]);
    }

    #[test]
    #[should_panic]
    fn test_frame_indexing_out_of_bounds() {
        let frame = Frame::new();
        let _ = frame[0];
    }

    #[test]
    fn with_atom_leaves_original_untouched() {
        let mut frame = Frame::with_comment("water".to_string());
        frame.add_atom(Atom::new("O".to_string(), 0.0, 0.0, 0.0));

        let merged = frame.with_atom(Atom::com(1.0, 2.0, 3.0));
        assert_eq!(frame.size(), 1);
        assert_eq!(merged.size(), 2);
        assert_eq!(merged.comment, "water");
        assert_eq!(merged[0], frame[0]);
        assert_eq!(merged[1].symbol, "X");
        assert_approx_eq!(merged[1].z, 3.0);
    }
}
