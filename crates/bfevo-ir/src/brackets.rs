//! Bracket matching for loop jumps.

use crate::instruction::Opcode;
use crate::program::Program;

/// Matching partner of every paired bracket in a program.
///
/// Unmatched brackets have no partner. The mapping is symmetric: if `p`
/// pairs with `q` then `q` pairs with `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketMap {
    partners: Vec<Option<usize>>,
}

impl BracketMap {
    /// Single left-to-right pass with a stack of open positions
    pub fn build(program: &Program) -> Self {
        let mut partners = vec![None; program.len()];
        let mut open = Vec::new();

        for (pos, opcode) in program.opcodes().enumerate() {
            match opcode {
                Opcode::JumpIfZero => open.push(pos),
                Opcode::JumpUnlessZero => {
                    if let Some(start) = open.pop() {
                        partners[start] = Some(pos);
                        partners[pos] = Some(start);
                    }
                }
                _ => {}
            }
        }

        Self { partners }
    }

    pub fn partner(&self, pos: usize) -> Option<usize> {
        self.partners.get(pos).copied().flatten()
    }

    /// All `(position, partner)` pairs, in position order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.partners
            .iter()
            .enumerate()
            .filter_map(|(pos, partner)| partner.map(|p| (pos, p)))
    }

    /// Number of bracket positions that have a partner
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_nested_brackets() {
        let map = BracketMap::build(&Program::from("[+[-]>]"));
        assert_eq!(map.partner(0), Some(6));
        assert_eq!(map.partner(6), Some(0));
        assert_eq!(map.partner(2), Some(4));
        assert_eq!(map.partner(4), Some(2));
        assert_eq!(map.partner(1), None);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_unmatched_brackets_are_absent() {
        let map = BracketMap::build(&Program::from("][[]"));
        assert_eq!(map.partner(0), None);
        assert_eq!(map.partner(1), None);
        assert_eq!(map.partner(2), Some(3));
        assert_eq!(map.len(), 2);

        assert!(BracketMap::build(&Program::from("[[[")).is_empty());
        assert!(BracketMap::build(&Program::new()).is_empty());
    }

    #[test]
    fn test_out_of_range_lookup() {
        let map = BracketMap::build(&Program::from("[]"));
        assert_eq!(map.partner(10), None);
    }

    proptest! {
        #[test]
        fn prop_bracket_map_is_symmetric(code in "[\\[\\]+<>-]{0,64}") {
            let program = Program::from(code.as_str());
            let map = BracketMap::build(&program);
            let bytes = program.as_bytes();

            for (pos, partner) in map.iter() {
                prop_assert_eq!(map.partner(partner), Some(pos));
                let (open, close) = if pos < partner { (pos, partner) } else { (partner, pos) };
                prop_assert_eq!(bytes[open], b'[');
                prop_assert_eq!(bytes[close], b']');
            }
        }
    }
}
