//! Instruction set of the tape machine.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// The eight instruction symbols, in canonical order.
pub const ALPHABET: [u8; 8] = *b"><+-.,[]";

/// Decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `>` move the data pointer right
    Right,
    /// `<` move the data pointer left
    Left,
    /// `+` increment the current cell
    Inc,
    /// `-` decrement the current cell
    Dec,
    /// `.` output (no effect on this machine)
    Output,
    /// `,` input (no effect on this machine)
    Input,
    /// `[` jump past the matching `]` if the current cell is zero
    JumpIfZero,
    /// `]` jump back to the matching `[` if the current cell is non-zero
    JumpUnlessZero,
    /// Any byte outside the alphabet
    Nop,
}

impl Opcode {
    pub fn decode(byte: u8) -> Self {
        match byte {
            b'>' => Opcode::Right,
            b'<' => Opcode::Left,
            b'+' => Opcode::Inc,
            b'-' => Opcode::Dec,
            b'.' => Opcode::Output,
            b',' => Opcode::Input,
            b'[' => Opcode::JumpIfZero,
            b']' => Opcode::JumpUnlessZero,
            _ => Opcode::Nop,
        }
    }

    /// Source symbol, if the opcode has one
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Opcode::Right => Some(b'>'),
            Opcode::Left => Some(b'<'),
            Opcode::Inc => Some(b'+'),
            Opcode::Dec => Some(b'-'),
            Opcode::Output => Some(b'.'),
            Opcode::Input => Some(b','),
            Opcode::JumpIfZero => Some(b'['),
            Opcode::JumpUnlessZero => Some(b']'),
            Opcode::Nop => None,
        }
    }
}

/// Draw one symbol uniformly from the alphabet.
pub fn random_symbol(rng: &mut ChaCha8Rng) -> u8 {
    ALPHABET[rng.gen_range(0..ALPHABET.len())]
}
