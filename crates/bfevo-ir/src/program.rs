//! Program value type.

use crate::instruction::{random_symbol, Opcode};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An evolved program (genome).
///
/// Stored as raw bytes so that cut points and edits never have to respect
/// character boundaries. Programs are values: mutation and crossover return
/// new programs instead of editing existing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Program {
    code: Vec<u8>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(code: impl Into<Vec<u8>>) -> Self {
        Self { code: code.into() }
    }

    /// Random program of `len` alphabet symbols
    pub fn random(len: usize, rng: &mut ChaCha8Rng) -> Self {
        Self {
            code: (0..len).map(|_| random_symbol(rng)).collect(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Decode the program into opcodes, one per byte
    pub fn opcodes(&self) -> impl Iterator<Item = Opcode> + '_ {
        self.code.iter().map(|&b| Opcode::decode(b))
    }
}

impl From<&str> for Program {
    fn from(code: &str) -> Self {
        Self::from_bytes(code.as_bytes())
    }
}

impl From<String> for Program {
    fn from(code: String) -> Self {
        Self::from_bytes(code.into_bytes())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.code))
    }
}

// Serialized as program text, which is how programs are read and shared.
// Code that is not valid UTF-8 falls back to raw bytes so it round-trips.
impl Serialize for Program {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match std::str::from_utf8(&self.code) {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => serializer.serialize_bytes(&self.code),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProgramRepr {
    Text(String),
    Bytes(Vec<u8>),
}

impl<'de> Deserialize<'de> for Program {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ProgramRepr::deserialize(deserializer)? {
            ProgramRepr::Text(text) => Program::from(text),
            ProgramRepr::Bytes(bytes) => Program::from_bytes(bytes),
        })
    }
}
