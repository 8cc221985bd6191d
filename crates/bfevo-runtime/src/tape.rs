//! Cyclic tape of wrapping signed bytes.

/// Wrap an arbitrary integer into signed byte range [-128, 127].
pub fn wrap_cell(value: i64) -> i8 {
    value as u8 as i8
}

/// Fixed-size working memory of the machine.
///
/// Addresses wrap modulo the tape length and cell arithmetic wraps modulo 256.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<i8>,
}

impl Tape {
    /// Build a tape of `size` cells from `initial`, truncating or zero-padding it.
    pub fn new(size: usize, initial: &[i32]) -> Self {
        let mut cells: Vec<i8> = initial
            .iter()
            .take(size)
            .map(|&v| wrap_cell(v as i64))
            .collect();
        cells.resize(size, 0);
        Self { cells }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, addr: usize) -> i8 {
        self.cells[addr]
    }

    pub fn add(&mut self, addr: usize, delta: i8) {
        self.cells[addr] = self.cells[addr].wrapping_add(delta);
    }

    /// Move `addr` one cell right, wrapping at the end
    pub fn right(&self, addr: usize) -> usize {
        (addr + 1) % self.cells.len()
    }

    /// Move `addr` one cell left, wrapping at the start
    pub fn left(&self, addr: usize) -> usize {
        (addr + self.cells.len() - 1) % self.cells.len()
    }

    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<i8> {
        self.cells
    }
}
