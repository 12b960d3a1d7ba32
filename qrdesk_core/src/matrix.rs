use bitvec::{slice::BitSlice, vec::BitVec};

/// Module (aka, a cell) of a QR symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Light,
    Dark,
}

impl Module {
    /// Whether this is a dark module.
    pub fn is_dark(&self) -> bool {
        matches!(self, Module::Dark)
    }
}

impl From<bool> for Module {
    fn from(value: bool) -> Self {
        match value {
            true => Module::Dark,
            false => Module::Light,
        }
    }
}

impl From<Module> for bool {
    fn from(value: Module) -> Self {
        value.is_dark()
    }
}

/// A square grid of bits stored row by row.
#[derive(Clone, PartialEq, Eq)]
struct BitGrid {
    data: BitVec,
    size: usize,
}

impl BitGrid {
    fn filled(size: usize, value: bool) -> Self {
        Self {
            data: BitVec::repeat(value, size * size),
            size,
        }
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            Some(self.size * row + col)
        } else {
            None
        }
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.data.get(self.index(row, col)?).map(|bit| *bit)
    }

    /// # Panics
    /// Panics if position `(row, col)` is out of bounds.
    #[inline]
    fn set(&mut self, row: usize, col: usize, value: bool) {
        let index = self.index(row, col).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the size is {} but the index is ({}, {})",
                self.size, row, col
            )
        });
        self.data.set(index, value)
    }

    fn row(&self, row: usize) -> Option<&BitSlice> {
        let start = self.index(row, 0)?;
        Some(&self.data[start..start + self.size])
    }
}

/// Square matrix of modules produced by a symbol encoder.
///
/// The matrix is always square and every cell is either [Module::Dark] or [Module::Light].
#[derive(Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    grid: BitGrid,
}

impl ModuleMatrix {
    /// Return a matrix with side `size` filled with `module`.
    #[inline]
    pub fn filled(size: usize, module: Module) -> Self {
        Self {
            grid: BitGrid::filled(size, module.into()),
        }
    }

    /// Build a matrix with side `size` where the module at `(row, col)` is dark iff
    /// `is_dark(row, col)` holds.
    /// # Example
    /// ```
    /// use qrdesk_core::ModuleMatrix;
    /// let diagonal = ModuleMatrix::from_fn(3, |row, col| row == col);
    /// assert!(diagonal.is_dark(1, 1));
    /// assert!(!diagonal.is_dark(0, 2));
    /// ```
    pub fn from_fn<F>(size: usize, mut is_dark: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut matrix = Self::filled(size, Module::Light);
        for row in 0..size {
            for col in 0..size {
                if is_dark(row, col) {
                    matrix.grid.set(row, col, true);
                }
            }
        }
        matrix
    }

    /// Side length of the matrix, in modules.
    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size
    }

    /// Get the module at position `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Module> {
        self.grid.get(row, col).map(Module::from)
    }

    /// Whether the module at `(row, col)` is dark. Positions outside the matrix are light.
    #[inline]
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.grid.get(row, col).unwrap_or(false)
    }

    /// Set the module at position `(row, col)`.
    /// # Panics
    /// Panics if position `(row, col)` is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, module: Module) {
        self.grid.set(row, col, module.into())
    }

    /// Iterate over the `(row, col)` positions of all dark modules, row by row.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size();
        self.grid.data.iter_ones().map(move |index| (index / size, index % size))
    }

    /// Count the dark modules.
    pub fn dark_count(&self) -> usize {
        self.grid.data.count_ones()
    }

    /// Iterate over the rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &BitSlice> + '_ {
        (0..self.size()).filter_map(|row| self.grid.row(row))
    }
}

impl std::fmt::Debug for ModuleMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ModuleMatrix({}x{}) {{", self.size(), self.size())?;
        for row in self.rows() {
            let line: String = row.iter().map(|bit| if *bit { '#' } else { '.' }).collect();
            writeln!(f, "    {}", line)?;
        }
        write!(f, "}}")
    }
}
