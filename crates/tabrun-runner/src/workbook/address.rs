//! A1-style cell references.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell reference '{0}'")]
pub struct ParseCellRefError(pub String);

/// A 1-based `(row, column)` position parsed from text such as `"C3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl FromStr for CellRef {
    type Err = ParseCellRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCellRefError(s.to_string());
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = trimmed.split_at(split);

        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let mut column: u32 = 0;
        for c in letters.chars() {
            let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
            column = column
                .checked_mul(26)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(invalid)?;
        }

        let row: u32 = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(CellRef { row, column })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.column;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        let column: String = letters.iter().rev().collect();
        write!(f, "{}{}", column, self.row)
    }
}
