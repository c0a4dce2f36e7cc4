//! A1 notation ranges (`Backup!AP4:AP103`).

use std::fmt;
use std::str::FromStr;

use super::SheetError;

/// Rectangular cell range. Columns are zero-based, rows one-based, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub start_col: u32,
    pub start_row: u32,
    pub end_col: u32,
    pub end_row: u32,
}

impl A1Range {
    /// Column range of `len` rows starting at `start_row`. `len` of zero yields a one-row range.
    ///
    /// Rows are 1-based; row 0 and ranges running past `u32::MAX` are rejected.
    pub fn column(
        sheet: impl Into<String>,
        col: u32,
        start_row: u32,
        len: u32,
    ) -> Result<Self, SheetError> {
        let sheet = sheet.into();
        let invalid = |reason: &'static str| SheetError::InvalidRange {
            range: format!("{}!{}{}", sheet, column_letters(col), start_row),
            reason,
        };
        if start_row == 0 {
            return Err(invalid("rows start at 1"));
        }
        let end_row = start_row
            .checked_add(len.max(1) - 1)
            .ok_or_else(|| invalid("row count overflows"))?;
        Ok(Self {
            sheet,
            start_col: col,
            start_row,
            end_col: col,
            end_row,
        })
    }

    /// Zero-based grid offset of the first row, `None` for the invalid row 0.
    pub(crate) fn first_row_offset(&self) -> Option<usize> {
        (self.start_row as usize).checked_sub(1)
    }

    pub fn is_column(&self) -> bool {
        self.start_col == self.end_col
    }

    pub fn row_count(&self) -> u32 {
        self.end_row.saturating_sub(self.start_row) + 1
    }

    pub fn col_count(&self) -> u32 {
        self.end_col.saturating_sub(self.start_col) + 1
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs_quotes = self
            .sheet
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && c != '_');
        if needs_quotes {
            write!(f, "'{}'!", self.sheet.replace('\'', "''"))?;
        } else {
            write!(f, "{}!", self.sheet)?;
        }
        write!(
            f,
            "{}{}:{}{}",
            column_letters(self.start_col),
            self.start_row,
            column_letters(self.end_col),
            self.end_row
        )
    }
}

impl FromStr for A1Range {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &'static str| SheetError::InvalidRange {
            range: s.to_string(),
            reason,
        };

        let (sheet, cells) = s.rsplit_once('!').ok_or_else(|| invalid("missing sheet name"))?;
        let sheet = match sheet.strip_prefix('\'').and_then(|q| q.strip_suffix('\'')) {
            Some(quoted) => quoted.replace("''", "'"),
            None => sheet.to_string(),
        };
        if sheet.is_empty() {
            return Err(invalid("missing sheet name"));
        }

        let (start, end) = cells.split_once(':').unwrap_or((cells, cells));
        let (start_col, start_row) = parse_cell(start).ok_or_else(|| invalid("bad start cell"))?;
        let (end_col, end_row) = parse_cell(end).ok_or_else(|| invalid("bad end cell"))?;
        if end_col < start_col || end_row < start_row {
            return Err(invalid("end precedes start"));
        }

        Ok(Self {
            sheet,
            start_col,
            start_row,
            end_col,
            end_row,
        })
    }
}

fn parse_cell(cell: &str) -> Option<(u32, u32)> {
    let split = cell.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell.split_at(split);
    let col = column_index(letters)?;
    let row: u32 = digits.parse().ok()?;
    (row >= 1).then_some((col, row))
}

/// Zero-based index of a column label (`A` = 0, `Z` = 25, `AA` = 26).
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut n: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n - 1)
}

/// Column label for a zero-based index.
pub fn column_letters(index: u32) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
