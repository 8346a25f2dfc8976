//! A1 notation for addressing worksheet cells.
//!
//! The worksheet holds the header in row 1, so record `r` lives on sheet
//! row `r + 2`. Columns are lettered `A..Z, AA..AZ, ...`.

use crate::domain::table::CellWrite;

/// Sheet row holding the first record.
const FIRST_RECORD_ROW: usize = 2;

/// Letters for a zero-based column index: 0 -> `A`, 25 -> `Z`, 26 -> `AA`.
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Quote a worksheet name for use in a range, doubling embedded quotes.
pub fn quote_sheet(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// Range covering the whole worksheet starting at the header.
pub fn anchor_range(sheet: &str) -> String {
    format!("{}!A1", quote_sheet(sheet))
}

/// Range of the single cell a write targets.
pub fn cell_range(sheet: &str, write: &CellWrite) -> String {
    format!(
        "{}!{}{}",
        quote_sheet(sheet),
        column_letters(write.column),
        write.row + FIRST_RECORD_ROW
    )
}
