//! In-memory worksheet model used by the template engine.
//!
//! Only what the engine needs is modelled: row numbers with their raw
//! attributes (height, row style), cells with their style index and value,
//! and merged ranges. Everything else in the package is copied verbatim.
//!
//! Inserting or removing rows moves merges and the A1 references inside
//! formulas the way Excel does: references at or below the insertion point
//! move down, and a range ending on a removed row shrinks. References
//! qualified with a sheet name are left alone.

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    /// Numeric literal kept exactly as written in the file.
    Number(String),
    Bool(bool),
    Formula {
        /// Formula text without the leading `=`.
        formula: String,
        /// Attributes of `<f>` other than the shared-formula ones (`t="array"`, `ref`, `ca`, ...).
        attrs: Vec<(String, String)>,
        cached: Option<String>,
        string_result: bool,
    },
    /// Styled cell without a value.
    Blank,
}

impl CellValue {
    /// Apply `rewrite` to the formula text and its `ref` range, if any.
    fn rewrite_formula(&mut self, rewrite: impl Fn(&str) -> String) {
        if let CellValue::Formula { formula, attrs, .. } = self {
            *formula = rewrite(formula);
            for (k, v) in attrs.iter_mut() {
                if k == "ref" {
                    *v = rewrite(v);
                }
            }
        }
    }

    /// Relative references move with the cell, as when a row is copied `drow` rows down.
    pub fn translate_rows(&mut self, drow: i64) {
        self.rewrite_formula(|f| translate_formula(f, drow, 0));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetCell {
    /// 0-based column index.
    pub col: u32,
    /// Index into the workbook's `cellXfs` table.
    pub style: Option<String>,
    pub value: CellValue,
}

impl SheetCell {
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based row number.
    pub number: u32,
    /// Raw `<row>` attributes except `r` and `spans` (ht, customHeight, s, ...).
    pub attrs: Vec<(String, String)>,
    pub cells: Vec<SheetCell>,
}

impl SheetRow {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            attrs: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn height(&self) -> Option<f64> {
        self.attr("ht").and_then(|h| h.parse().ok())
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.cells
            .iter()
            .any(|c| c.text().is_some_and(|t| t.contains(needle)))
    }

    pub fn cell(&self, col: u32) -> Option<&SheetCell> {
        self.cells.iter().find(|c| c.col == col)
    }
}

/// Rectangular merged range, 1-based rows and 0-based columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl MergeRange {
    pub fn is_single_row(&self, row: u32) -> bool {
        self.first_row == row && self.last_row == row
    }

    pub fn to_ref(&self) -> String {
        format!(
            "{}:{}",
            cell_ref(self.first_row, self.first_col),
            cell_ref(self.last_row, self.last_col)
        )
    }

    pub fn parse(r: &str) -> Option<Self> {
        let (a, b) = r.split_once(':')?;
        let (first_row, first_col) = parse_cell_ref(a)?;
        let (last_row, last_col) = parse_cell_ref(b)?;
        Some(Self {
            first_row,
            first_col,
            last_row,
            last_col,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Rows sorted by number; missing numbers are empty rows.
    pub rows: Vec<SheetRow>,
    pub merges: Vec<MergeRange>,
}

impl Sheet {
    pub fn row(&self, number: u32) -> Option<&SheetRow> {
        self.rows.iter().find(|r| r.number == number)
    }

    /// Text of the cell at (row, col), if that cell holds text.
    pub fn text_at(&self, row: u32, col: u32) -> Option<&str> {
        self.row(row)?.cell(col)?.text()
    }

    /// Every text value of a row in column order.
    pub fn row_texts(&self, number: u32) -> Vec<String> {
        self.row(number)
            .map(|r| {
                r.cells
                    .iter()
                    .filter_map(|c| c.text().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First row (top to bottom) with a text cell containing `needle`.
    pub fn find_row_containing(&self, needle: &str) -> Option<u32> {
        self.rows
            .iter()
            .find(|r| r.contains_text(needle))
            .map(|r| r.number)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.find_row_containing(needle).is_some()
    }

    pub fn text_cells_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.rows
            .iter_mut()
            .flat_map(|r| r.cells.iter_mut())
            .filter_map(|c| match &mut c.value {
                CellValue::Text(s) => Some(s),
                _ => None,
            })
    }

    /// Move every row and merge starting at or below `from` by `delta`.
    fn shift_from(&mut self, from: u32, delta: i64) {
        let shift = |n: u32| -> u32 {
            if n >= from {
                (n as i64 + delta).max(1) as u32
            } else {
                n
            }
        };

        for r in &mut self.rows {
            r.number = shift(r.number);
        }
        for m in &mut self.merges {
            m.first_row = shift(m.first_row);
            m.last_row = shift(m.last_row);
        }
        for c in self.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
            c.value.rewrite_formula(|f| shift_formula_rows(f, from, delta));
        }
    }

    /// Insert `row` at position `at`, pushing the existing row `at` and
    /// everything below it down by one.
    pub fn insert_row(&mut self, at: u32, mut row: SheetRow) {
        self.shift_from(at, 1);
        row.number = at;
        let pos = self
            .rows
            .iter()
            .position(|r| r.number > at)
            .unwrap_or(self.rows.len());
        self.rows.insert(pos, row);
    }

    /// Delete row `number` (and merges living only on it), pulling the rows
    /// below it up by one.
    pub fn remove_row(&mut self, number: u32) {
        self.rows.retain(|r| r.number != number);
        self.merges.retain(|m| !m.is_single_row(number));
        self.shift_from(number + 1, -1);
    }
}

/// Column index (0-based) to letters: 0 → "A", 27 → "AB".
pub fn col_letters(col: u32) -> String {
    let mut n = col + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_letters(col), row)
}

/// "B12" → (12, 1). `$` markers are ignored.
pub fn parse_cell_ref(r: &str) -> Option<(u32, u32)> {
    let r = r.replace('$', "");
    let split = r.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = r.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    let row: u32 = digits.parse().ok()?;
    Some((row, col - 1))
}

/// One A1 reference inside a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
    pub row_abs: bool,
    pub col_abs: bool,
}

impl CellRef {
    fn to_a1(self) -> String {
        format!(
            "{}{}{}{}",
            if self.col_abs { "$" } else { "" },
            col_letters(self.col),
            if self.row_abs { "$" } else { "" },
            self.row
        )
    }
}

/// `$AB$12` starting at byte `i`; returns the reference and the byte after it.
fn scan_ref(b: &[u8], i: usize) -> Option<(CellRef, usize)> {
    let mut j = i;
    let col_abs = b.get(j) == Some(&b'$');
    if col_abs {
        j += 1;
    }

    let letters_start = j;
    while j < b.len() && b[j].is_ascii_alphabetic() {
        j += 1;
    }
    let letters = &b[letters_start..j];
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let row_abs = b.get(j) == Some(&b'$');
    if row_abs {
        j += 1;
    }

    let digits_start = j;
    while j < b.len() && b[j].is_ascii_digit() {
        j += 1;
    }
    let row: u32 = std::str::from_utf8(&b[digits_start..j]).ok()?.parse().ok()?;
    if row == 0 {
        return None;
    }

    let col = letters
        .iter()
        .fold(0u32, |acc, ch| acc * 26 + (ch.to_ascii_uppercase() - b'A') as u32 + 1);

    Some((
        CellRef {
            row,
            col: col - 1,
            row_abs,
            col_abs,
        },
        j,
    ))
}

/// Rebuild `formula` with every same-sheet reference passed through `f`.
/// Ranges (`A1:B2`) are handed over as (start, Some(end)).
pub fn rewrite_refs(formula: &str, mut f: impl FnMut(&mut CellRef, Option<&mut CellRef>)) -> String {
    let b = formula.as_bytes();
    let mut out = String::with_capacity(formula.len());
    let mut copied = 0;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < b.len() {
        let c = b[i];
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        if c == b'"' || c == b'\'' {
            quote = Some(c);
            i += 1;
            continue;
        }

        let boundary = i == 0
            || !(b[i - 1].is_ascii_alphanumeric() || matches!(b[i - 1], b'_' | b'.' | b'!' | b'$'));
        if !boundary {
            i += 1;
            continue;
        }
        let Some((mut first, mut end)) = scan_ref(b, i) else {
            i += 1;
            continue;
        };

        let mut second = None;
        if b.get(end) == Some(&b':')
            && let Some((r, e)) = scan_ref(b, end + 1)
        {
            second = Some(r);
            end = e;
        }

        // Function names (LOG10), sheet names (Q1!A1) and defined names
        if b.get(end)
            .is_some_and(|&n| n.is_ascii_alphanumeric() || matches!(n, b'_' | b'(' | b'!' | b'.'))
        {
            i = end;
            continue;
        }

        out.push_str(&formula[copied..i]);
        f(&mut first, second.as_mut());
        out.push_str(&first.to_a1());
        if let Some(s) = second {
            out.push(':');
            out.push_str(&s.to_a1());
        }
        copied = end;
        i = end;
    }

    out.push_str(&formula[copied..]);
    out
}

/// References to rows at or below `from` move by `delta`. When rows are
/// removed (`delta < 0`) a range ending on one of them shrinks instead.
pub fn shift_formula_rows(formula: &str, from: u32, delta: i64) -> String {
    let moved = |n: u32| -> u32 {
        if n >= from {
            (n as i64 + delta).max(1) as u32
        } else {
            n
        }
    };
    let first_removed = from as i64 + delta;

    rewrite_refs(formula, |a, b| {
        if let Some(z) = b {
            let end_removed = delta < 0 && (z.row as i64) >= first_removed && z.row < from;
            if end_removed && (a.row as i64) < first_removed {
                z.row = (first_removed - 1) as u32;
            } else {
                z.row = moved(z.row);
            }
        }
        a.row = moved(a.row);
    })
}

/// Relative references move by (`drow`, `dcol`); `$`-anchored parts stay.
pub fn translate_formula(formula: &str, drow: i64, dcol: i64) -> String {
    let mv = |r: &mut CellRef| {
        if !r.row_abs {
            r.row = (r.row as i64 + drow).max(1) as u32;
        }
        if !r.col_abs {
            r.col = (r.col as i64 + dcol).max(0) as u32;
        }
    };
    rewrite_refs(formula, |a, b| {
        mv(a);
        if let Some(z) = b {
            mv(z);
        }
    })
}
