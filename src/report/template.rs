//! Placeholder substitution over a [`Sheet`].
//!
//! Two modes share the same global step:
//! - row expansion: one template row (found by an anchor token) is cloned
//!   once per data row and then removed;
//! - grid fill: indexed tokens (`{{employee_3}}`, `{{schedule_3_12}}`,
//!   `{{date_12}}`) are replaced in place.

use crate::errors::{AppError, AppResult};
use crate::report::sheet::{CellValue, Sheet};
use regex::Regex;
use std::collections::BTreeMap;

/// Token name (without braces) → replacement text.
pub type TokenMap = BTreeMap<String, String>;

/// Values for a grid report: employees down, days across.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridData {
    pub employees: Vec<String>,
    pub dates: Vec<String>,
    /// `cells[i][j]` is employee `i` on day `j`.
    pub cells: Vec<Vec<String>>,
}

pub fn token(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Replace every `{{name}}` of `tokens` found in `text`.
pub fn replace_tokens(text: &str, tokens: &TokenMap) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }
    tokens.iter().fold(text.to_string(), |acc, (name, value)| {
        acc.replace(&token(name), value)
    })
}

/// Step 1: literal replacement of global tokens in every text cell.
pub fn substitute_globals(sheet: &mut Sheet, globals: &TokenMap) {
    for text in sheet.text_cells_mut() {
        if text.contains("{{") {
            *text = replace_tokens(text, globals);
        }
    }
}

/// First row (top to bottom) holding the anchor token.
pub fn find_template_row(sheet: &Sheet, anchor: &str) -> AppResult<u32> {
    sheet
        .find_row_containing(anchor)
        .ok_or_else(|| AppError::TemplateAnchorMissing {
            anchor: anchor.to_string(),
        })
}

/// Steps 2-4: clone the anchor row once per entry of `rows`, in order,
/// then delete the original. Rows below move by `rows.len() - 1`.
/// Formulas in the clones behave as if the row had been copied down.
pub fn expand_rows(sheet: &mut Sheet, anchor: &str, rows: &[TokenMap]) -> AppResult<()> {
    let template_at = find_template_row(sheet, anchor)?;

    let snapshot = sheet
        .row(template_at)
        .cloned()
        .ok_or_else(|| AppError::Template(format!("row {template_at} vanished")))?;
    let row_merges: Vec<_> = sheet
        .merges
        .iter()
        .filter(|m| m.is_single_row(template_at))
        .copied()
        .collect();

    let mut at = template_at;
    for tokens in rows {
        let mut row = snapshot.clone();
        for cell in &mut row.cells {
            if let CellValue::Text(s) = &mut cell.value
                && s.contains("{{")
            {
                *s = replace_tokens(s, tokens);
            }
            cell.value.translate_rows((at - template_at) as i64);
        }

        sheet.insert_row(at, row);
        for m in &row_merges {
            let mut copy = *m;
            copy.first_row = at;
            copy.last_row = at;
            sheet.merges.push(copy);
        }
        at += 1;
    }

    sheet.remove_row(at);
    sheet
        .merges
        .sort_by_key(|m| (m.first_row, m.first_col));
    Ok(())
}

/// Grid substitution. Indices with no data become empty strings.
pub fn fill_grid(sheet: &mut Sheet, anchor: &str, grid: &GridData) -> AppResult<()> {
    find_template_row(sheet, anchor)?;

    let mut values = TokenMap::new();
    for (j, date) in grid.dates.iter().enumerate() {
        values.insert(format!("date_{j}"), date.clone());
    }
    for (i, name) in grid.employees.iter().enumerate() {
        values.insert(format!("employee_{i}"), name.clone());
        for j in 0..grid.dates.len() {
            let code = grid
                .cells
                .get(i)
                .and_then(|r| r.get(j))
                .cloned()
                .unwrap_or_default();
            values.insert(format!("schedule_{i}_{j}"), code);
        }
    }

    let indexed = Regex::new(r"\{\{((?:employee|date)_\d+|schedule_\d+_\d+)\}\}")
        .map_err(|e| AppError::Other(e.to_string()))?;

    for text in sheet.text_cells_mut() {
        if !text.contains("{{") {
            continue;
        }
        let replaced = indexed.replace_all(text, |caps: &regex::Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        });
        *text = replaced.into_owned();
    }

    Ok(())
}
