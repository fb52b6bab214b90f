//! Reading and writing `.xlsx` packages around a single worksheet.
//!
//! The package is buffered fully in memory. The first worksheet of the
//! workbook is parsed into a [`Sheet`]; on save only that worksheet's
//! `<sheetData>` (and `<mergeCells>`) is regenerated, every other part is
//! copied byte for byte so styles, themes and column widths survive.

use crate::errors::{AppError, AppResult};
use crate::report::sheet::{CellValue, MergeRange, Sheet, SheetCell, SheetRow, cell_ref, translate_formula};
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const CALC_CHAIN_PART: &str = "xl/calcChain.xml";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

#[derive(Debug, Clone)]
pub struct XlsxPackage {
    parts: Vec<(String, Vec<u8>)>,
    sheet_path: String,
    /// Worksheet XML before `<sheetData>` (without `<dimension>`).
    sheet_head: String,
    /// Worksheet XML after `</sheetData>`.
    sheet_tail: String,
    pub sheet: Sheet,
}

impl XlsxPackage {
    pub fn read(bytes: &[u8]) -> AppResult<Self> {
        let parts = unzip(bytes)?;

        let sheet_path = first_sheet_path(&parts)?;
        let shared = match part(&parts, SHARED_STRINGS_PART) {
            Some(xml) => parse_shared_strings(&as_utf8(xml, SHARED_STRINGS_PART)?)?,
            None => Vec::new(),
        };

        let sheet_xml = part(&parts, &sheet_path)
            .ok_or_else(|| AppError::Template(format!("worksheet part {sheet_path} is missing")))?;
        let sheet_xml = as_utf8(sheet_xml, &sheet_path)?;

        let (head, body, tail) = split_sheet_data(&sheet_xml)?;
        let rows = parse_sheet_data(body, &shared)?;
        let merges = parse_merges(tail);

        let dimension = Regex::new(r"<dimension[^>]*/>").map_err(|e| AppError::Other(e.to_string()))?;
        let sheet_head = dimension.replace(head, "").into_owned();

        Ok(Self {
            parts,
            sheet_path,
            sheet_head,
            sheet_tail: tail.to_string(),
            sheet: Sheet { rows, merges },
        })
    }

    pub fn sheet_path(&self) -> &str {
        &self.sheet_path
    }

    /// Serialize the package with the current worksheet content.
    pub fn to_bytes(&self) -> AppResult<Vec<u8>> {
        let sheet_xml = format!(
            "{}{}{}",
            self.sheet_head,
            write_sheet_data(&self.sheet.rows),
            write_merges(&self.sheet_tail, &self.sheet.merges)?
        );

        let calc_chain_ref = Regex::new(r#"<(Override|Relationship)\b[^>]*calcChain[^>]*/>"#)
            .map_err(|e| AppError::Other(e.to_string()))?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, data) in &self.parts {
            if name == CALC_CHAIN_PART {
                continue;
            }

            zip.start_file(name.clone(), options)?;

            if *name == self.sheet_path {
                zip.write_all(sheet_xml.as_bytes())?;
            } else if name == CONTENT_TYPES_PART || name == WORKBOOK_RELS_PART {
                let xml = as_utf8(data, name)?;
                zip.write_all(calc_chain_ref.replace_all(&xml, "").as_bytes())?;
            } else {
                zip.write_all(data)?;
            }
        }

        Ok(zip.finish()?.into_inner())
    }
}

fn unzip(bytes: &[u8]) -> AppResult<Vec<(String, Vec<u8>)>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut parts = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        parts.push((name, data));
    }

    Ok(parts)
}

fn part<'a>(parts: &'a [(String, Vec<u8>)], name: &str) -> Option<&'a [u8]> {
    parts
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, d)| d.as_slice())
}

fn as_utf8(data: &[u8], name: &str) -> AppResult<String> {
    String::from_utf8(data.to_vec())
        .map_err(|_| AppError::Template(format!("{name} is not valid UTF-8")))
}

fn attr(e: &BytesStart, key: &[u8]) -> AppResult<Option<String>> {
    for a in e.attributes() {
        let a = a?;
        if a.key.as_ref() == key {
            return Ok(Some(a.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Resolve the part name of the first worksheet declared in the workbook.
fn first_sheet_path(parts: &[(String, Vec<u8>)]) -> AppResult<String> {
    let workbook = part(parts, WORKBOOK_PART)
        .ok_or_else(|| AppError::Template("not an xlsx workbook (xl/workbook.xml missing)".into()))?;
    let workbook = as_utf8(workbook, WORKBOOK_PART)?;

    let mut rel_id = None;
    let mut reader = Reader::from_str(&workbook);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                rel_id = attr(&e, b"r:id")?;
                break;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    let rel_id = rel_id.ok_or_else(|| AppError::Template("workbook declares no worksheet".into()))?;

    let rels = part(parts, WORKBOOK_RELS_PART)
        .ok_or_else(|| AppError::Template("workbook relationships are missing".into()))?;
    let rels = as_utf8(rels, WORKBOOK_RELS_PART)?;

    let mut reader = Reader::from_str(&rels);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if attr(&e, b"Id")?.as_deref() == Some(rel_id.as_str()) {
                    let target = attr(&e, b"Target")?.unwrap_or_default();
                    return Ok(match target.strip_prefix('/') {
                        Some(abs) => abs.to_string(),
                        None => format!("xl/{target}"),
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Err(AppError::Template(format!(
        "worksheet relationship {rel_id} not found"
    )))
}

/// Every `<si>` entry flattened to plain text (rich-text runs are joined).
fn parse_shared_strings(xml: &str) -> AppResult<Vec<String>> {
    let mut out = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_phonetic = false;

    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" => in_text = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => out.push(String::new()),
            Event::Text(t) if in_text && !in_phonetic => {
                if let Some(s) = current.as_mut() {
                    s.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => out.push(current.take().unwrap_or_default()),
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

/// Split worksheet XML into (before, sheetData body, after).
fn split_sheet_data(xml: &str) -> AppResult<(&str, &str, &str)> {
    let start = xml
        .find("<sheetData")
        .ok_or_else(|| AppError::Template("worksheet has no <sheetData>".into()))?;

    if let Some(rel) = xml[start..].find("/>")
        && !xml[start..start + rel].contains('>')
    {
        let end = start + rel + 2;
        return Ok((&xml[..start], "", &xml[end..]));
    }

    let close = "</sheetData>";
    let end = xml[start..]
        .find(close)
        .map(|i| start + i + close.len())
        .ok_or_else(|| AppError::Template("unterminated <sheetData>".into()))?;

    Ok((&xml[..start], &xml[start..end], &xml[end..]))
}

#[derive(Default)]
struct PendingCell {
    col: u32,
    style: Option<String>,
    kind: Option<String>,
    value: Option<String>,
    formula: Option<String>,
    formula_attrs: Vec<(String, String)>,
    inline: Option<String>,
}

impl PendingCell {
    fn finish(self, shared: &[String]) -> AppResult<SheetCell> {
        let value = match (self.kind.as_deref(), self.formula) {
            (Some("s"), _) => {
                let raw = self.value.unwrap_or_default();
                let idx: usize = raw
                    .trim()
                    .parse()
                    .map_err(|_| AppError::Template(format!("bad shared string index '{raw}'")))?;
                let s = shared.get(idx).cloned().ok_or_else(|| {
                    AppError::Template(format!("shared string {idx} out of range"))
                })?;
                CellValue::Text(s)
            }
            (Some("inlineStr"), _) => CellValue::Text(self.inline.unwrap_or_default()),
            (Some("b"), None) => CellValue::Bool(self.value.as_deref().map(str::trim) == Some("1")),
            (kind, Some(formula)) => CellValue::Formula {
                formula,
                attrs: self.formula_attrs,
                cached: self.value,
                string_result: kind == Some("str"),
            },
            (Some("str") | Some("e"), None) => CellValue::Text(self.value.unwrap_or_default()),
            (_, None) => match self.value {
                Some(v) => CellValue::Number(v),
                None => CellValue::Blank,
            },
        };

        Ok(SheetCell {
            col: self.col,
            style: self.style,
            value,
        })
    }
}

#[derive(Clone, Copy, PartialEq)]
enum TextTarget {
    None,
    Value,
    Formula,
    Inline,
}

fn start_row(e: &BytesStart, last_number: u32) -> AppResult<SheetRow> {
    let mut row = SheetRow::new(last_number + 1);

    for a in e.attributes() {
        let a = a?;
        let key = String::from_utf8_lossy(a.key.as_ref()).into_owned();
        let value = a.unescape_value()?.into_owned();
        match key.as_str() {
            "r" => {
                row.number = value
                    .parse()
                    .map_err(|_| AppError::Template(format!("bad row number '{value}'")))?;
            }
            "spans" => {}
            _ => row.attrs.push((key, value)),
        }
    }

    Ok(row)
}

fn all_attrs(e: &BytesStart) -> AppResult<Vec<(String, String)>> {
    let mut out = Vec::new();
    for a in e.attributes() {
        let a = a?;
        let key = String::from_utf8_lossy(a.key.as_ref()).into_owned();
        out.push((key, a.unescape_value()?.into_owned()));
    }
    Ok(out)
}

fn start_formula(cell: &mut PendingCell, e: &BytesStart) -> AppResult<()> {
    cell.formula.get_or_insert_with(String::new);
    cell.formula_attrs = all_attrs(e)?;
    Ok(())
}

fn start_cell(e: &BytesStart, last_col: Option<u32>) -> AppResult<PendingCell> {
    let col = match attr(e, b"r")? {
        Some(r) => {
            crate::report::sheet::parse_cell_ref(&r)
                .ok_or_else(|| AppError::Template(format!("bad cell reference '{r}'")))?
                .1
        }
        None => last_col.map(|c| c + 1).unwrap_or(0),
    };

    Ok(PendingCell {
        col,
        style: attr(e, b"s")?,
        kind: attr(e, b"t")?,
        ..Default::default()
    })
}

fn parse_sheet_data(body: &str, shared: &[String]) -> AppResult<Vec<SheetRow>> {
    let mut rows: Vec<SheetRow> = Vec::new();
    let mut row: Option<SheetRow> = None;
    let mut cell: Option<PendingCell> = None;
    let mut target = TextTarget::None;
    let mut last_number = 0;

    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row = Some(start_row(&e, last_number)?),
                b"c" => {
                    let last_col = row.as_ref().and_then(|r| r.cells.last()).map(|c| c.col);
                    cell = Some(start_cell(&e, last_col)?);
                }
                b"v" => target = TextTarget::Value,
                b"f" => {
                    target = TextTarget::Formula;
                    if let Some(c) = cell.as_mut() {
                        start_formula(c, &e)?;
                    }
                }
                b"t" if cell.is_some() => target = TextTarget::Inline,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => {
                    let r = start_row(&e, last_number)?;
                    last_number = r.number;
                    rows.push(r);
                }
                b"c" => {
                    let last_col = row.as_ref().and_then(|r| r.cells.last()).map(|c| c.col);
                    let pending = start_cell(&e, last_col)?;
                    if let Some(r) = row.as_mut() {
                        r.cells.push(pending.finish(shared)?);
                    }
                }
                b"f" => {
                    if let Some(c) = cell.as_mut() {
                        start_formula(c, &e)?;
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if let Some(c) = cell.as_mut() {
                    let text = t.unescape()?;
                    let slot = match target {
                        TextTarget::Value => &mut c.value,
                        TextTarget::Formula => &mut c.formula,
                        TextTarget::Inline => &mut c.inline,
                        TextTarget::None => continue,
                    };
                    slot.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(r) = row.take() {
                        last_number = r.number;
                        rows.push(r);
                    }
                }
                b"c" => {
                    if let (Some(pending), Some(r)) = (cell.take(), row.as_mut()) {
                        r.cells.push(pending.finish(shared)?);
                    }
                }
                b"v" | b"f" | b"t" => target = TextTarget::None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    rows.sort_by_key(|r| r.number);
    unshare_formulas(&mut rows);
    Ok(rows)
}

fn is_shared(attrs: &[(String, String)]) -> bool {
    attrs.iter().any(|(k, v)| k == "t" && v == "shared")
}

fn shared_index(attrs: &[(String, String)]) -> Option<&str> {
    attrs
        .iter()
        .find(|(k, _)| k == "si")
        .map(|(_, v)| v.as_str())
}

/// Give every shared-formula cell its own formula text.
///
/// A shared group is one master cell with the text plus dependents that
/// only carry the group index; dependents get the master's text moved by
/// their offset. Rows are inserted and removed later, which a shared
/// group's `ref` range cannot follow.
fn unshare_formulas(rows: &mut [SheetRow]) {
    let mut masters: HashMap<String, (u32, u32, String)> = HashMap::new();
    for r in rows.iter() {
        for c in &r.cells {
            if let CellValue::Formula { formula, attrs, .. } = &c.value
                && is_shared(attrs)
                && !formula.is_empty()
                && let Some(si) = shared_index(attrs)
            {
                masters
                    .entry(si.to_string())
                    .or_insert((r.number, c.col, formula.clone()));
            }
        }
    }

    for r in rows.iter_mut() {
        let number = r.number;
        for c in &mut r.cells {
            let CellValue::Formula {
                formula,
                attrs,
                cached,
                ..
            } = &mut c.value
            else {
                continue;
            };
            if !is_shared(attrs) {
                continue;
            }

            if formula.is_empty()
                && let Some((row, col, text)) = shared_index(attrs).and_then(|si| masters.get(si))
            {
                *formula = translate_formula(text, number as i64 - *row as i64, c.col as i64 - *col as i64);
            }
            attrs.retain(|(k, _)| !matches!(k.as_str(), "t" | "ref" | "si"));

            // Orphaned dependent: keep the last computed value
            if formula.is_empty() {
                let fallback = match cached.take() {
                    Some(v) => CellValue::Number(v),
                    None => CellValue::Blank,
                };
                c.value = fallback;
            }
        }
    }
}

fn parse_merges(tail: &str) -> Vec<MergeRange> {
    let Ok(re) = Regex::new(r#"<mergeCell\s+ref="([^"]+)"\s*/>"#) else {
        return Vec::new();
    };
    re.captures_iter(tail)
        .filter_map(|c| MergeRange::parse(&c[1]))
        .collect()
}

fn write_merges(tail: &str, merges: &[MergeRange]) -> AppResult<String> {
    let block = Regex::new(r"(?s)<mergeCells\b.*?</mergeCells>|<mergeCells\b[^>]*/>")
        .map_err(|e| AppError::Other(e.to_string()))?;

    if !block.is_match(tail) && merges.is_empty() {
        return Ok(tail.to_string());
    }

    let mut xml = String::new();
    if !merges.is_empty() {
        xml.push_str(&format!("<mergeCells count=\"{}\">", merges.len()));
        for m in merges {
            xml.push_str(&format!("<mergeCell ref=\"{}\"/>", m.to_ref()));
        }
        xml.push_str("</mergeCells>");
    }

    if block.is_match(tail) {
        return Ok(block.replace(tail, xml.as_str()).into_owned());
    }

    // Must precede pageMargins and the other trailing elements.
    Ok(format!("{xml}{tail}"))
}

fn write_sheet_data(rows: &[SheetRow]) -> String {
    let mut out = String::from("<sheetData>");

    for row in rows {
        out.push_str(&format!("<row r=\"{}\"", row.number));
        for (k, v) in &row.attrs {
            out.push_str(&format!(" {}=\"{}\"", k, escape(v)));
        }

        if row.cells.is_empty() {
            out.push_str("/>");
            continue;
        }
        out.push('>');

        for c in &row.cells {
            write_cell(&mut out, row.number, c);
        }
        out.push_str("</row>");
    }

    out.push_str("</sheetData>");
    out
}

fn write_cell(out: &mut String, row: u32, c: &SheetCell) {
    let mut open = format!("<c r=\"{}\"", cell_ref(row, c.col));
    if let Some(s) = &c.style {
        open.push_str(&format!(" s=\"{}\"", escape(s)));
    }

    match &c.value {
        CellValue::Text(s) => {
            out.push_str(&format!(
                "{open} t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                escape(s)
            ));
        }
        CellValue::Number(n) => {
            out.push_str(&format!("{open}><v>{}</v></c>", escape(n)));
        }
        CellValue::Bool(b) => {
            out.push_str(&format!("{open} t=\"b\"><v>{}</v></c>", if *b { 1 } else { 0 }));
        }
        CellValue::Formula {
            formula,
            attrs,
            cached,
            string_result,
        } => {
            if *string_result {
                open.push_str(" t=\"str\"");
            }
            out.push_str(&format!("{open}><f"));
            for (k, v) in attrs {
                out.push_str(&format!(" {}=\"{}\"", k, escape(v)));
            }
            out.push_str(&format!(">{}</f>", escape(formula)));
            if let Some(v) = cached {
                out.push_str(&format!("<v>{}</v>", escape(v)));
            }
            out.push_str("</c>");
        }
        CellValue::Blank => {
            out.push_str(&format!("{open}/>"));
        }
    }
}
