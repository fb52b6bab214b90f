//! Formatting utilities used for CLI outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// Colour used when printing a schedule code in the terminal grid.
pub fn describe_code(code: &str) -> &'static str {
    match code {
        "" => super::colors::GREY,
        "OFF" => super::colors::RED,
        "HOL-OFF" | "HOLIDAY" => super::colors::MAGENTA,
        "WFH" => super::colors::CYAN,
        c if c.contains('-') => super::colors::GREEN,
        _ => super::colors::YELLOW,
    }
}
