//! Lightweight inline markup carried in report lines.
//!
//! The export collaborator renders or strips these wrappers; the engine only
//! produces them and uses them to detect section openers.

pub const BOLD_OPEN: &str = "<strong>";
pub const BOLD_CLOSE: &str = "</strong>";
pub const UNDERLINE_OPEN: &str = "<u>";
pub const UNDERLINE_CLOSE: &str = "</u>";

pub fn bold(text: &str) -> String {
    format!("{BOLD_OPEN}{text}{BOLD_CLOSE}")
}

pub fn underline(text: &str) -> String {
    format!("{UNDERLINE_OPEN}{text}{UNDERLINE_CLOSE}")
}

/// Label line for a marked section, e.g. `<strong>TECHNIQUE :</strong>`.
pub fn section_title(label: &str) -> String {
    bold(&format!("{label} :"))
}

/// A line opens a new paragraph when it starts with bold or underline markup.
pub fn opens_section(line: &str) -> bool {
    line.starts_with(BOLD_OPEN) || line.starts_with(UNDERLINE_OPEN)
}
