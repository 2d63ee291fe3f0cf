//! Parsing of the inline `<strong>` / `<u>` wrappers found in report lines.

use proforma_report::markup::{BOLD_CLOSE, BOLD_OPEN, UNDERLINE_CLOSE, UNDERLINE_OPEN};

/// A run of text sharing one formatting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
}

/// Split one line into formatted segments.
///
/// Tags may nest. Unclosed tags run to the end of the line; stray closing
/// tags are dropped. Anything that is not one of the four known tags is
/// plain text.
pub fn parse_line(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut bold = false;
    let mut underline = false;
    let mut current = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        let tag = [
            (BOLD_OPEN, Some(true), None),
            (BOLD_CLOSE, Some(false), None),
            (UNDERLINE_OPEN, None, Some(true)),
            (UNDERLINE_CLOSE, None, Some(false)),
        ]
        .into_iter()
        .find(|(tag, _, _)| rest.starts_with(tag));

        match tag {
            Some((tag, set_bold, set_underline)) => {
                if !current.is_empty() {
                    segments.push(Segment {
                        text: std::mem::take(&mut current),
                        bold,
                        underline,
                    });
                }
                bold = set_bold.unwrap_or(bold);
                underline = set_underline.unwrap_or(underline);
                rest = &rest[tag.len()..];
            }
            None => {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    current.push(c);
                }
                rest = chars.as_str();
            }
        }
    }

    if !current.is_empty() {
        segments.push(Segment {
            text: current,
            bold,
            underline,
        });
    }
    segments
}

/// Remove all markup, keeping line structure. Used for plain-text clipboard
/// export.
pub fn strip_markup(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            parse_line(line)
                .into_iter()
                .map(|segment| segment.text)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
