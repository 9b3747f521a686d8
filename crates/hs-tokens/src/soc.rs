//! Swatch archive (`.soc`) writer.
//!
//! The format is an XML color table:
//!
//! ```text
//! <ooo:color-table …namespaces…>
//!   <draw:color draw:name="Primary" draw:color="#3366ff"/>
//! </ooo:color-table>
//! ```
//!
//! Names are always XML-escaped. Sanitising is optional and only tidies
//! names for display.

use std::sync::LazyLock;

use hs_color::Color;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::merge::ProjectColorEntry;

/// Longest name kept by sanitising, in characters.
pub const MAX_NAME_CHARS: usize = 64;

const HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<ooo:color-table xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0""#,
    r#" xmlns:draw="urn:oasis:names:tc:opendocument:xmlns:drawing:1.0""#,
    r#" xmlns:xlink="http://www.w3.org/1999/xlink""#,
    r#" xmlns:svg="http://www.w3.org/2000/svg""#,
    r#" xmlns:ooo="http://openoffice.org/2004/office">"#,
    "\n",
);
const FOOTER: &str = "</ooo:color-table>\n";

static STRIP: LazyLock<Regex> = LazyLock::new(|| {
    // Control characters and angle brackets, but not whitespace.
    Regex::new(r"[[\p{Cc}<>]&&[^\s]]").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});
static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap_or_else(|e| unreachable!("static pattern: {e}")));

/// One swatch to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocEntry {
    pub name: String,
    pub hex: String,
}

impl From<&ProjectColorEntry> for SocEntry {
    fn from(entry: &ProjectColorEntry) -> Self {
        Self {
            name: entry.name.clone(),
            hex: entry.color.to_hex(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocOptions {
    pub sanitize_names: bool,
}

/// Render `entries` as a `.soc` document.
///
/// # Errors
///
/// [`crate::Error::Color`] if any entry's hex is malformed.
pub fn generate_soc(entries: &[SocEntry], options: SocOptions) -> Result<String> {
    let mut out = String::with_capacity(HEADER.len() + FOOTER.len() + entries.len() * 64);
    out.push_str(HEADER);
    for (i, entry) in entries.iter().enumerate() {
        let color = Color::hex(&entry.hex)?;
        let name = if options.sanitize_names {
            sanitize_name(&entry.name, i + 1)
        } else {
            entry.name.clone()
        };
        out.push_str(&format!(
            "  <draw:color draw:name=\"{}\" draw:color=\"{color}\"/>\n",
            escape_xml(&name)
        ));
    }
    out.push_str(FOOTER);
    Ok(out)
}

/// Escape the five XML special characters.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Tidy a swatch name: drop control and markup characters, collapse
/// whitespace, cap the length. Empty results become `Color {position}`.
#[must_use]
pub fn sanitize_name(name: &str, position: usize) -> String {
    let stripped = STRIP.replace_all(name, "");
    let collapsed = SPACES.replace_all(&stripped, " ");
    let trimmed: String = collapsed.trim().chars().take(MAX_NAME_CHARS).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        format!("Color {position}")
    } else {
        trimmed.to_owned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
