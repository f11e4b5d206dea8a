//! Sections and entries registered with a [`Changelog`](super::Changelog).

use ratatui::style::Color;

/// One bullet line of release notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Text shown after the bullet.
    pub text: String,
    /// Highlight color, or `None` to use the ambient text color.
    pub color: Option<Color>,
    /// Extra indent units applied when drawing (0 = top-level bullet).
    pub level: u16,
}

impl Entry {
    /// Create an uncolored entry.
    #[must_use]
    pub fn plain(text: impl Into<String>, level: u16) -> Self {
        Self {
            text: text.into(),
            color: None,
            level,
        }
    }

    /// Create an entry drawn in `color`.
    #[must_use]
    pub fn colored(text: impl Into<String>, level: u16, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            level,
        }
    }

    /// Whether the entry carries a highlight color.
    #[must_use]
    pub const fn is_highlight(&self) -> bool {
        self.color.is_some()
    }

    /// Append this entry as a quoted markdown line.
    pub(crate) fn write_markdown(&self, out: &mut String) {
        out.push_str("> ");
        if self.level > 0 {
            out.push('`');
            for _ in 0..self.level {
                out.push_str("    ");
            }
            out.push('`');
        }
        if self.is_highlight() {
            out.push_str("**");
        }
        out.push_str("- ");
        out.push_str(&self.text);
        if self.is_highlight() {
            out.push_str("**");
        }
        out.push('\n');
    }
}

/// One version's worth of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header title (usually the version).
    pub title: String,
    /// Entries in the order they were added.
    pub entries: Vec<Entry>,
}

impl Section {
    /// Create an empty section.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Format the section for pasting into a chat announcement.
    ///
    /// `timestamp` is rendered as a `<t:...>` tag so chat clients localize it.
    #[must_use]
    pub fn to_markdown(&self, timestamp: i64) -> String {
        let mut out = String::with_capacity(64 * (self.entries.len() + 1));
        out.push_str("**");
        out.push_str(&self.title);
        out.push_str(" notes, Update <t:");
        out.push_str(&timestamp.to_string());
        out.push_str(">**\n");

        for entry in &self.entries {
            entry.write_markdown(&mut out);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_plain_has_no_color() {
        let entry = Entry::plain("Fixed a crash", 0);
        assert!(!entry.is_highlight());
        assert_eq!(entry.level, 0);
    }

    #[test]
    fn test_entry_colored_is_highlight() {
        let entry = Entry::colored("Important", 1, Color::Red);
        assert!(entry.is_highlight());
        assert_eq!(entry.color, Some(Color::Red));
    }

    #[test]
    fn test_section_to_markdown_formats_every_entry_kind() {
        let mut section = Section::new("1.2.0");
        section.entries.push(Entry::plain("Plain line", 0));
        section
            .entries
            .push(Entry::colored("Loud line", 0, Color::Blue));
        section.entries.push(Entry::plain("Nested line", 1));
        section
            .entries
            .push(Entry::colored("Deep loud line", 2, Color::Blue));

        let text = section.to_markdown(1_700_000_000);
        assert_eq!(
            text,
            "**1.2.0 notes, Update <t:1700000000>**\n\
             > - Plain line\n\
             > **- Loud line**\n\
             > `    `- Nested line\n\
             > `        `**- Deep loud line**\n"
        );
    }

    #[test]
    fn test_section_to_markdown_empty_section_is_header_only() {
        let section = Section::new("0.1.0");
        assert_eq!(section.to_markdown(0), "**0.1.0 notes, Update <t:0>**\n");
    }
}
