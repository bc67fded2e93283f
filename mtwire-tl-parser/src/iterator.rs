//! Iterator that drives [`crate::parse_tl_file`].

use std::str::FromStr;

use crate::errors::LineError;
use crate::tl::{Category, Definition};

pub(crate) struct TlIterator<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    /// Category applied to the next definition, switched by section markers.
    category: Category,
}

impl<'a> TlIterator<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            lines: src.lines().enumerate(),
            category: Category::Types,
        }
    }

    /// Any `---…` line is a section marker; only two of them change the category.
    fn handle_separator(&mut self, line: &str) -> bool {
        if !line.starts_with("---") {
            return false;
        }
        match line {
            "---functions---" => self.category = Category::Functions,
            "---types---"     => self.category = Category::Types,
            _ => {}
        }
        true
    }
}

impl<'a> Iterator for TlIterator<'a> {
    type Item = Result<Definition, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (idx, line) = self.lines.next()?;
            let trimmed = line.trim();

            // Skip blanks and comments
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if self.handle_separator(trimmed) {
                continue;
            }

            // One definition per line; the `;` terminator is optional
            let raw = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
            if raw.is_empty() {
                continue;
            }

            let result = Definition::from_str(raw)
                .map(|mut d| {
                    d.category = self.category;
                    d
                })
                .map_err(|error| LineError {
                    line: idx + 1,
                    text: trimmed.to_owned(),
                    error,
                });

            return Some(result);
        }
    }
}
