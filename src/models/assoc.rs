//! File-type association table.
//!
//! Maps file-name patterns to the programs that can open them. The table is
//! declared as a TOML document:
//!
//! ```toml
//! [[filetype]]
//! patterns = ["*.tar.gz", "*.tgz"]
//! programs = ["tar -xf %f", "file-roller %f"]
//! ```
//!
//! Patterns are shell-style globs (`*`, `?`) matched against the whole file
//! name; they compile to anchored regular expressions at load time so a
//! malformed pattern is reported once instead of failing every lookup.

use regex::Regex;
use serde::Deserialize;

use crate::core::error::AssocError;
use crate::models::providers::OpenerSource;

#[derive(Debug, Deserialize)]
struct AssocDoc {
    #[serde(default, rename = "filetype")]
    filetypes: Vec<AssocEntry>,
}

#[derive(Debug, Deserialize)]
struct AssocEntry {
    patterns: Vec<String>,
    programs: Vec<String>,
}

struct CompiledEntry {
    matchers: Vec<Regex>,
    programs: Vec<String>,
}

/// Compiled association table; a read-only [`OpenerSource`].
#[derive(Default)]
pub struct Associations {
    entries: Vec<CompiledEntry>,
}

impl Associations {
    /// An empty table: every lookup yields no programs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and compile a TOML association document.
    pub fn from_toml_str(text: &str) -> Result<Self, AssocError> {
        let doc: AssocDoc = toml::from_str(text)?;
        let mut entries = Vec::with_capacity(doc.filetypes.len());
        for entry in doc.filetypes {
            let matchers = entry
                .patterns
                .iter()
                .map(|p| compile_glob(p))
                .collect::<Result<Vec<_>, _>>()?;
            entries.push(CompiledEntry {
                matchers,
                programs: entry.programs,
            });
        }
        Ok(Self { entries })
    }
}

impl OpenerSource for Associations {
    /// All program specifications whose pattern matches the file name, in
    /// declaration order.
    fn programs_for(&self, file_name: &str) -> Vec<String> {
        let mut programs = Vec::new();
        for entry in &self.entries {
            if entry.matchers.iter().any(|m| m.is_match(file_name)) {
                programs.extend(entry.programs.iter().cloned());
            }
        }
        programs
    }
}

/// Compile one glob pattern to an anchored regex.
fn compile_glob(pattern: &str) -> Result<Regex, AssocError> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for c in pattern.chars() {
        match c {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            c => expr.push_str(&regex::escape(&c.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr).map_err(|err| AssocError::BadPattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })
}
