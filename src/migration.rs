//! Source migration rules.
//! A rule pairs a problem description with the deprecated API prefixes that
//! reveal it; finding the references is left to a [`SourceScanner`].

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// One reference to a deprecated API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// Byte offset of the match start within the line
    pub start: usize,
    /// Byte offset one past the match end within the line
    pub end: usize,
    /// The matched qualified name
    pub symbol: String,
}

/// Finds API references in one source file.
pub trait SourceScanner {
    /// Returns every reference to a name starting with one of `prefixes`.
    fn find_service_apis(&self, prefixes: &[&str]) -> Vec<SearchResult>;
}

fn qualified_name() -> &'static Regex {
    static QUALIFIED_NAME: OnceLock<Regex> = OnceLock::new();
    QUALIFIED_NAME.get_or_init(|| {
        Regex::new(r"[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)+").expect("static pattern is valid")
    })
}

/// Line based scanner over a Java, JSP or JSPF file.
///
/// It matches dotted names textually, so references inside comments and
/// string literals are reported too.
#[derive(Debug, Clone)]
pub struct JavaSourceFile {
    path: PathBuf,
    content: String,
}

impl JavaSourceFile {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, content: S) -> Self {
        Self { path: path.into(), content: content.into() }
    }

    /// Reads `path`; invalid UTF-8 sequences are replaced rather than rejected.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::at_path("read", path, e))?;
        Ok(Self::new(path, String::from_utf8_lossy(&bytes)))
    }

}

impl SourceScanner for JavaSourceFile {
    fn find_service_apis(&self, prefixes: &[&str]) -> Vec<SearchResult> {
        let mut results = Vec::new();
        for (index, line) in self.content.lines().enumerate() {
            for found in qualified_name().find_iter(line) {
                let symbol = found.as_str();
                if prefixes.iter().any(|prefix| symbol.starts_with(prefix)) {
                    results.push(SearchResult {
                        file: self.path.clone(),
                        line: index + 1,
                        start: found.start(),
                        end: found.end(),
                        symbol: symbol.to_string(),
                    });
                }
            }
        }
        results
    }
}

/// A migration rule and the problem it reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRule {
    pub id: &'static str,
    /// Extensions without the leading dot
    pub extensions: &'static [&'static str],
    pub title: &'static str,
    pub summary: &'static str,
    pub tickets: &'static str,
    pub section: &'static str,
    pub prefixes: &'static [&'static str],
}

impl MigrationRule {
    /// Runs the rule against one file.
    pub fn analyze(&self, scanner: &dyn SourceScanner) -> Vec<SearchResult> {
        scanner.find_service_apis(self.prefixes)
    }

    fn globs(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for extension in self.extensions {
            let glob = Glob::new(&format!("*.{}", extension)).map_err(|e| {
                Error::ConfigError(format!("rule {} has an invalid extension: {}", self.id, e))
            })?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| Error::ConfigError(format!("rule {} loading failed: {}", self.id, e)))
    }
}

/// Lock services moved out of portal-service in 7.0.
pub const LOCK_LEGACY_API: MigrationRule = MigrationRule {
    id: "LockLegacyAPI",
    extensions: &["java", "jsp", "jspf"],
    title: "Lock APIs migrated to OSGi module",
    summary: "All Lock APIs previously exposed as Liferay Portal API in 6.2 have been \
              move out from portal-service into separate OSGi modules",
    tickets: "LPS-55791",
    section: "#legacy",
    prefixes: &["com.liferay.portal.service.Lock"],
};

/// Every rule shipped with blade.
pub fn builtin_rules() -> Vec<MigrationRule> {
    vec![LOCK_LEGACY_API]
}

/// A rule violation found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub rule: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub tickets: &'static str,
    pub section: &'static str,
    #[serde(flatten)]
    pub result: SearchResult,
}

impl Problem {
    fn new(rule: &MigrationRule, result: SearchResult) -> Self {
        Self {
            rule: rule.id,
            title: rule.title,
            summary: rule.summary,
            tickets: rule.tickets,
            section: rule.section,
            result,
        }
    }
}

/// Runs a set of rules over files and directory trees.
pub struct Migrator {
    rules: Vec<(MigrationRule, GlobSet)>,
}

impl Migrator {
    pub fn new(rules: Vec<MigrationRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|rule| rule.globs().map(|globs| (rule, globs)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Collects problems in `paths`; directories are searched recursively.
    pub fn run<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Problem>> {
        let mut problems = Vec::new();
        for root in paths {
            for entry in WalkDir::new(root.as_ref()).sort_by_file_name() {
                let entry = entry.map_err(|e| Error::IoError(e.into()))?;
                if entry.file_type().is_file() {
                    problems.extend(self.check_file(entry.path())?);
                }
            }
        }
        Ok(problems)
    }

    /// Checks one file against every rule that applies to it.
    pub fn check_file(&self, path: &Path) -> Result<Vec<Problem>> {
        let file_name = match path.file_name() {
            Some(name) => name,
            None => return Ok(Vec::new()),
        };

        let mut applicable =
            self.rules.iter().filter(|(_, globs)| globs.is_match(file_name)).peekable();
        if applicable.peek().is_none() {
            return Ok(Vec::new());
        }

        debug!("Scanning {}", path.display());
        let source = JavaSourceFile::read(path)?;
        Ok(applicable
            .flat_map(|(rule, _)| {
                rule.analyze(&source).into_iter().map(move |result| Problem::new(rule, result))
            })
            .collect())
    }
}
