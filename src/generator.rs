//! Project generation from the template archive.
//!
//! A generation run selects the archive entries belonging to one build flavor
//! and template kind, substitutes naming tokens in their paths and in the
//! content of text files, and writes them below the work directory.

use cruet::Inflector;
use log::{debug, warn};
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::archive::{locate_archive, ArchiveEntry, TemplateArchive};
use crate::constants::{PORTLET_SUFFIX, TEXT_EXTENSIONS};
use crate::error::{Error, Result};
use crate::substitution::SubstitutionTable;
use crate::template::{BuildFlavor, TemplateKind};

/// Parameters of a single generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    /// Directory the project is written into; created when missing
    pub work_dir: PathBuf,
    pub template: TemplateKind,
    /// Build flavor; the generator default applies when unset
    pub build: Option<BuildFlavor>,
    /// Project name, the source of every derived naming token
    pub name: String,
    /// Main class name; defaults to the capitalized project name
    pub class_name: Option<String>,
    /// Fully qualified service name, required by `service` and `servicewrapper`
    pub service: Option<String>,
    /// Root package, required by `servicebuilder`
    pub package_name: Option<String>,
}

impl ProjectRequest {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(
        work_dir: P,
        template: TemplateKind,
        name: S,
    ) -> Self {
        Self {
            work_dir: work_dir.into(),
            template,
            build: None,
            name: name.into(),
            class_name: None,
            service: None,
            package_name: None,
        }
    }
}

/// A file written by a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    /// Whether tokens were substituted in the file content
    pub substituted: bool,
}

/// Result of a generation run that did not hit a hard failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated {
        files: Vec<GeneratedFile>,
        /// Entries left alone because the destination was up to date
        skipped: usize,
    },
    /// The request was refused before anything was written; the message is meant for the user
    Rejected(String),
}

/// Generates projects from a template archive.
#[derive(Debug, Clone)]
pub struct ProjectGenerator {
    archive: Option<PathBuf>,
    configured_archive: Option<PathBuf>,
    default_build: BuildFlavor,
    overwrite: bool,
}

impl Default for ProjectGenerator {
    fn default() -> Self {
        ProjectGenerator::new(None)
    }
}

impl ProjectGenerator {
    /// Creates a generator reading `archive`, or the archive found by
    /// [`locate_archive`] when `None`.
    pub fn new(archive: Option<PathBuf>) -> Self {
        Self {
            archive,
            configured_archive: None,
            default_build: BuildFlavor::default(),
            overwrite: true,
        }
    }

    /// Archive from the settings file. Used only when neither an explicit
    /// archive nor `BLADE_TEMPLATES` is given.
    pub fn with_configured_archive(mut self, archive: Option<PathBuf>) -> Self {
        self.configured_archive = archive;
        self
    }

    pub fn with_default_build(mut self, build: BuildFlavor) -> Self {
        self.default_build = build;
        self
    }

    /// When disabled, an existing destination is only replaced if it is older
    /// than the archive entry or the entry carries no timestamp.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Runs one generation.
    ///
    /// # Returns
    /// * `Outcome::Rejected` when the archive is missing or a parameter the
    ///   template kind needs is empty; no files are written in that case
    /// * `Outcome::Generated` with the written files otherwise
    ///
    /// # Errors
    /// * Any I/O failure while reading the archive or writing files. Files
    ///   written before the failure are left in place.
    pub fn generate(&self, request: &ProjectRequest) -> Result<Outcome> {
        let work_dir = absolute_path(&request.work_dir)?;
        fs::create_dir_all(&work_dir)
            .map_err(|e| Error::at_path("create directory", &work_dir, e))?;

        let Some(archive_path) = locate_archive(self.archive.as_deref(), self.configured_archive.as_deref()) else {
            return Ok(Outcome::Rejected("Cannot find templates".to_string()));
        };

        let build = request.build.unwrap_or(self.default_build);
        let kind = request.template;
        let filter = entry_filter(build, kind)?;

        let substitutions = match build_substitutions(request, build, &work_dir) {
            Ok(table) => table,
            Err(message) => return Ok(Outcome::Rejected(message)),
        };

        debug!(
            "Generating {} project '{}' ({}) into '{}'.",
            kind,
            request.name,
            build,
            work_dir.display()
        );

        let namespace = namespace_prefix(build, kind);
        let mut archive = TemplateArchive::open(&archive_path)?;
        let mut files = Vec::new();
        let mut skipped = 0;

        archive.for_each_entry(|entry| {
            if !filter.is_match(&entry.path) {
                debug!("Skipping entry outside of template: {}", entry.path);
                return Ok(());
            }

            let target = resolve_target_path(&entry.path, &namespace, &substitutions, &work_dir)?;
            if !should_write(&target, entry.mtime, self.overwrite) {
                debug!("Keeping up to date file: {}", target.display());
                skipped += 1;
                return Ok(());
            }

            let substituted = write_entry(&entry, &target, &substitutions)?;
            files.push(GeneratedFile { path: target, substituted });
            Ok(())
        })?;

        Ok(Outcome::Generated { files, skipped })
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| Error::at_path("resolve", path, e))
}

fn namespace_prefix(build: BuildFlavor, kind: TemplateKind) -> String {
    format!("{}/{}/", build, kind)
}

/// Builds the pattern selecting the archive entries of one template.
///
/// Accepted are entries below `<build>/<kind>/` and entries inside a
/// top-level dot-directory such as `.settings/`.
pub fn entry_filter(build: BuildFlavor, kind: TemplateKind) -> Result<Regex> {
    let pattern = format!(
        r"^(?:{}/{}/.*|\..+/.*)$",
        regex::escape(build.name()),
        regex::escape(kind.name())
    );
    Regex::new(&pattern).map_err(|e| Error::ConfigError(format!("invalid entry filter: {}", e)))
}

/// Capitalizes every word of `name`, dropping separators: `my-app` becomes `MyApp`.
pub fn capitalize(name: &str) -> String {
    name.to_pascal_case()
}

/// Builds the token table for `request`.
///
/// # Returns
/// * `Err(message)` when a parameter required by the template kind is
///   missing or empty
pub fn build_substitutions(
    request: &ProjectRequest,
    build: BuildFlavor,
    work_dir: &Path,
) -> std::result::Result<SubstitutionTable, String> {
    let kind = request.template;
    let name = request.name.as_str();
    let lower_name = name.to_lowercase();
    let package = lower_name.replace('-', ".");

    let mut subs = SubstitutionTable::new();
    subs.insert(format!("templates/{}/{}/", build, kind), "");
    subs.insert("_project_path_", work_dir.to_string_lossy());
    subs.insert("_name_", lower_name.as_str());
    subs.insert("_NAME_", capitalize(name));
    subs.insert("_package_path_", package.replace('.', "/"));
    subs.insert("_package_", package.as_str());

    let mut class_name = match request.class_name.as_deref() {
        Some(class_name) if !class_name.is_empty() => class_name.to_string(),
        _ => capitalize(name),
    };

    if kind.requires_service() {
        let service = request.service.as_deref().unwrap_or_default();
        if service.is_empty() {
            return Err(format!(
                "if type is {}, the fully qualified name of service must be \
                 specified after the service argument.",
                kind
            ));
        }
        let short = service.rsplit('.').next().unwrap_or(service);
        subs.insert("_SERVICE_FULL_", service);
        subs.insert("_SERVICE_SHORT_", short);
    }

    if kind == TemplateKind::ServiceBuilder {
        let root = request.package_name.as_deref().unwrap_or_default();
        if root.is_empty() {
            return Err(format!(
                "if type is {}, the name of the root package within which to \
                 create service builder classes must be specified.",
                kind
            ));
        }
        subs.insert("_package_", root);
        subs.insert("_api_", format!("{}.api", root));
        subs.insert("_svc_", format!("{}.svc", root));
        subs.insert("_web_", format!("{}.web", root));
        subs.insert("_portlet_", format!("{}.portlet", root));
        subs.insert("_portletpackage_", format!("{}/portlet", root.replace('.', "/")));
    }

    if kind.is_portlet() && !class_name.ends_with(PORTLET_SUFFIX) {
        class_name.push_str(PORTLET_SUFFIX);
    }

    let portlet_fqn = format!("{}_{}", package, class_name).replace('.', "_");
    subs.insert("_CLASSNAME_", class_name);
    subs.insert("_portlet_fqn_", portlet_fqn);

    Ok(subs)
}

/// Computes where an archive entry is written.
///
/// # Errors
/// * `Error::UnsafeEntryPath` if the substituted path is empty, absolute or
///   climbs out of `work_dir`
pub fn resolve_target_path(
    entry_path: &str,
    namespace: &str,
    substitutions: &SubstitutionTable,
    work_dir: &Path,
) -> Result<PathBuf> {
    let processed = substitutions.apply(entry_path);
    let relative = processed.strip_prefix(namespace).unwrap_or(&processed);

    let unsafe_path = || Error::UnsafeEntryPath {
        entry: entry_path.to_string(),
        target: relative.to_string(),
    };
    if relative.is_empty() {
        return Err(unsafe_path());
    }
    let mut normal_components = 0;
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(_) => normal_components += 1,
            Component::CurDir => {}
            _ => return Err(unsafe_path()),
        }
    }
    if normal_components == 0 {
        return Err(unsafe_path());
    }

    Ok(work_dir.join(relative))
}

/// Decides whether an entry replaces the file at `target`.
pub fn should_write(target: &Path, entry_mtime: u64, overwrite: bool) -> bool {
    if overwrite || entry_mtime == 0 {
        return true;
    }
    match fs::metadata(target).and_then(|m| m.modified()) {
        Ok(modified) => modified
            .duration_since(UNIX_EPOCH)
            .map(|age| age.as_secs() < entry_mtime)
            .unwrap_or(true),
        Err(_) => true,
    }
}

/// Whether the file name ends in one of the text extensions.
///
/// The extension is everything from the last dot, so `.project` counts.
pub fn is_text_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rfind('.').map(|dot| &name[dot..]))
        .is_some_and(|extension| TEXT_EXTENSIONS.contains(&extension))
}

/// Writes one entry and returns whether its content was substituted.
fn write_entry(
    entry: &ArchiveEntry,
    target: &Path,
    substitutions: &SubstitutionTable,
) -> Result<bool> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::at_path("create directory", parent, e))?;
    }

    let rendered = if is_text_file(target) {
        match std::str::from_utf8(&entry.data) {
            Ok(content) => {
                let processed = substitutions.apply(content);
                (processed != content).then_some(processed)
            }
            Err(_) => {
                warn!("Not substituting tokens in non UTF-8 file '{}'", target.display());
                None
            }
        }
    } else {
        None
    };

    let substituted = rendered.is_some();
    let bytes = rendered.map(String::into_bytes).unwrap_or_else(|| entry.data.clone());
    fs::write(target, bytes).map_err(|e| Error::at_path("write", target, e))?;

    if substituted {
        debug!("Writing file: {}", target.display());
    } else {
        debug!("Copying file: {}", target.display());
    }
    Ok(substituted)
}
