//! Project metadata reader
//!
//! File-presence queries and lazily parsed build manifests for one project
//! directory. Unreadable or malformed files read as absent.

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Build manifest kinds recognised in a project root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    Cargo,
    Pyproject,
    SetupPy,
    Npm,
    Requirements,
}

impl ManifestKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ManifestKind::Cargo => "Cargo.toml",
            ManifestKind::Pyproject => "pyproject.toml",
            ManifestKind::SetupPy => "setup.py",
            ManifestKind::Npm => "package.json",
            ManifestKind::Requirements => "requirements.txt",
        }
    }
}

/// Package identity fields common to the manifest formats
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackageInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
}

/// Summary of a project's layout, as consumed by checkers and reports
#[derive(Debug, Clone, Serialize)]
pub struct ProjectMetadata {
    pub build_manifest: Option<ManifestKind>,
    pub package: PackageInfo,
    pub has_tests: bool,
    pub has_ci_config: bool,
    pub has_docs: bool,
    pub has_readme: bool,
}

const SKIP_DIRS: &[&str] = &[
    ".git", "target", "node_modules", "venv", ".venv", ".tox", "build", "dist", "__pycache__",
];
pub const SOURCE_EXTENSIONS: &[&str] = &["rs", "py", "js", "ts", "go", "java", "c", "cpp", "h"];
const TEST_DIRS: &[&str] = &["tests", "test", "testing", "spec", "__tests__"];
const DOC_DIRS: &[&str] = &["docs", "doc", "documentation"];
pub const README_FILES: &[&str] = &["README.md", "README.rst", "README.txt", "README"];
pub const CI_PATHS: &[(&str, &str)] = &[
    (".github/workflows", "GitHub Actions"),
    (".gitlab-ci.yml", "GitLab CI"),
    (".travis.yml", "Travis CI"),
    ("azure-pipelines.yml", "Azure Pipelines"),
    (".circleci/config.yml", "CircleCI"),
    ("bitbucket-pipelines.yml", "Bitbucket Pipelines"),
];

/// A project directory under inspection
#[derive(Debug)]
pub struct Project {
    path: PathBuf,
    cargo: OnceCell<Option<toml::Table>>,
    pyproject: OnceCell<Option<toml::Table>>,
    package_json: OnceCell<Option<serde_json::Value>>,
    requirements: OnceCell<Vec<String>>,
}

impl Project {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cargo: OnceCell::new(),
            pyproject: OnceCell::new(),
            package_json: OnceCell::new(),
            requirements: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path.join(relative).exists()
    }

    pub fn is_dir(&self, relative: &str) -> bool {
        self.path.join(relative).is_dir()
    }

    /// Content of a file relative to the project root, if readable as UTF-8
    pub fn file_content(&self, relative: &str) -> Option<String> {
        let path = self.path.join(relative);
        if !path.is_file() {
            return None;
        }
        std::fs::read_to_string(path).ok()
    }

    pub fn cargo_manifest(&self) -> Option<&toml::Table> {
        self.cargo
            .get_or_init(|| self.read_toml("Cargo.toml"))
            .as_ref()
    }

    pub fn pyproject(&self) -> Option<&toml::Table> {
        self.pyproject
            .get_or_init(|| self.read_toml("pyproject.toml"))
            .as_ref()
    }

    pub fn package_json(&self) -> Option<&serde_json::Value> {
        self.package_json
            .get_or_init(|| {
                self.file_content("package.json")
                    .and_then(|content| serde_json::from_str(&content).ok())
            })
            .as_ref()
    }

    pub fn setup_py(&self) -> Option<String> {
        self.file_content("setup.py")
    }

    /// Non-empty, non-comment lines of requirements.txt
    pub fn requirements(&self) -> &[String] {
        self.requirements.get_or_init(|| {
            self.file_content("requirements.txt")
                .map(|content| {
                    content
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty() && !line.starts_with('#'))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    fn read_toml(&self, relative: &str) -> Option<toml::Table> {
        let content = self.file_content(relative)?;
        match content.parse::<toml::Table>() {
            Ok(table) => Some(table),
            Err(e) => {
                log::debug!("Ignoring malformed {} in {}: {}", relative, self.path.display(), e);
                None
            }
        }
    }

    /// The first build manifest found, in order of precedence
    pub fn build_manifest(&self) -> Option<ManifestKind> {
        [
            ManifestKind::Cargo,
            ManifestKind::Pyproject,
            ManifestKind::Npm,
            ManifestKind::SetupPy,
            ManifestKind::Requirements,
        ]
        .into_iter()
        .find(|kind| self.exists(kind.file_name()))
    }

    /// Name, version, description and license from whichever manifest declares them
    pub fn package_info(&self) -> PackageInfo {
        if let Some(package) = self.cargo_manifest().and_then(|m| m.get("package")) {
            return PackageInfo {
                name: toml_str(package, "name"),
                version: toml_str(package, "version"),
                description: toml_str(package, "description"),
                license: toml_str(package, "license").or_else(|| toml_str(package, "license-file")),
            };
        }
        if let Some(pyproject) = self.pyproject() {
            let section = pyproject.get("project").or_else(|| {
                pyproject
                    .get("tool")
                    .and_then(|tool| tool.get("poetry"))
            });
            if let Some(section) = section {
                let license = section.get("license").and_then(|l| {
                    l.as_str()
                        .map(str::to_string)
                        .or_else(|| l.get("text").and_then(|t| t.as_str()).map(str::to_string))
                });
                return PackageInfo {
                    name: toml_str(section, "name"),
                    version: toml_str(section, "version"),
                    description: toml_str(section, "description"),
                    license,
                };
            }
        }
        if let Some(package) = self.package_json() {
            let field = |key: &str| package.get(key).and_then(|v| v.as_str()).map(str::to_string);
            return PackageInfo {
                name: field("name"),
                version: field("version"),
                description: field("description"),
                license: field("license"),
            };
        }
        PackageInfo::default()
    }

    /// Files under the project root with one of the given extensions, relative
    /// to the root and sorted. Vendored and build output directories are skipped.
    pub fn files_with_extensions(&self, extensions: &[&str]) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| extensions.contains(&ext))
            })
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.path)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect();
        files.sort();
        files
    }

    pub fn source_files(&self) -> Vec<PathBuf> {
        self.files_with_extensions(SOURCE_EXTENSIONS)
    }

    pub fn has_tests(&self) -> bool {
        TEST_DIRS.iter().any(|dir| self.is_dir(dir))
    }

    pub fn has_docs(&self) -> bool {
        DOC_DIRS.iter().any(|dir| self.is_dir(dir))
    }

    pub fn has_readme(&self) -> bool {
        README_FILES.iter().any(|file| self.exists(file))
    }

    pub fn has_ci_config(&self) -> bool {
        CI_PATHS.iter().any(|(path, _)| self.exists(path))
    }

    pub fn metadata(&self) -> ProjectMetadata {
        ProjectMetadata {
            build_manifest: self.build_manifest(),
            package: self.package_info(),
            has_tests: self.has_tests(),
            has_ci_config: self.has_ci_config(),
            has_docs: self.has_docs(),
            has_readme: self.has_readme(),
        }
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

fn toml_str(table: &toml::Value, key: &str) -> Option<String> {
    table.get(key).and_then(|v| v.as_str()).map(str::to_string)
}
