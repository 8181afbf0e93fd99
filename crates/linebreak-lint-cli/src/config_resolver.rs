//! Locates the `linebreak-lint.toml` to use for a run.
//!
//! Lookup order:
//!
//! 1. `--config <FILE>`
//! 2. `linebreak-lint.toml` or `.linebreak-lint.toml` in the checked directory,
//!    then in each of its ancestors
//! 3. `config.toml` in the global directory (`$LINEBREAK_LINT_CONFIG_DIR`,
//!    else `~/.linebreak-lint/`)
//! 4. built-in defaults

use std::path::{Path, PathBuf};
use tracing::debug;

/// File names recognised in a project directory, most preferred first.
const PROJECT_FILES: [&str; 2] = ["linebreak-lint.toml", ".linebreak-lint.toml"];

const GLOBAL_FILE: &str = "config.toml";

/// Environment variable overriding the global config directory.
pub const CONFIG_DIR_ENV: &str = "LINEBREAK_LINT_CONFIG_DIR";

/// The configuration file chosen for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the checked directory or one of its ancestors.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Path of the file, unless defaults are in use.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Project(path) | Self::Global(path) => Some(path),
            Self::Default => None,
        }
    }

    /// Whether the file came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Resolves the configuration for a check of `start`.
#[must_use]
pub fn resolve(start: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(start, explicit, global_config_dir().as_deref())
}

fn resolve_with(start: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(path) = find_project_file(start) {
        debug!(path = %path.display(), "using project config");
        return ConfigSource::Project(path);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_FILE)) {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "using global config");
            ConfigSource::Global(path)
        }
        _ => ConfigSource::Default,
    }
}

fn find_project_file(start: &Path) -> Option<PathBuf> {
    let start = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());
    let first = if start.is_file() { start.parent()? } else { &start };
    first.ancestors().find_map(|dir| {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Global config directory: `$LINEBREAK_LINT_CONFIG_DIR`, else `~/.linebreak-lint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".linebreak-lint")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("linebreak-lint.toml"));
        let missing = tmp.path().join("missing.toml");

        assert_eq!(
            resolve_with(tmp.path(), Some(&missing), None),
            ConfigSource::Explicit(missing)
        );
    }

    #[test]
    fn plain_name_is_preferred_over_dotfile() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join(".linebreak-lint.toml"));
        assert_eq!(
            resolve_with(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".linebreak-lint.toml"))
        );

        touch(&tmp.path().join("linebreak-lint.toml"));
        assert_eq!(
            resolve_with(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("linebreak-lint.toml"))
        );
    }

    #[test]
    fn ancestors_are_searched() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("linebreak-lint.toml"));
        let file = tmp.path().join("src/lib/index.js");
        touch(&file);

        let expected = ConfigSource::Project(tmp.path().join("linebreak-lint.toml"));
        assert_eq!(resolve_with(&tmp.path().join("src/lib"), None, None), expected);
        assert_eq!(resolve_with(&file, None, None), expected);
    }

    #[test]
    fn nearest_project_file_wins() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("linebreak-lint.toml"));
        touch(&tmp.path().join("pkg/.linebreak-lint.toml"));

        assert_eq!(
            resolve_with(&tmp.path().join("pkg"), None, None),
            ConfigSource::Project(tmp.path().join("pkg/.linebreak-lint.toml"))
        );
    }

    #[test]
    fn global_is_a_fallback_only() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        assert_eq!(
            resolve_with(project.path(), None, Some(global.path())),
            ConfigSource::Default
        );

        touch(&global.path().join("config.toml"));
        let resolved = resolve_with(project.path(), None, Some(global.path()));
        assert!(resolved.is_global());
        assert_eq!(resolved.path(), Some(global.path().join("config.toml").as_path()));

        touch(&project.path().join("linebreak-lint.toml"));
        assert!(matches!(
            resolve_with(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn default_has_no_path() {
        assert_eq!(ConfigSource::Default.path(), None);
        assert!(!ConfigSource::Explicit(PathBuf::from("a.toml")).is_global());
    }
}
