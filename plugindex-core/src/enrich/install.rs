//! Install method dispatch
//!
//! The primary language picks an installer; the installer decides what the
//! package locator looks like. Both are plain tables.

use crate::identity::MODULE_HOST;
use crate::record::InstallType;

/// Lower-cased primary language → installer
pub const INSTALL_TABLE: &[(&str, InstallType)] = &[
    ("python", InstallType::Pip),
    ("typescript", InstallType::Npm),
    ("javascript", InstallType::Npm),
    ("go", InstallType::Go),
];

/// Installer for a language; unknown or empty languages are manual
pub fn install_type_for(language: &str) -> InstallType {
    let language = language.to_lowercase();
    INSTALL_TABLE
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, install)| *install)
        .unwrap_or(InstallType::Manual)
}

impl InstallType {
    /// Package locator for an `owner/name` path
    pub fn locator(&self, repo_path: &str) -> String {
        match self {
            InstallType::Pip => repo_path.split('/').nth(1).unwrap_or_default().to_string(),
            InstallType::Npm => repo_path.to_string(),
            InstallType::Go => format!("{MODULE_HOST}/{repo_path}@latest"),
            InstallType::Manual => String::new(),
        }
    }
}

/// Installer and locator for a repository
pub fn detect(language: &str, repo_path: &str) -> (InstallType, String) {
    let install = install_type_for(language);
    (install, install.locator(repo_path))
}

/// The configured monorepo entry matching `repo_path`, if any
pub fn monorepo_for<'a>(repo_path: &str, monorepos: &'a [String]) -> Option<&'a str> {
    monorepos
        .iter()
        .find(|m| m.eq_ignore_ascii_case(repo_path))
        .map(String::as_str)
}
