//! Package share directory resolution against the ament resource index

use std::collections::{BTreeSet, HashMap};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Environment variable listing the install prefixes to search
pub const AMENT_PREFIX_PATH: &str = "AMENT_PREFIX_PATH";

/// Marker directory holding one file per installed package
const PACKAGES_RESOURCE_DIR: &str = "share/ament_index/resource_index/packages";

/// Maps a package name to its installed share directory
pub trait PackageIndex {
    fn share_directory(&self, package: &str) -> Result<PathBuf, IndexError>;
}

/// Fixed in-memory index
impl PackageIndex for HashMap<String, PathBuf> {
    fn share_directory(&self, package: &str) -> Result<PathBuf, IndexError> {
        validate_package_name(package)?;
        self.get(package)
            .cloned()
            .ok_or_else(|| IndexError::PackageNotFound(package.to_string()))
    }
}

/// Ament resource index over an ordered list of install prefixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmentIndex {
    prefixes: Vec<PathBuf>,
}

impl AmentIndex {
    /// Create an index over explicit prefixes (earlier prefixes win)
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the index from `AMENT_PREFIX_PATH`
    pub fn from_env() -> Result<Self, IndexError> {
        let value = std::env::var_os(AMENT_PREFIX_PATH).ok_or(IndexError::PrefixPathUnset)?;
        Self::from_prefix_path(&value)
    }

    /// Build the index from a path-separator delimited prefix list
    pub fn from_prefix_path(value: &OsStr) -> Result<Self, IndexError> {
        let prefixes: Vec<PathBuf> = std::env::split_paths(value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();

        if prefixes.is_empty() {
            return Err(IndexError::PrefixPathUnset);
        }

        Ok(Self { prefixes })
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// Install prefix that registers `package`, if any
    pub fn prefix_of(&self, package: &str) -> Result<Option<&Path>, IndexError> {
        validate_package_name(package)?;
        Ok(self
            .prefixes
            .iter()
            .find(|prefix| prefix.join(PACKAGES_RESOURCE_DIR).join(package).is_file())
            .map(PathBuf::as_path))
    }

    /// All registered packages across prefixes, sorted
    pub fn packages(&self) -> Result<Vec<String>, IndexError> {
        let mut packages = BTreeSet::new();

        for prefix in &self.prefixes {
            let dir = prefix.join(PACKAGES_RESOURCE_DIR);
            if !dir.is_dir() {
                continue;
            }

            let entries = std::fs::read_dir(&dir).map_err(|e| IndexError::Io {
                path: dir.display().to_string(),
                source: e,
            })?;

            for entry in entries {
                let entry = entry.map_err(|e| IndexError::Io {
                    path: dir.display().to_string(),
                    source: e,
                })?;
                let name = entry.file_name().to_string_lossy().into_owned();
                // Skip hidden files
                if !name.starts_with('.') {
                    packages.insert(name);
                }
            }
        }

        Ok(packages.into_iter().collect())
    }
}

impl PackageIndex for AmentIndex {
    fn share_directory(&self, package: &str) -> Result<PathBuf, IndexError> {
        match self.prefix_of(package)? {
            Some(prefix) => {
                let share = prefix.join("share").join(package);
                log::debug!("Resolved package '{}' to {}", package, share.display());
                Ok(share)
            }
            None => Err(IndexError::PackageNotFound(package.to_string())),
        }
    }
}

fn validate_package_name(package: &str) -> Result<(), IndexError> {
    if package.is_empty()
        || package == "."
        || package == ".."
        || package.contains(['/', '\\'])
    {
        return Err(IndexError::InvalidPackageName(package.to_string()));
    }
    Ok(())
}

/// Errors that can occur when resolving packages
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("AMENT_PREFIX_PATH is not set or empty. Did you source the workspace setup script?")]
    PrefixPathUnset,

    #[error("Invalid package name: '{0}'")]
    InvalidPackageName(String),

    #[error("Package '{0}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound(String),

    #[error("Failed to read resource index '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
