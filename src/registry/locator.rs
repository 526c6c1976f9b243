use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// File name the OpenXR SDK ships its registry under.
pub const REGISTRY_FILE_NAME: &str = "xr.xml";

#[derive(Debug, Clone)]
enum Candidate {
    /// Recursive scan of a build-output directory for a vendor-fetched copy
    /// of the registry (the fetched SDK unpacks under an `openxr-src` path).
    BuildTree(PathBuf),
    /// A fixed path that either exists or does not.
    Fixed(PathBuf),
}

/// Ordered search over the places a registry document can live. Stateless:
/// the candidate list is fixed at construction and [`locate`](Self::locate)
/// returns the first hit, or `None` once every candidate is exhausted.
#[derive(Debug, Clone)]
pub struct RegistryLocator {
    candidates: Vec<Candidate>,
}

impl RegistryLocator {
    /// Default search order for a project rooted at `project_root`: the build
    /// tree first, then the vendored SDK checkouts, then system installs.
    pub fn new(project_root: &Path) -> Self {
        let registry_suffix = Path::new("specification")
            .join("registry")
            .join(REGISTRY_FILE_NAME);

        RegistryLocator {
            candidates: vec![
                Candidate::BuildTree(project_root.join("build")),
                Candidate::Fixed(
                    project_root
                        .join("external")
                        .join("OpenXR-SDK")
                        .join(&registry_suffix),
                ),
                Candidate::Fixed(
                    project_root
                        .join("external")
                        .join("OpenXR-SDK-Source")
                        .join(&registry_suffix),
                ),
                Candidate::Fixed(PathBuf::from("/usr/share/openxr/registry/xr.xml")),
                Candidate::Fixed(PathBuf::from("/usr/local/share/openxr/registry/xr.xml")),
            ],
        }
    }

    /// Search over an explicit list of fixed paths, in order.
    pub fn from_candidates(paths: Vec<PathBuf>) -> Self {
        RegistryLocator {
            candidates: paths.into_iter().map(Candidate::Fixed).collect(),
        }
    }

    /// First candidate that exists on disk, unchanged; `None` when all
    /// candidates are exhausted. Never raises.
    pub fn locate(&self) -> Option<PathBuf> {
        for candidate in &self.candidates {
            match candidate {
                Candidate::BuildTree(dir) => {
                    if let Some(found) = scan_build_tree(dir) {
                        debug!("registry found in build tree: {}", found.display());
                        return Some(found);
                    }
                }
                Candidate::Fixed(path) => {
                    if path.is_file() {
                        debug!("registry found: {}", path.display());
                        return Some(path.clone());
                    }
                }
            }
        }
        None
    }

    /// The attempted search order, for not-found reports.
    pub fn attempted(&self) -> Vec<String> {
        self.candidates
            .iter()
            .map(|candidate| match candidate {
                Candidate::BuildTree(dir) => {
                    format!("{}/**/openxr-src/**/{REGISTRY_FILE_NAME}", dir.display())
                }
                Candidate::Fixed(path) => path.display().to_string(),
            })
            .collect()
    }
}

fn scan_build_tree(dir: &Path) -> Option<PathBuf> {
    if !dir.is_dir() {
        return None;
    }
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_file()
                && entry.file_name() == REGISTRY_FILE_NAME
                && entry.path().to_string_lossy().contains("openxr-src")
        })
        .map(|entry| entry.into_path())
}
