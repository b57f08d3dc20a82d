//! Git repository access
//!
//! Exactly the two-snapshots-plus-changed-paths contract the validators
//! consume: a manifest parsed out of a target revision's tree, and the file
//! paths changed between the merge base of two revisions and the source.

use std::path::{Path, PathBuf};

use git2::{Commit, Delta, DiffFindOptions, Repository};
use packtree_core::{Manifest, MANIFEST_FILE};
use tracing::debug;

use crate::changes::ChangedFile;
use crate::error::{Result, VcsError};

/// A project repository containing the manifest
pub struct ProjectRepo {
    repo: Repository,
    root_path: PathBuf,
}

impl std::fmt::Debug for ProjectRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectRepo")
            .field("root_path", &self.root_path)
            .finish_non_exhaustive()
    }
}

impl ProjectRepo {
    /// Open the repository at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening repository at: {}", path.display());
        let repo = Repository::open(path).map_err(|e| {
            debug!("Failed to open repository: {}", e);
            VcsError::RepositoryNotFound {
                path: path.display().to_string(),
            }
        })?;
        Self::from_repo(repo)
    }

    /// Discover the repository starting from the given path
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Discovering repository from: {}", path.display());
        let repo = Repository::discover(path).map_err(|e| {
            debug!("Failed to discover repository: {}", e);
            VcsError::RepositoryNotFound {
                path: path.display().to_string(),
            }
        })?;
        Self::from_repo(repo)
    }

    fn from_repo(repo: Repository) -> Result<Self> {
        let root_path = repo
            .workdir()
            .ok_or_else(|| VcsError::RepositoryNotFound {
                path: repo.path().display().to_string(),
            })?
            .to_path_buf();
        Ok(Self { repo, root_path })
    }

    /// Repository root path
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Parse the project manifest out of the given revision's tree
    pub fn manifest_at(&self, reference: &str) -> Result<Manifest> {
        let bytes = self.file_at(reference, MANIFEST_FILE)?;
        let text = String::from_utf8_lossy(&bytes);
        Manifest::from_json(&text).map_err(|source| VcsError::ManifestParse {
            reference: reference.to_string(),
            source,
        })
    }

    /// File paths changed between the merge base of `target`/`source` and
    /// `source`, with rename detection
    pub fn changed_files(&self, target: &str, source: &str) -> Result<Vec<ChangedFile>> {
        let target_commit = self.resolve_commit(target)?;
        let source_commit = self.resolve_commit(source)?;
        let base_oid = self.repo.merge_base(target_commit.id(), source_commit.id())?;
        let base_tree = self.repo.find_commit(base_oid)?.tree()?;
        let source_tree = source_commit.tree()?;

        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&base_tree), Some(&source_tree), None)?;
        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;

        let mut changes = Vec::new();
        for delta in diff.deltas() {
            let Some(path) = delta.new_file().path() else {
                continue;
            };
            let renamed_from = match delta.status() {
                Delta::Renamed => delta.old_file().path().map(Path::to_path_buf),
                _ => None,
            };
            changes.push(ChangedFile {
                path: path.to_path_buf(),
                renamed_from,
            });
        }
        debug!(
            "Found {} changed file(s) between {} and {}",
            changes.len(),
            target,
            source
        );
        Ok(changes)
    }

    fn resolve_commit(&self, reference: &str) -> Result<Commit<'_>> {
        let object = self
            .repo
            .revparse_single(reference)
            .map_err(|_| VcsError::UnknownRevision {
                reference: reference.to_string(),
            })?;
        object.peel_to_commit().map_err(|_| VcsError::UnknownRevision {
            reference: reference.to_string(),
        })
    }

    fn file_at(&self, reference: &str, file: &str) -> Result<Vec<u8>> {
        let commit = self.resolve_commit(reference)?;
        let tree = commit.tree()?;
        let entry = tree
            .get_path(Path::new(file))
            .map_err(|_| VcsError::ManifestNotFound {
                reference: reference.to_string(),
                file: file.to_string(),
            })?;
        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;
        Ok(blob.content().to_vec())
    }
}
