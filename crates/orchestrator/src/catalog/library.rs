#![forbid(unsafe_code)]

use super::path::PathKey;
use super::source::{CatalogSource, StaticRoots};
use crate::error::Error;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An installed game: a folder directly under a library root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstalledGame {
    pub name: String,
    pub root: PathBuf,
}

#[derive(Debug, Clone)]
struct LibraryRoot {
    path: PathBuf,
    key: PathKey,
}

/// Resolves executable paths to game names by their position under a known
/// library root.
pub struct GameCatalog {
    source: Box<dyn CatalogSource>,
    /// Sorted deepest first so nested roots win over their ancestors.
    roots: Vec<LibraryRoot>,
    games: BTreeSet<InstalledGame>,
}

impl std::fmt::Debug for GameCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameCatalog")
            .field("roots", &self.roots())
            .field("games", &self.games.len())
            .finish()
    }
}

impl GameCatalog {
    /// An empty catalog fed by `source`. Call [`GameCatalog::refresh`] to
    /// load it.
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Self {
            source,
            roots: Vec::new(),
            games: BTreeSet::new(),
        }
    }

    /// A catalog that trusts `roots` as-is without touching the filesystem.
    /// A later refresh re-reads them from disk.
    pub fn with_roots(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        let roots: Vec<PathBuf> = roots.into_iter().map(Into::into).collect();
        let mut catalog = Self::new(Box::new(StaticRoots(roots.clone())));
        catalog.set_roots(roots);
        catalog
    }

    /// Re-read the roots from the source and list the game folders under
    /// each. Roots that cannot be read are skipped.
    pub fn refresh(&mut self) -> Result<&BTreeSet<InstalledGame>, Error> {
        let requested = self.source.library_roots()?;
        let mut readable = Vec::new();
        let mut games = BTreeSet::new();

        for root in requested.into_iter().unique() {
            match list_game_folders(&root) {
                Ok(names) => {
                    debug!(root = %root.display(), games = names.len(), "library root scanned");
                    games.extend(names.into_iter().map(|name| InstalledGame {
                        name,
                        root: root.clone(),
                    }));
                    readable.push(root);
                }
                Err(err) => warn!(%err, "skipping library root"),
            }
        }

        self.set_roots(readable);
        self.games = games;
        Ok(&self.games)
    }

    /// The game that `exe_path` belongs to, or `None` when the path is not
    /// inside any known root.
    pub fn resolve(&self, exe_path: &Path) -> Option<String> {
        if self.roots.is_empty() {
            return None;
        }
        let key = PathKey::new(exe_path);
        self.roots
            .iter()
            .find_map(|root| key.child_of(&root.key))
            .map(str::to_owned)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn roots(&self) -> Vec<&Path> {
        self.roots.iter().map(|root| root.path.as_path()).collect()
    }

    /// Game folders found by the last refresh.
    pub fn games(&self) -> &BTreeSet<InstalledGame> {
        &self.games
    }

    fn set_roots(&mut self, roots: Vec<PathBuf>) {
        self.roots = roots
            .into_iter()
            .map(|path| LibraryRoot {
                key: PathKey::new(&path),
                path,
            })
            .sorted_by(|a, b| b.key.len().cmp(&a.key.len()))
            .collect();
    }
}

fn list_game_folders(root: &Path) -> Result<Vec<String>, Error> {
    let to_error = |source| Error::LibraryRoot {
        root: root.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(root).map_err(to_error)? {
        let entry = entry.map_err(to_error)?;
        if entry.file_type().map_err(to_error)?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}
