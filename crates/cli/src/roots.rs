use orchestrator::{CatalogSource, Error};
use std::path::PathBuf;
use tracing::debug;

/// Library roots from configured patterns. Plain entries are taken as-is;
/// entries with glob metacharacters expand to the directories they match.
#[derive(Debug, Clone, Default)]
pub struct GlobRoots {
    patterns: Vec<String>,
}

impl GlobRoots {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

impl CatalogSource for GlobRoots {
    fn library_roots(&self) -> Result<Vec<PathBuf>, Error> {
        let mut roots = Vec::new();
        for pattern in &self.patterns {
            if !is_glob(pattern) {
                roots.push(PathBuf::from(pattern));
                continue;
            }
            let paths = glob::glob(pattern)
                .map_err(|err| Error::CatalogSource(format!("bad pattern `{pattern}`: {err}")))?;
            // unreadable entries are skipped like unreadable roots
            let matched: Vec<PathBuf> = paths.flatten().filter(|path| path.is_dir()).collect();
            debug!(%pattern, matched = matched.len(), "expanded library root pattern");
            roots.extend(matched);
        }
        Ok(roots)
    }
}
