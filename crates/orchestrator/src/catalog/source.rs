#![forbid(unsafe_code)]

use crate::error::Error;
use std::path::PathBuf;

/// Supplies the library root directories. How they are discovered is up to
/// the implementation.
pub trait CatalogSource: Send + Sync {
    fn library_roots(&self) -> Result<Vec<PathBuf>, Error>;
}

/// A fixed list of roots.
#[derive(Debug, Clone, Default)]
pub struct StaticRoots(pub Vec<PathBuf>);

impl CatalogSource for StaticRoots {
    fn library_roots(&self) -> Result<Vec<PathBuf>, Error> {
        Ok(self.0.clone())
    }
}
