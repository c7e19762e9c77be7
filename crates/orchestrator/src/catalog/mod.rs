#![forbid(unsafe_code)]

mod library;
mod path;
mod source;

pub use library::{GameCatalog, InstalledGame};
pub use source::{CatalogSource, StaticRoots};
