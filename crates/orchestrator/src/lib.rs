#![forbid(unsafe_code)]

pub mod catalog;
pub mod clock;
pub mod domain;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod observation;
pub mod sink;
pub mod tracker;

pub use catalog::{CatalogSource, GameCatalog, StaticRoots};
pub use clock::{Clock, SystemClock};
pub use engine::{ControlEvent, GameLogEngine, Services, TickReport};
pub use error::Error;
pub use matcher::GameMatcher;
pub use observation::{Scanner, SysinfoScanner};
pub use sink::SessionSink;
pub use tracker::{SessionTracker, Transitions};
