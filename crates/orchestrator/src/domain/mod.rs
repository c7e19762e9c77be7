#![forbid(unsafe_code)]

mod candidate;
mod process;
mod session;

pub use candidate::GameCandidate;
pub use process::{ProcessEntry, ProcessSnapshot};
pub(crate) use session::iso8601;
pub use session::{Session, SessionRecord, duration_minutes};
