#![forbid(unsafe_code)]

mod scanner;

pub use scanner::{Scanner, SysinfoScanner};
