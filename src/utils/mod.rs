//! # Utils Module
//!
//! Injected capabilities: file access and randomness. Both are traits so a
//! game session can run against the real filesystem and entropy, or against
//! in-memory files and a scripted number sequence under test.

pub mod files;
pub mod random;

pub use files::*;
pub use random::*;
