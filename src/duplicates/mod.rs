//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Name + size grouping ([`groups`])
//! - The scan / report / remove driver ([`finder`])

pub mod finder;
pub mod groups;

pub use finder::DuplicateFinder;
pub use groups::{FileGroups, GroupKey, MIN_GROUP_SIZE};
