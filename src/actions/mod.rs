//! File actions module.
//!
//! Removal of redundant duplicate copies. The first member of each group is
//! always preserved.
//!
//! ```no_run
//! use dupseek::actions::delete::remove_duplicates;
//! use dupseek::duplicates::FileGroups;
//! use dupseek::scanner::OsFileSystem;
//!
//! let groups = FileGroups::new();
//! let summary = remove_duplicates(&OsFileSystem, &groups);
//! println!("{}", summary.summary());
//! ```

pub mod delete;

pub use delete::{remove_duplicates, remove_group_duplicates, DeleteError, RemovalSummary};
