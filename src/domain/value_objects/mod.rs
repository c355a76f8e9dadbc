//! Domain Value Objects
//!
//! Immutable values identified by their content.

mod asset_glob;
mod category;
mod hash;
mod task_name;

pub use asset_glob::{
    to_slash, AssetGlob, GlobPartition, DEFAULT_APP_GLOB, DEFAULT_VENDOR_GLOB,
};
pub use category::{AssetCategory, AssetKind};
pub use hash::ContentHash;
pub use task_name::{TaskName, UnknownTask};
