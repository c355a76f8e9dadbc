//! Common test utilities for assetpipe CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated project tree in a temp directory
//! - Assertion macros: `assert_built!`, `assert_not_built!`
//! - Fixtures: reusable source content

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
