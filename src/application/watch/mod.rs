//! Watch Use Case
//!
//! Continuous rebuilds of the app subset:
//! - File system monitoring (via `notify` crate)
//! - Content-hash filtering (editor saves without changes are ignored)
//! - Debouncing (100ms default), one rebuild per batch
//! - Rebuilds run on the loop thread, so at most one is in flight
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(&ctx, WatchOptions::default());
//! use_case.start(running, |event| { ... }, |task_event| { ... })?;
//! ```

mod event;
mod use_case;


pub use event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
pub use use_case::WatchUseCase;
