//! Clean Use Case
//!
//! Deletes the previous outputs of one family (app or vendor) from the
//! build root, selected by that family's glob.

mod result;
mod use_case;

pub use result::CleanResult;
pub use use_case::CleanUseCase;
