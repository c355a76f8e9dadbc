//! Domain Entities

mod output_file;
mod vendor_manifest;

pub use output_file::OutputFile;
pub use vendor_manifest::{ModuleEntry, VendorManifest};
