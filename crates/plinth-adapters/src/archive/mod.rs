//! Backup archive adapters.

mod zip;

pub use self::zip::ZipArchiver;
