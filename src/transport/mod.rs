/// Filesystem helpers: JSON-lines reading and atomic writes.
pub mod fs;
