//! Archive directory operations, split by concern.

mod copy;
mod dir;
mod list;
mod lock;
mod remove;
pub(crate) mod size;

pub use dir::ArchiveDir;
pub use list::is_bucket_name;
