//! Filesystem side of batch folder processing

mod dispatch;
mod fs;
pub mod monitor;
mod output;
mod processor;
mod relocator;
mod scanner;

pub use dispatch::RewriteDispatcher;
pub use fs::{file_timestamp, FILE_TIMESTAMP_FORMAT};
pub use monitor::{FolderMonitor, DEFAULT_MONITOR_INTERVAL_SECONDS};
pub use output::save_output_file;
pub use processor::BatchProcessor;
pub use relocator::FsRelocator;
pub use scanner::{scan_input_dir, DiscoveredFile};
