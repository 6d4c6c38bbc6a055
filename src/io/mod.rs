pub mod directory;
pub mod launch;
pub mod transfer;
pub mod worker;

pub use directory::{is_likely_binary, read_directory, ListingOptions};
pub use launch::{EntryLauncher, SystemLauncher};
pub use transfer::{transfer, unique_destination, TransferMode, TransferReport, TransferRequest};
pub use worker::{spawn_worker, IoCommand, IoResult};
