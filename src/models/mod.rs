pub mod job;
pub mod locator;
pub mod log_record;
pub mod portal;
pub mod status;

pub use job::{Job, LINK_UNAVAILABLE};
pub use locator::LocatorSpec;
pub use log_record::{LogRecord, LOG_FIELDS};
pub use portal::Portal;
pub use status::{ApplyStatus, BatchSummary};
