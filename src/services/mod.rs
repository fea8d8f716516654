pub mod delay;
pub mod element_locator;
pub mod job_search;
pub mod result_log;
pub mod selectors;

pub use delay::{delay, settle, DelayRange};
pub use job_search::JobSearch;
pub use result_log::{CsvResultLog, ResultSink};
pub use selectors::PortalSelectors;
