// Funkeys Event Handling
// Raw events, output batches and the driver loop

pub mod batch;
pub mod r#loop;
pub mod raw;

pub use batch::EventBatch;
pub use r#loop::{Clock, Driver, DriverError, DriverResult, DriverStats, MonotonicClock, Step};
pub use raw::{EventType, RawEvent, ENTER_SCAN_CODE, MSC_SCAN, SYN_DROPPED, SYN_REPORT};
