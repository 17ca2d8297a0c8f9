pub mod call_site;
pub mod record;
pub mod severity;

pub use call_site::CallSite;
pub use record::{current_thread_number, Clock, LogRecord};
pub use severity::Severity;
