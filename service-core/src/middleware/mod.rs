pub mod deadline;
pub mod metrics;
pub mod tracing;

pub use self::deadline::{Deadline, deadline_middleware};
pub use self::metrics::metrics_middleware;
pub use self::tracing::{REQUEST_ID_HEADER, request_id_middleware};
