mod logs;
mod metrics;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status, SyncMetrics};
pub use self::shutdown::shutdown_signal;
