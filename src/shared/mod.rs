pub mod retry;
pub mod shutdown;

pub use retry::RetryPolicy;
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
