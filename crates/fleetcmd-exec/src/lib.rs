mod dispatch;
pub use dispatch::{DispatchConfig, Dispatcher};

mod task;
pub use task::run_target;
