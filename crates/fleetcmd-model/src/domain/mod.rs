mod target;
pub use target::TargetId;

mod session;
pub use session::SessionId;

mod credentials;
pub use credentials::Credentials;

mod token;
pub use token::AuthToken;

mod timeout;
pub use timeout::{TimeoutPolicy, WireTimeout};

mod query;
pub use query::{TargetFilter, TargetQuery};
