pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::alerts::{AlertSink, LogAlertSink};
pub use app::relay::{CommandRelay, DispatchReceipt, RelayError};
pub use domain::{Alert, Command, Identity, RelayState, Session, SetupError, TxOptions};
pub use infra::ethereum;
