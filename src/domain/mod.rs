//! Relay domain types: the identity that authorizes calls, the four commands, and the
//! session state machine that gates them.

pub mod command;
pub mod session;

pub use command::{Command, Identity, TxOptions};
pub use session::{Alert, RelayState, Session, SetupError};
