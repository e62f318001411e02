pub mod config;
pub mod draft;
pub mod error;
pub mod readiness;
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;


pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::Session;
pub use state::{ReadySession, SessionPhase, SessionState};
