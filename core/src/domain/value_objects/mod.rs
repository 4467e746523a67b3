//! Value objects representing immutable domain concepts.

pub mod auth_flow;
pub mod callback;
pub mod notification;

// Re-export commonly used types
pub use auth_flow::{check_code_input, AuthFlowError, AuthFlowEvent, AuthFlowState, SignInFailure};
pub use callback::{sanitize_next, CallbackParams, CallbackRedirect};
pub use notification::{Issued, NotificationOutcome};
