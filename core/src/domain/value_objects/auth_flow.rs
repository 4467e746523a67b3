//! Sign-in / sign-up / verify-code form flow.
//!
//! Models the client-side form as a state machine so the transitions the UI
//! relies on can be checked without a browser.

use thiserror::Error;

use fit_shared::validation::is_numeric_code;

use crate::domain::entities::verification_record::CODE_LENGTH;
use crate::errors::ValidationError;

const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFlowState {
    SignIn,
    SignUp,
    VerifyCode { email: String },
    Authenticated { redirect_to: String },
}

/// Why a password sign-in attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInFailure {
    /// Account exists but its email was never confirmed
    Unconfirmed,
    InvalidCredentials,
    Other,
}

impl SignInFailure {
    /// Maps an identity-service error message to a failure kind
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("email not confirmed") {
            SignInFailure::Unconfirmed
        } else if message.contains("invalid login credentials") {
            SignInFailure::InvalidCredentials
        } else {
            SignInFailure::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFlowEvent {
    /// `email` is the address typed into the sign-in form
    SignInFailed { email: String, reason: SignInFailure },
    SignInSucceeded,
    SignUpSucceeded { email: String },
    CodeVerified,
    Toggle,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFlowError {
    #[error("Event {event} is not valid in state {state}")]
    InvalidTransition { state: String, event: String },
}

impl AuthFlowState {
    /// Applies an event, returning the next state
    pub fn transition(self, event: AuthFlowEvent) -> Result<AuthFlowState, AuthFlowError> {
        use AuthFlowEvent as E;
        use AuthFlowState as S;

        match (self, event) {
            (S::SignIn, E::SignInFailed { email, reason: SignInFailure::Unconfirmed }) => {
                Ok(S::VerifyCode { email })
            }
            (S::SignIn, E::SignInFailed { .. }) => Ok(S::SignIn),
            (S::SignIn, E::SignInSucceeded) => Ok(S::Authenticated {
                redirect_to: HOME_PATH.to_string(),
            }),
            (S::SignUp, E::SignUpSucceeded { email }) => Ok(S::VerifyCode { email }),
            (S::VerifyCode { .. }, E::CodeVerified) => Ok(S::Authenticated {
                redirect_to: HOME_PATH.to_string(),
            }),
            (S::SignIn, E::Toggle) => Ok(S::SignUp),
            (S::SignUp, E::Toggle) | (S::VerifyCode { .. }, E::Toggle) => Ok(S::SignIn),
            (state, event) => Err(AuthFlowError::InvalidTransition {
                state: format!("{:?}", state),
                event: format!("{:?}", event),
            }),
        }
    }

    /// Email shown on the verification form
    pub fn pending_email(&self) -> Option<&str> {
        match self {
            AuthFlowState::VerifyCode { email } => Some(email),
            _ => None,
        }
    }
}

/// Rejects anything but exactly four ASCII digits before a verify call
pub fn check_code_input(code: &str) -> Result<(), ValidationError> {
    if is_numeric_code(code, CODE_LENGTH) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCodeFormat {
            expected_length: CODE_LENGTH,
        })
    }
}
