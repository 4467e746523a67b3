pub mod verification;

pub use verification::{MockVerificationRepository, VerificationRepository};
