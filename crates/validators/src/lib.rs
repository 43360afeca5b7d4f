//! Ordered request-validation chain for the emulator.
//!
//! An inbound request description flows through a fixed, ordered list of
//! independent checks before any business logic runs. The first failing
//! check determines the reported error; the chain order is the vendor's
//! documented precedence, encoded once in [`VALIDATOR_CHAIN`].

mod chain;
mod checks;
mod config;
mod error;
mod request;

pub use auth::KeyFamily;
pub use chain::{run_chain, ValidationContext, Validator, VALIDATOR_CHAIN};
pub use config::ValidationConfig;
pub use error::{ResultCode, ValidationError};
pub use request::{EndpointTraits, RequestDescriptor};
