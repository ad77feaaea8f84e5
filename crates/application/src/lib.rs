//! Hearth DNS Application Layer
pub mod ports;
pub mod router;
pub mod use_cases;

pub use router::{QueryRouter, Route};
pub use use_cases::ResolveQueryUseCase;
