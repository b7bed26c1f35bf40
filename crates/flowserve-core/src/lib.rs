//! Shared primitives for the Flowserve crates
//!
//! Domain crates describe their failures through [`HttpError`]; the gateway
//! turns them into [`ErrorResponse`] bodies without depending on each other.

#![allow(clippy::must_use_candidate)]

mod error;

pub use error::{ErrorDetail, ErrorResponse, HttpError};
