//! Core types shared across errata crates
//!
//! Exceptions are classified once at the framework boundary into an
//! [`Exception`] value; everything downstream matches on its kind instead of
//! inspecting concrete error types.

#![allow(clippy::must_use_candidate)]

mod category;
pub mod codes;
mod error;
mod exception;
pub mod provider;
mod response;

pub use category::Category;
pub use codes::ApiCode;
pub use error::HttpError;
pub use exception::{Exception, ExceptionKind, FieldErrors};
pub use provider::{ConfigProvider, MessageLookup, ResponseBuilder};
pub use response::{DebugBlock, DebugTrace, Payload};
