//! Session handling for the till HTTP API.
//!
//! This library provides the [`session::SessionService`] (registration,
//! authentication, token resolution and revocation), the authorization gate
//! middleware that turns a bearer token into a request [`ctx::Ctx`], and the
//! mapping from session errors to HTTP responses.

pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod prelude;
pub mod principal;
pub mod session;
