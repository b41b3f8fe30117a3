//! Auth module: token lifecycle plus registration, layered as
//! domain / repository / service.
//!
//! The token service is stateless; there is no server-side revocation, so
//! logout only clears the client cookie and a still-valid token remains
//! accepted until natural expiry.

pub mod domain;
pub mod errors;
pub mod token;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
pub use token::{CookiePolicy, SameSitePolicy, TokenService};
