//! REST API client module for the inventory server.
//!
//! This module provides the `ApiClient` for communicating with the
//! inventory API: login, session refresh, the current user, shops, items
//! and bulk inventory submission.
//!
//! Requests carry the stored access token as a bearer credential. A 401
//! triggers one serialized refresh and a single retry of the request.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ApiClient, LoginResponse};
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
