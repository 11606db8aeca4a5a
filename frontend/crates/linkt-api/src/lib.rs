//! Outbound gateway to the Linkt REST backend.
//!
//! Every call goes through [`ApiClient`], which attaches the current
//! session's bearer token and turns a 401 on a post-login endpoint into a
//! forced logout. [`AuthFlow`] drives the login and verification screens
//! on top of it.

pub(crate) mod auth;
pub(crate) mod client;
pub(crate) mod navigator;


pub use auth::{
    auth_flow::{AuthFlow, LoginOutcome},
    error::{AuthError, Result as AuthResult},
    verification_prompt::{CODE_LENGTH, VerificationPrompt},
};
pub use client::{
    api_client::ApiClient,
    endpoint::{Endpoint, RequestAuth},
    error::{ApiError, Result as ApiResult},
    requests::{LoginRequest, RegisterRequest},
};
pub use navigator::{Navigator, NoopNavigator, RecordingNavigator};
