pub(crate) mod auth_flow;
pub(crate) mod error;
pub(crate) mod verification_prompt;
