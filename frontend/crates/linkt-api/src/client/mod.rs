pub(crate) mod api_client;
pub(crate) mod endpoint;
pub(crate) mod error;
pub(crate) mod requests;
