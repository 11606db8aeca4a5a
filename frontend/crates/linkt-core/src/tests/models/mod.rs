mod auth_response;
mod role;
mod scan_response;
mod verification_stage;
