pub mod auth_response;
pub mod pending_verification;
pub mod role;
pub mod route;
pub mod scan_response;
pub mod scan_stats;
pub mod scan_status;
pub mod ticket_data;
pub mod user_profile;
pub mod verification_stage;
