pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::auth_response::AuthResponse;
pub use models::pending_verification::PendingVerification;
pub use models::role::Role;
pub use models::route::Route;
pub use models::scan_response::{DEFAULT_SCAN_FAILURE_MESSAGE, ScanResponse};
pub use models::scan_stats::ScanStats;
pub use models::scan_status::ScanStatus;
pub use models::ticket_data::TicketData;
pub use models::user_profile::UserProfile;
pub use models::verification_stage::VerificationStage;
