use linkt_core::Role;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account; a verification code is emailed afterwards
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone_number: String,
        #[arg(long)]
        password: String,
        /// student or organizer
        #[arg(long, default_value = "student")]
        role: Role,
        #[arg(long)]
        organization_name: Option<String>,
    },

    /// Confirm the email address with the emailed code
    VerifyEmail {
        #[arg(long)]
        code: String,
    },

    /// Finish signing in with the second-factor code
    #[command(name = "verify-2fa")]
    VerifyTwoFactor {
        #[arg(long)]
        code: String,
    },

    /// Abandon a verification in progress
    BackOut,

    /// Sign out and forget the stored session
    Logout,

    /// Show the current session state
    Whoami,

    /// Validate a scanned ticket code for an event
    Validate {
        #[arg(long)]
        event_id: i64,
        #[arg(long)]
        qr_code: String,
    },

    /// Show check-in counters for an event
    ScanStats {
        #[arg(long)]
        event_id: i64,
    },
}
