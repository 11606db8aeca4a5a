use crate::{CliResult, Commands};

use std::sync::Arc;

use linkt_api::{ApiClient, AuthFlow, LoginOutcome, Navigator, RegisterRequest, VerificationPrompt};
use linkt_config::{ApiConfig, Config};
use linkt_core::{Route, VerificationStage};
use linkt_session::{FileStore, KeyValueStore, SessionState, SessionStore};
use log::debug;
use serde_json::{Value, json};

/// Logs where a GUI would have gone next
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        debug!("Next view: {route}");
    }
}

/// Session, gateway and auth flows wired together for one invocation
pub struct App {
    session: Arc<SessionStore>,
    api: Arc<ApiClient>,
    flow: AuthFlow,
}

impl App {
    /// Session persisted under the config directory
    pub fn from_config(config: &Config) -> CliResult<Self> {
        let storage = FileStore::open(config.session_dir()?)?;
        Self::with_storage(&config.api, storage)
    }

    pub fn with_storage(
        api_config: &ApiConfig,
        storage: impl KeyValueStore + 'static,
    ) -> CliResult<Self> {
        let session = Arc::new(SessionStore::rehydrate(storage)?);
        let api = Arc::new(ApiClient::new(
            api_config,
            session.clone(),
            Arc::new(LogNavigator),
        )?);

        Ok(Self {
            flow: AuthFlow::new(api.clone()),
            session,
            api,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

/// Run one command and return what to print
pub async fn run(command: Commands, app: &App) -> CliResult<Value> {
    match command {
        Commands::Login { email, password } => {
            let outcome = app.flow.login(email, password).await?;
            Ok(outcome_json(&outcome))
        }

        Commands::Register {
            first_name,
            last_name,
            email,
            phone_number,
            password,
            role,
            organization_name,
        } => {
            let outcome = app
                .flow
                .register(RegisterRequest {
                    first_name,
                    last_name,
                    email,
                    phone_number,
                    password,
                    user_type: role,
                    organization_name,
                })
                .await?;
            Ok(outcome_json(&outcome))
        }

        Commands::VerifyEmail { code } => {
            verify(app, VerificationStage::EmailVerification, &code).await
        }

        Commands::VerifyTwoFactor { code } => {
            verify(app, VerificationStage::SecondFactor, &code).await
        }

        Commands::BackOut => {
            app.flow.back_out()?;
            Ok(session_json(&app.session.snapshot()))
        }

        Commands::Logout => {
            app.flow.logout()?;
            Ok(session_json(&app.session.snapshot()))
        }

        Commands::Whoami => Ok(session_json(&app.session.snapshot())),

        Commands::Validate { event_id, qr_code } => {
            let response = app.api.validate_ticket(event_id, &qr_code).await?;
            Ok(serde_json::to_value(response)?)
        }

        Commands::ScanStats { event_id } => {
            let stats = app.api.scan_stats(event_id).await?;
            Ok(serde_json::to_value(stats)?)
        }
    }
}

async fn verify(app: &App, stage: VerificationStage, code: &str) -> CliResult<Value> {
    let mut prompt = VerificationPrompt::new(stage);
    prompt.submit(&app.flow, code).await?;
    Ok(session_json(&app.session.snapshot()))
}

fn outcome_json(outcome: &LoginOutcome) -> Value {
    match outcome {
        LoginOutcome::Authenticated(user) => json!({
            "state": "authenticated",
            "user": user,
        }),
        LoginOutcome::VerificationRequired(pending) => json!({
            "state": "pending_verification",
            "email": pending.email,
            "stage": pending.stage,
        }),
    }
}

/// Session as JSON. The token is never printed.
fn session_json(state: &SessionState) -> Value {
    match state {
        SessionState::Unauthenticated => json!({ "state": "unauthenticated" }),
        SessionState::PendingVerification(pending) => json!({
            "state": "pending_verification",
            "email": pending.email,
            "stage": pending.stage,
        }),
        SessionState::Authenticated(session) => json!({
            "state": "authenticated",
            "user": session.user(),
        }),
    }
}
