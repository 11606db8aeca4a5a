use crate::{ApiClient, AuthError, AuthResult, LoginRequest, Navigator, RegisterRequest};

use std::sync::Arc;

use linkt_core::{AuthResponse, PendingVerification, Route, UserProfile, VerificationStage};
use linkt_session::SessionStore;
use log::{info, warn};

/// Where a login or registration attempt ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(UserProfile),
    VerificationRequired(PendingVerification),
}

/// Login, registration and one-time code verification.
///
/// Every path that ends in a session goes through
/// [`SessionStore::establish_session`], which also drops the pending marker.
pub struct AuthFlow {
    api: Arc<ApiClient>,
}

impl AuthFlow {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn session(&self) -> &SessionStore {
        self.api.session()
    }

    fn navigator(&self) -> &dyn Navigator {
        self.api.navigator().as_ref()
    }

    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> AuthResult<LoginOutcome> {
        let request = LoginRequest {
            email: email.into(),
            password: password.into(),
        };

        let response = self.api.login(&request).await?;
        self.complete(&response, &request.email)
    }

    pub async fn register(&self, request: RegisterRequest) -> AuthResult<LoginOutcome> {
        let response = self.api.register(&request).await?;
        self.complete(&response, &request.email)
    }

    /// Submit the code for `stage`.
    ///
    /// Without a matching pending marker the user is sent back to the screen
    /// that starts the flow. A rejected code leaves the marker in place so the
    /// user can retry.
    pub async fn verify(&self, stage: VerificationStage, code: &str) -> AuthResult<UserProfile> {
        let Some(pending) = self.session().pending().filter(|p| p.stage == stage) else {
            warn!("No {stage} in progress, redirecting");
            self.navigator().navigate(stage.fallback_route());
            return Err(AuthError::no_pending(stage));
        };

        let result = match stage {
            VerificationStage::EmailVerification => {
                self.api.verify_email(&pending.email, code).await
            }
            VerificationStage::SecondFactor => {
                self.api.verify_two_factor(&pending.email, code).await
            }
        };
        let response = result.map_err(AuthError::from_verification)?;

        let Some(token) = response.token() else {
            warn!("{stage} for {} returned no token", pending.email);
            return Err(AuthError::verification_failed());
        };

        let mut profile = response.to_profile()?;
        if profile.email.is_empty() {
            profile.email = pending.email;
        }

        self.session().establish_session(profile.clone(), token)?;
        self.navigator().navigate(Route::Home);

        Ok(profile)
    }

    /// Abandon a verification in progress
    pub fn back_out(&self) -> AuthResult<()> {
        self.session().clear_pending_verification()?;
        self.navigator().navigate(Route::Login);
        Ok(())
    }

    pub fn logout(&self) -> AuthResult<()> {
        self.session().end_session()?;
        self.navigator().navigate(Route::Login);
        Ok(())
    }

    fn complete(&self, response: &AuthResponse, email: &str) -> AuthResult<LoginOutcome> {
        if let Some(token) = response.token() {
            let profile = response.to_profile()?;
            self.session().establish_session(profile.clone(), token)?;
            self.navigator().navigate(Route::Home);
            return Ok(LoginOutcome::Authenticated(profile));
        }

        let Some(stage) = response.verification_stage() else {
            return Err(AuthError::unexpected_response(&response.user_type));
        };

        let email = if response.email.is_empty() {
            email
        } else {
            response.email.as_str()
        };

        info!("{stage} required for {email}");
        self.session().mark_pending_verification(email, stage)?;
        self.navigator().navigate(stage.route());

        Ok(LoginOutcome::VerificationRequired(PendingVerification::new(
            email, stage,
        )))
    }
}
