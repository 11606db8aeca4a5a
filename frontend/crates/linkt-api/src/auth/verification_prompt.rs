use crate::{AuthError, AuthFlow, AuthResult};

use linkt_core::{UserProfile, VerificationStage};

/// Digits in an email or second-factor code
pub const CODE_LENGTH: usize = 6;

/// State behind a code entry screen.
#[derive(Debug, Clone)]
pub struct VerificationPrompt {
    stage: VerificationStage,
    code: String,
    error: Option<String>,
    loading: bool,
}

impl VerificationPrompt {
    pub fn new(stage: VerificationStage) -> Self {
        Self {
            stage,
            code: String::new(),
            error: None,
            loading: false,
        }
    }

    pub fn stage(&self) -> VerificationStage {
        self.stage
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Keystrokes into the code field. Non-digits are dropped.
    pub fn set_code(&mut self, input: &str) {
        self.code = input
            .chars()
            .filter(char::is_ascii_digit)
            .take(CODE_LENGTH)
            .collect();
    }

    /// Send `code`. The field is emptied either way so a retry starts clean.
    pub async fn submit(&mut self, flow: &AuthFlow, code: &str) -> AuthResult<UserProfile> {
        self.error = None;
        self.code.clear();

        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            let err = AuthError::invalid_code_format(code, CODE_LENGTH);
            self.error = Some(err.user_message());
            return Err(err);
        }

        self.loading = true;
        let result = flow.verify(self.stage, code).await;
        self.loading = false;

        if let Err(e) = &result {
            self.error = Some(e.user_message());
        }

        result
    }
}
