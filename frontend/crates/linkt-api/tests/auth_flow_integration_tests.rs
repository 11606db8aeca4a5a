//! Login and verification flows against a wiremock backend

use linkt_api::{
    ApiClient, AuthError, AuthFlow, LoginOutcome, RecordingNavigator, RegisterRequest,
    VerificationPrompt,
};
use linkt_config::ApiConfig;
use linkt_core::{Role, Route, VerificationStage};
use linkt_session::{
    KeyValueStore, MemoryStore, PENDING_KEY, SessionState, SessionStore, TOKEN_KEY,
};

use std::sync::Arc;

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

struct Harness {
    server: MockServer,
    storage: MemoryStore,
    session: Arc<SessionStore>,
    navigator: Arc<RecordingNavigator>,
    flow: AuthFlow,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    let storage = MemoryStore::new();
    let session = Arc::new(SessionStore::rehydrate(storage.clone()).unwrap());
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::new(
        &ApiConfig::with_base_url(server.uri()),
        session.clone(),
        navigator.clone(),
    )
    .unwrap();

    Harness {
        server,
        storage,
        session,
        navigator,
        flow: AuthFlow::new(Arc::new(client)),
    }
}

fn verified(email: &str, role: &str) -> serde_json::Value {
    json!({
        "token": "T",
        "userId": 1,
        "email": email,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "phoneNumber": null,
        "userType": role
    })
}

// =========================================================================
// Login
// =========================================================================

#[tokio::test]
async fn test_login_requiring_second_factor_marks_pending() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": null,
            "email": "a@b.com",
            "userType": "2FA_REQUIRED"
        })))
        .mount(&h.server)
        .await;

    let outcome = h.flow.login("a@b.com", "pw").await.unwrap();

    match outcome {
        LoginOutcome::VerificationRequired(pending) => {
            assert_eq!(pending.email, "a@b.com");
            assert_eq!(pending.stage, VerificationStage::SecondFactor);
        }
        other => panic!("expected VerificationRequired, got {other:?}"),
    }
    assert!(!h.session.is_authenticated());
    assert!(h.storage.contains(PENDING_KEY));
    assert_eq!(h.navigator.routes(), vec![Route::TwoFactor]);
}

#[tokio::test]
async fn test_administrator_login_authenticates_directly() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(verified("root@linkt.test", "administrator")),
        )
        .mount(&h.server)
        .await;

    let outcome = h.flow.login("root@linkt.test", "pw").await.unwrap();

    assert!(matches!(
        outcome,
        LoginOutcome::Authenticated(ref p) if p.role == Role::Administrator
    ));
    assert_eq!(h.session.token().as_deref(), Some("T"));
    assert_eq!(h.navigator.routes(), vec![Route::Home]);
}

#[tokio::test]
async fn test_rejected_login_leaves_session_alone() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid email or password"
        })))
        .mount(&h.server)
        .await;

    let err = h.flow.login("a@b.com", "nope").await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid email or password");
    assert_eq!(h.session.snapshot(), SessionState::Unauthenticated);
    assert!(h.navigator.routes().is_empty());
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_register_requires_email_verification() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_partial_json(json!({
            "email": "new@linkt.test",
            "userType": "student"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": null,
            "userId": 1,
            "email": "new@linkt.test",
            "firstName": "New",
            "lastName": "Student",
            "phoneNumber": "1234567890",
            "userType": "EMAIL_VERIFICATION_REQUIRED"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h
        .flow
        .register(RegisterRequest {
            first_name: "New".into(),
            last_name: "Student".into(),
            email: "new@linkt.test".into(),
            phone_number: "1234567890".into(),
            password: "SecurePass123".into(),
            user_type: Role::Student,
            organization_name: None,
        })
        .await
        .unwrap();

    assert!(matches!(outcome, LoginOutcome::VerificationRequired(_)));
    assert_eq!(
        h.session.pending().unwrap().stage,
        VerificationStage::EmailVerification
    );
    assert_eq!(h.navigator.routes(), vec![Route::VerifyEmail]);
}

// =========================================================================
// Verification
// =========================================================================

#[tokio::test]
async fn test_second_factor_success_clears_pending_marker() {
    let h = harness().await;
    h.session
        .mark_pending_verification("a@b.com", VerificationStage::SecondFactor)
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/verify-2fa"))
        .and(body_partial_json(json!({ "email": "a@b.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(verified("a@b.com", "organizer")))
        .mount(&h.server)
        .await;

    let profile = h
        .flow
        .verify(VerificationStage::SecondFactor, "123456")
        .await
        .unwrap();

    let state = h.session.snapshot();
    assert_eq!(state.user(), Some(&profile));
    assert_eq!(state.token(), Some("T"));
    assert!(state.pending().is_none());
    assert!(!h.storage.contains(PENDING_KEY));
    assert_eq!(h.storage.get(TOKEN_KEY).unwrap().as_deref(), Some("T"));

    // Exactly one redirect, to home, and never back to the code screen
    assert_eq!(h.navigator.routes(), vec![Route::Home]);
    assert_eq!(h.navigator.count(Route::TwoFactor), 0);
}

#[tokio::test]
async fn test_email_verification_success_clears_pending_marker() {
    let h = harness().await;
    h.session
        .mark_pending_verification("a@b.com", VerificationStage::EmailVerification)
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/verify-email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verified("a@b.com", "student")))
        .mount(&h.server)
        .await;

    h.flow
        .verify(VerificationStage::EmailVerification, "123456")
        .await
        .unwrap();

    assert!(h.session.is_authenticated());
    assert!(h.session.pending().is_none());
    assert_eq!(h.navigator.count(Route::VerifyEmail), 0);
}

#[tokio::test]
async fn test_rejected_code_then_correct_code() {
    let h = harness().await;
    h.session
        .mark_pending_verification("a@b.com", VerificationStage::SecondFactor)
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/verify-2fa"))
        .and(body_partial_json(json!({ "code": "000000" })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid verification code"
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/verify-2fa"))
        .and(body_partial_json(json!({ "code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(verified("a@b.com", "organizer")))
        .mount(&h.server)
        .await;

    let mut prompt = VerificationPrompt::new(VerificationStage::SecondFactor);

    // Attempt 1
    prompt.set_code("000000");
    let code = prompt.code().to_string();
    let err = prompt.submit(&h.flow, &code).await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidCode { .. }));
    assert_eq!(prompt.error(), Some("Invalid verification code."));
    assert!(prompt.code().is_empty());
    assert!(!prompt.is_loading());
    assert_eq!(
        h.session.pending().unwrap().stage,
        VerificationStage::SecondFactor
    );
    assert!(h.navigator.routes().is_empty());

    // Attempt 2
    prompt.set_code("123456");
    let code = prompt.code().to_string();
    prompt.submit(&h.flow, &code).await.unwrap();

    assert!(prompt.error().is_none());
    assert!(h.session.is_authenticated());
    assert!(h.session.pending().is_none());
    assert_eq!(h.navigator.routes(), vec![Route::Home]);
}

#[tokio::test]
async fn test_expired_code_message() {
    let h = harness().await;
    h.session
        .mark_pending_verification("a@b.com", VerificationStage::EmailVerification)
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/verify-email"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid or expired verification code"
        })))
        .mount(&h.server)
        .await;

    let mut prompt = VerificationPrompt::new(VerificationStage::EmailVerification);
    let err = prompt.submit(&h.flow, "654321").await.unwrap_err();

    assert!(matches!(err, AuthError::CodeExpired { .. }));
    assert_eq!(prompt.error(), Some("Code expired. Please request a new one."));
    assert!(h.session.pending().is_some());
}

#[tokio::test]
async fn test_success_without_token_is_verification_failure() {
    let h = harness().await;
    h.session
        .mark_pending_verification("a@b.com", VerificationStage::SecondFactor)
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/verify-2fa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": null,
            "email": "a@b.com",
            "userType": "2FA_REQUIRED"
        })))
        .mount(&h.server)
        .await;

    let mut prompt = VerificationPrompt::new(VerificationStage::SecondFactor);
    let err = prompt.submit(&h.flow, "123456").await.unwrap_err();

    assert!(matches!(err, AuthError::VerificationFailed { .. }));
    assert_eq!(prompt.error(), Some("Verification failed. Please try again."));
    assert!(h.session.pending().is_some());
}

#[tokio::test]
async fn test_short_code_refused_without_request() {
    let h = harness().await;
    h.session
        .mark_pending_verification("a@b.com", VerificationStage::SecondFactor)
        .unwrap();

    let mut prompt = VerificationPrompt::new(VerificationStage::SecondFactor);
    let err = prompt.submit(&h.flow, "123").await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidCodeFormat { .. }));
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_verify_without_pending_redirects_to_start() {
    let h = harness().await;

    let err = h
        .flow
        .verify(VerificationStage::EmailVerification, "123456")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NoPendingVerification { .. }));

    let err = h
        .flow
        .verify(VerificationStage::SecondFactor, "123456")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NoPendingVerification { .. }));

    assert_eq!(h.navigator.routes(), vec![Route::Signup, Route::Login]);
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

// =========================================================================
// Back-out and logout
// =========================================================================

#[tokio::test]
async fn test_back_out_clears_pending() {
    let h = harness().await;
    h.session
        .mark_pending_verification("a@b.com", VerificationStage::SecondFactor)
        .unwrap();

    h.flow.back_out().unwrap();

    assert_eq!(h.session.snapshot(), SessionState::Unauthenticated);
    assert!(h.storage.is_empty());
    assert_eq!(h.navigator.routes(), vec![Route::Login]);
}

#[tokio::test]
async fn test_logout_removes_everything() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verified("root@linkt.test", "admin")))
        .mount(&h.server)
        .await;
    h.flow.login("root@linkt.test", "pw").await.unwrap();
    assert!(h.storage.contains(TOKEN_KEY));

    h.flow.logout().unwrap();

    assert_eq!(h.session.snapshot(), SessionState::Unauthenticated);
    assert!(h.storage.is_empty());
    assert_eq!(h.navigator.last(), Some(Route::Login));
}
