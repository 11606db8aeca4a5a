use crate::{PendingVerification, Route, VerificationStage};

#[test]
fn test_stage_from_marker() {
    assert_eq!(
        VerificationStage::from_marker("2FA_REQUIRED"),
        Some(VerificationStage::SecondFactor)
    );
    assert_eq!(
        VerificationStage::from_marker("EMAIL_VERIFICATION_REQUIRED"),
        Some(VerificationStage::EmailVerification)
    );
    assert_eq!(VerificationStage::from_marker("student"), None);
}

#[test]
fn test_stage_routes() {
    assert_eq!(VerificationStage::SecondFactor.route(), Route::TwoFactor);
    assert_eq!(VerificationStage::SecondFactor.fallback_route(), Route::Login);
    assert_eq!(
        VerificationStage::EmailVerification.fallback_route(),
        Route::Signup
    );
}

#[test]
fn test_pending_verification_persisted_shape() {
    let pending = PendingVerification::new("a@b.com", VerificationStage::SecondFactor);
    let json = serde_json::to_string(&pending).unwrap();
    assert_eq!(json, r#"{"email":"a@b.com","status":"2FA_REQUIRED"}"#);
}
