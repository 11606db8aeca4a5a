use crate::{AuthResponse, CoreError, Role, VerificationStage};

fn verified_response() -> AuthResponse {
    serde_json::from_str(
        r#"{
            "token": "T",
            "userId": 7,
            "email": "a@b.com",
            "firstName": "Ada",
            "lastName": "Byron",
            "phoneNumber": null,
            "userType": "organizer"
        }"#,
    )
    .unwrap()
}

#[test]
fn test_to_profile_fills_missing_phone() {
    let profile = verified_response().to_profile().unwrap();
    assert_eq!(profile.role, Role::Organizer);
    assert_eq!(profile.user_id, Some(7));
    assert_eq!(profile.phone_number, "");
    assert_eq!(profile.display_name(), "Ada Byron");
}

#[test]
fn test_marker_response_has_no_profile() {
    let response: AuthResponse = serde_json::from_str(
        r#"{"token": null, "userId": 7, "email": "a@b.com", "userType": "2FA_REQUIRED"}"#,
    )
    .unwrap();

    assert_eq!(response.token(), None);
    assert_eq!(
        response.verification_stage(),
        Some(VerificationStage::SecondFactor)
    );
    assert!(matches!(
        response.to_profile(),
        Err(CoreError::NoProfile { .. })
    ));
}

#[test]
fn test_empty_token_treated_as_absent() {
    let mut response = verified_response();
    response.token = Some(String::new());
    assert_eq!(response.token(), None);
}
