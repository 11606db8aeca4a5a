
use linkt_core::{Role, UserProfile};

pub(crate) fn organizer(email: &str) -> UserProfile {
    UserProfile {
        user_id: Some(11),
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: email.into(),
        phone_number: String::new(),
        role: Role::Organizer,
    }
}
