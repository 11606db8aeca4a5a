use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Student.as_str(), "student");
    assert_eq!(Role::Organizer.as_str(), "organizer");
    assert_eq!(Role::Administrator.as_str(), "administrator");
}

#[test]
fn test_role_from_str_accepts_admin_alias() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Administrator);
    assert_eq!(Role::from_str("Organizer").unwrap(), Role::Organizer);
    assert!(Role::from_str("janitor").is_err());
}

#[test]
fn test_role_deserializes_admin_alias() {
    let role: Role = serde_json::from_str(r#""admin""#).unwrap();
    assert_eq!(role, Role::Administrator);
}

#[test]
fn test_only_organizers_scan() {
    assert!(Role::Organizer.can_scan_tickets());
    assert!(!Role::Student.can_scan_tickets());
    assert!(!Role::Administrator.can_scan_tickets());
}
