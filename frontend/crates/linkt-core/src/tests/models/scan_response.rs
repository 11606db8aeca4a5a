use crate::{ScanResponse, ScanStats, ScanStatus};

#[test]
fn test_already_scanned_response_parses() {
    let response: ScanResponse = serde_json::from_str(
        r#"{
            "valid": false,
            "status": "ALREADY_SCANNED",
            "message": "Ticket already scanned",
            "ticketData": {
                "ticketId": 42,
                "studentName": "Ada Byron",
                "studentEmail": "ada@example.com",
                "eventName": "Hack Night",
                "eventDate": "2025-03-01",
                "ticketType": "General"
            },
            "scannedAt": "Mar 01, 2025 19:02",
            "scannedBy": "Organizer"
        }"#,
    )
    .unwrap();

    assert_eq!(response.status, ScanStatus::AlreadyScanned);
    assert!(response.status.is_warning());
    assert_eq!(response.ticket_data.unwrap().ticket_id, 42);
}

#[test]
fn test_unknown_status_maps_to_error() {
    let response: ScanResponse =
        serde_json::from_str(r#"{"valid": false, "status": "EXPIRED", "message": "old"}"#)
            .unwrap();
    assert_eq!(response.status, ScanStatus::Error);
}

#[test]
fn test_transport_error_default_message() {
    let response = ScanResponse::transport_error(None);
    assert_eq!(response.status, ScanStatus::Error);
    assert_eq!(response.message, "Failed to scan ticket. Please try again.");

    let response = ScanResponse::transport_error(Some("Forbidden".into()));
    assert_eq!(response.message, "Forbidden");
}

#[test]
fn test_scan_stats_accepts_event_name() {
    let stats: ScanStats = serde_json::from_str(
        r#"{"eventId": 3, "eventName": "Hack Night", "totalTickets": 10, "scannedCount": 4, "remainingCount": 6}"#,
    )
    .unwrap();
    assert_eq!(stats.event_title, "Hack Night");
    assert!(ScanStatus::Success.changes_counters());
}
