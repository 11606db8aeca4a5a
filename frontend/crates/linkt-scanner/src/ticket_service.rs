use async_trait::async_trait;
use linkt_api::{ApiClient, ApiResult};
use linkt_core::{ScanResponse, ScanStats};

/// Backend calls the scan loop depends on
#[async_trait]
pub trait TicketService: Send + Sync {
    async fn validate_ticket(&self, event_id: i64, qr_code: &str) -> ApiResult<ScanResponse>;

    async fn scan_stats(&self, event_id: i64) -> ApiResult<ScanStats>;
}

#[async_trait]
impl TicketService for ApiClient {
    async fn validate_ticket(&self, event_id: i64, qr_code: &str) -> ApiResult<ScanResponse> {
        ApiClient::validate_ticket(self, event_id, qr_code).await
    }

    async fn scan_stats(&self, event_id: i64) -> ApiResult<ScanStats> {
        ApiClient::scan_stats(self, event_id).await
    }
}
