use async_trait::async_trait;
use domain_shared::scholarship::TrackingCode;

#[async_trait]
pub trait TrackingCodePort {
    /// Always yields a code. When the counter cannot be advanced the code is
    /// a timestamp-based fallback that is not guaranteed to be unique.
    async fn allocate_code(&self, scholarship_name: &str) -> TrackingCode;
}
