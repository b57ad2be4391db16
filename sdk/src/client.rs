use crate::error::MonitorError;
use crate::models::connz::{Connz, ConnzQuery};
use crate::models::varz::Varz;
use async_trait::async_trait;

/// The fetch contract consumed by the statistics engine: one strongly-typed
/// method per monitoring endpoint. Implemented by the HTTP client and by test
/// doubles.
#[async_trait]
pub trait MonitoringClient: Send + Sync {
    /// Fetch the server-wide snapshot from `/varz`.
    async fn get_varz(&self) -> Result<Varz, MonitorError>;

    /// Fetch the per-connection snapshot from `/connz` with the provided
    /// query parameters.
    async fn get_connz(&self, query: &ConnzQuery) -> Result<Connz, MonitorError>;
}
