use crate::client::MonitoringClient;
use crate::error::MonitorError;
use crate::http::client::HttpClient;
use crate::models::connz::{Connz, ConnzQuery};
use crate::models::varz::Varz;
use async_trait::async_trait;

const VARZ: &str = "/varz";
const CONNZ: &str = "/connz";

#[async_trait]
impl MonitoringClient for HttpClient {
    async fn get_varz(&self) -> Result<Varz, MonitorError> {
        let response = self.get(VARZ).await?;
        let body = response.text().await?;
        let varz = serde_json::from_str(&body)?;
        Ok(varz)
    }

    async fn get_connz(&self, query: &ConnzQuery) -> Result<Connz, MonitorError> {
        let response = self.get_with_query(CONNZ, query).await?;
        let body = response.text().await?;
        let connz = serde_json::from_str(&body)?;
        Ok(connz)
    }
}
