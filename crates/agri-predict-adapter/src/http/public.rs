/*
[INPUT]:  None
[OUTPUT]: Backend banner with the routes it serves
[POS]:    HTTP layer - unauthenticated status endpoint
[UPDATE]: When the backend root route changes
*/

use crate::http::{AgriClient, Result, TransportError};
use crate::types::HealthResponse;
use reqwest::Method;

impl AgriClient {
    /// Query the backend banner
    ///
    /// GET /
    pub async fn health(&self) -> Result<HealthResponse> {
        let builder = self
            .request(Method::GET, "/")
            .map_err(TransportError::from)?;
        Ok(self.send_json(builder).await?)
    }
}
