/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for agri-predict-adapter tests

use agri_predict_adapter::{AgriClient, ClientConfig, ImageFile};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> AgriClient {
    AgriClient::with_config(ClientConfig::with_base_url(server.uri())).expect("client init")
}

/// Small fake JPEG upload
#[allow(dead_code)]
pub fn leaf_image() -> ImageFile {
    ImageFile::new("leaf.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
}
