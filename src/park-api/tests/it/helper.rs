use std::time::Duration;

use park_api::{ParkApiClient, Settings};
use serde_json::Value;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub struct TestHelper {
    pub mock_server: MockServer,
    pub client: ParkApiClient,
}

impl TestHelper {
    pub async fn new() -> TestHelper {
        let mock_server = MockServer::start().await;
        let client = ParkApiClient::new(&settings(&mock_server.uri())).unwrap();

        TestHelper {
            mock_server,
            client,
        }
    }

    pub async fn respond_json(&self, endpoint: &str, body: Value) {
        self.respond(endpoint, ResponseTemplate::new(200).set_body_json(body))
            .await;
    }

    pub async fn respond(&self, endpoint: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(template)
            .mount(&self.mock_server)
            .await;
    }
}

pub fn settings(address: &str) -> Settings {
    Settings {
        address: address.to_string(),
        timeout: Duration::from_millis(500),
        max_retries: 0,
    }
}
