use std::{sync::Once, time::Duration};

use dashboard::{App, Environment, LogLevel, Settings};
use serde_json::{Value, json};
use tracing_subscriber::FmtSubscriber;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

static TRACING: Once = Once::new();

pub struct TestHelper {
    pub mock_server: MockServer,
    pub settings: Settings,
}

impl TestHelper {
    pub async fn new() -> TestHelper {
        TRACING.call_once(|| {
            tracing::subscriber::set_global_default(
                FmtSubscriber::builder()
                    .with_max_level(tracing::Level::INFO)
                    .finish(),
            )
            .unwrap();
        });

        let mock_server = MockServer::start().await;
        let settings = settings(&mock_server.uri());

        TestHelper {
            mock_server,
            settings,
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

    /// "111" in the park at the map center and "222" outside to the north east.
    pub async fn mock_scenario(&self) {
        self.respond_json(
            "/api/vessels/in-park",
            json!({
                "vessels_in_park": [
                    {
                        "vessel": { "mmsi": "111", "name": "ALPHA", "speed": 12.1 },
                        "position": { "latitude": 41.20, "longitude": 9.40 },
                        "is_in_park": true
                    },
                    {
                        "vessel": { "mmsi": 222, "name": "BRAVO" },
                        "position": { "latitude": 41.30, "longitude": 9.50 },
                        "is_in_park": false
                    }
                ]
            }),
        )
        .await;
        self.respond_json(
            "/api/park-boundaries",
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[9.0, 41.0], [10.0, 41.0], [10.0, 41.5], [9.0, 41.0]]]
                    }
                }]
            }),
        )
        .await;
    }

    /// Runs the app on `input` and returns everything it wrote.
    pub async fn run(&self, input: &str) -> Vec<String> {
        let app = App::build(&self.settings).unwrap();
        let mut output = Vec::new();

        tokio::time::timeout(Duration::from_secs(10), app.run(input.as_bytes(), &mut output))
            .await
            .unwrap()
            .unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub fn settings(address: &str) -> Settings {
    Settings {
        log_level: LogLevel::Debug,
        environment: Environment::Test,
        api: park_api::Settings {
            address: address.to_string(),
            timeout: Duration::from_millis(500),
            max_retries: 0,
        },
        poll_interval: Duration::from_secs(3600),
        boundary_max_age: Duration::from_secs(3600),
        map: map_view::Settings {
            center_latitude: 41.20,
            center_longitude: 9.40,
            zoom: 10.0,
            width: 1024.0,
            height: 768.0,
            hit_radius_px: Some(10.0),
        },
    }
}
