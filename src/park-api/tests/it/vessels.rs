use std::time::Duration;

use crate::helper::{TestHelper, settings};
use park_api::ParkApiClient;
use parkwatch_core::{ParkStatus, SourceError, SourceErrorKind, VesselQuery, VesselSource};
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path, query_param},
};

#[tokio::test]
async fn test_vessels_in_park_are_decoded_into_records() {
    let helper = TestHelper::new().await;
    helper
        .respond_json(
            "/api/vessels/in-park",
            json!({
                "vessels_in_park": [
                    {
                        "vessel": { "mmsi": "111", "name": "ALPHA", "type": "Tanker", "speed": 12.1 },
                        "position": { "latitude": 41.20, "longitude": 9.40 },
                        "is_in_park": true
                    },
                    {
                        "vessel": { "mmsi": 222, "is_in_buffer_zone": true },
                        "position": { "latitude": 41.30, "longitude": 9.50 },
                        "is_in_park": false
                    }
                ]
            }),
        )
        .await;

    let vessels = helper.client.vessels_in_park().await.unwrap();

    assert_eq!(vessels.len(), 2);
    assert_eq!(vessels[0].mmsi.as_str(), "111");
    assert_eq!(vessels[0].vessel_type.as_deref(), Some("Tanker"));
    assert_eq!(vessels[0].status(), ParkStatus::InPark);
    assert_eq!(vessels[1].mmsi.as_str(), "222");
    assert_eq!(vessels[1].status(), ParkStatus::InBuffer);
    assert_eq!(vessels[1].longitude, Some(9.50));
}

#[tokio::test]
async fn test_empty_vessel_list_is_not_an_error() {
    let helper = TestHelper::new().await;
    helper
        .respond_json("/api/vessels/in-park", json!({ "vessels_in_park": [] }))
        .await;

    let vessels = helper.client.vessels_in_park().await.unwrap();

    assert!(vessels.is_empty());
}

#[tokio::test]
async fn test_search_forwards_only_set_filters() {
    let helper = TestHelper::new().await;

    Mock::given(method("GET"))
        .and(path("/api/vessels"))
        .and(query_param("type", "Fishing"))
        .and(query_param("max_results", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vessels": [{ "mmsi": "333", "type": "Fishing", "country_iso": "FR" }]
        })))
        .expect(1)
        .mount(&helper.mock_server)
        .await;

    let query = VesselQuery {
        vessel_type: Some("Fishing".into()),
        max_results: Some(5),
        ..Default::default()
    };

    let vessels = helper.client.search_vessels(&query).await.unwrap();

    assert_eq!(vessels.len(), 1);
    assert_eq!(vessels[0].country.as_deref(), Some("FR"));

    let requests = helper.mock_server.received_requests().await.unwrap();
    let query_string = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query_string.contains("name"));
    assert!(!query_string.contains("country_iso"));
}

#[tokio::test]
async fn test_park_boundaries_are_decoded() {
    let helper = TestHelper::new().await;
    helper
        .respond_json(
            "/api/park-boundaries",
            json!({
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": { "type": "buffer_zone" },
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[8.8, 40.8], [10.2, 40.8], [10.2, 41.7], [8.8, 40.8]]]
                        }
                    },
                    {
                        "type": "Feature",
                        "properties": { "name": "park" },
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[9.0, 41.0], [10.0, 41.0], [10.0, 41.5], [9.0, 41.0]]]
                        }
                    }
                ]
            }),
        )
        .await;

    let boundaries = helper.client.park_boundaries().await.unwrap();

    assert_eq!(boundaries.park.0.len(), 1);
    assert_eq!(boundaries.buffer_zone.unwrap().0.len(), 1);
}

#[tokio::test]
async fn test_non_success_status_is_bad_status() {
    let helper = TestHelper::new().await;
    helper
        .respond(
            "/api/vessels/in-park",
            ResponseTemplate::new(502).set_body_string("bad gateway"),
        )
        .await;

    let err = helper.client.vessels_in_park().await.unwrap_err();

    assert_eq!(err.kind(), SourceErrorKind::BadStatus);
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_wrong_shape_is_malformed_payload() {
    let helper = TestHelper::new().await;
    helper
        .respond_json("/api/vessels/in-park", json!({ "vessels": [] }))
        .await;

    let err = helper.client.vessels_in_park().await.unwrap_err();

    assert_eq!(err.kind(), SourceErrorKind::MalformedPayload);
}

#[tokio::test]
async fn test_invalid_boundary_geometry_is_malformed_payload() {
    let helper = TestHelper::new().await;
    helper
        .respond_json(
            "/api/park-boundaries",
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": { "type": "Polygon", "coordinates": [[[9.0]]] }
                }]
            }),
        )
        .await;

    let err = helper.client.park_boundaries().await.unwrap_err();

    assert_eq!(err.kind(), SourceErrorKind::MalformedPayload);
}

#[tokio::test]
async fn test_slow_backend_is_network_failure_with_timeout() {
    let helper = TestHelper::new().await;
    helper
        .respond(
            "/api/health",
            ResponseTemplate::new(200).set_delay(Duration::from_secs(2)),
        )
        .await;

    let err = helper.client.health().await.unwrap_err();

    let SourceError::NetworkFailure {
        timeout,
        error_stringified,
        ..
    } = err
    else {
        panic!("expected network failure, got {err:?}");
    };
    assert!(timeout);
    assert!(!error_stringified.contains("location"));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_failure() {
    // Nothing listens on the discard port.
    let client = ParkApiClient::new(&settings("http://127.0.0.1:9")).unwrap();

    let err = client.health().await.unwrap_err();

    assert_eq!(err.kind(), SourceErrorKind::NetworkFailure);
}

#[tokio::test]
async fn test_healthy_backend_passes_health_check() {
    let helper = TestHelper::new().await;
    helper
        .respond("/api/health", ResponseTemplate::new(200))
        .await;

    helper.client.health().await.unwrap();
}
