use std::sync::{Arc, Mutex};

use geo::Point;
use map_view::{CursorStyle, HoverState, LayerId, MapEvent, PopupState, ScreenPoint};
use parkwatch_core::{ParkStatus, VesselRecord};

use crate::helper::TestHelper;

#[tokio::test]
async fn test_scenario_projects_two_features_with_status() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    let features = helper.view.layers().vessel_features().unwrap();
    assert_eq!(features.len(), 2);

    let status = |mmsi: &str| {
        features
            .iter()
            .find(|f| f.mmsi().as_str() == mmsi)
            .unwrap()
            .status
    };
    assert_eq!(status("111"), ParkStatus::InPark);
    assert_eq!(status("222"), ParkStatus::Outside);
}

#[tokio::test]
async fn test_click_on_empty_canvas_keeps_popup_closed() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    let pointer = helper.screen(9.70, 41.45);
    assert_eq!(helper.view.click(pointer), None);

    assert_eq!(helper.view.popup_state(), PopupState::Closed);
    assert!(helper.surface.live().is_empty());
    assert!(helper.clicked().is_empty());
}

#[tokio::test]
async fn test_click_second_vessel_replaces_popup() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    helper.view.click(helper.screen(9.40, 41.20));
    assert_eq!(helper.open_mmsi().as_deref(), Some("111"));

    helper.view.click(helper.screen(9.50, 41.30));
    assert_eq!(helper.open_mmsi().as_deref(), Some("222"));

    assert_eq!(helper.surface.live().len(), 1);
    assert_eq!(helper.surface.max_live(), 1);
    assert_eq!(helper.clicked(), vec!["111", "222"]);
}

#[tokio::test]
async fn test_background_click_closes_open_popup() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    helper.view.click(helper.screen(9.40, 41.20));
    helper.view.click(helper.screen(9.70, 41.45));

    assert_eq!(helper.view.popup_state(), PopupState::Closed);
    assert!(helper.surface.live().is_empty());
}

#[tokio::test]
async fn test_popup_content_is_copied_at_click_time() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    helper.view.click(helper.screen(9.40, 41.20));

    let mut moved = VesselRecord::test_default("111", 41.20, 9.40).in_park();
    moved.speed = Some(2.0);
    helper.load(vec![moved]).await;

    let state = helper.view.popup_state();
    let content = state.session().unwrap().content();
    assert_eq!(content.field("Speed"), Some("11.5 kn"));
}

#[tokio::test]
async fn test_popup_omits_absent_fields() {
    let mut helper = TestHelper::new();
    helper
        .load(vec![VesselRecord::test_default("111", 41.20, 9.40).bare()])
        .await;

    helper.view.click(helper.screen(9.40, 41.20));

    let state = helper.view.popup_state();
    let content = state.session().unwrap().content();
    assert_eq!(content.field("MMSI"), Some("111"));
    for label in ["IMO", "Country", "Speed", "Course", "Heading", "Destination", "Distance"] {
        assert_eq!(content.field(label), None, "{label} should be omitted");
    }
}

#[tokio::test]
async fn test_hover_changes_cursor_only_on_transitions() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    let over = helper.screen(9.40, 41.20);
    let mut near = over;
    near.x += 2.0;

    assert_eq!(helper.view.pointer_move(over), Some(CursorStyle::Pointer));
    assert_eq!(helper.view.pointer_move(near), None);
    assert_eq!(helper.view.hover(), HoverState::Hover);
    assert_eq!(
        helper.view.pointer_move(ScreenPoint::new(0.0, 0.0)),
        Some(CursorStyle::Default)
    );
    assert_eq!(helper.view.pointer_leave(), None);
}

#[tokio::test]
async fn test_hover_resets_when_vessel_moves_away() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    helper.view.pointer_move(helper.screen(9.40, 41.20));
    assert_eq!(helper.view.hover(), HoverState::Hover);

    helper
        .load(vec![VesselRecord::test_default("111", 41.40, 9.80).in_park()])
        .await;

    assert_eq!(helper.view.hover(), HoverState::Default);
}

#[tokio::test]
async fn test_hidden_vessel_layer_is_not_clickable() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    helper.view.pointer_move(helper.screen(9.40, 41.20));
    assert!(helper.view.set_layer_visibility(LayerId::Vessels, false));
    assert_eq!(helper.view.hover(), HoverState::Default);

    assert_eq!(helper.view.click(helper.screen(9.40, 41.20)), None);
    assert!(!helper.view.popup_state().is_open());

    helper.view.set_layer_visibility(LayerId::Vessels, true);
    assert!(helper.view.click(helper.screen(9.40, 41.20)).is_some());
}

#[tokio::test]
async fn test_hiding_boundary_layers_keeps_vessels_clickable() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    helper
        .view
        .dispatch(MapEvent::SetLayerVisibility(LayerId::BufferZone, false));
    helper
        .view
        .dispatch(MapEvent::SetLayerVisibility(LayerId::ParkBoundary, false));

    assert!(!helper.view.layers().is_visible(LayerId::BufferZone));
    assert!(helper.view.click(helper.screen(9.40, 41.20)).is_some());
}

#[tokio::test]
async fn test_close_button_and_external_close() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    let first = helper.view.click(helper.screen(9.40, 41.20)).unwrap();
    let second = helper.view.click(helper.screen(9.50, 41.30)).unwrap();

    helper.view.dispatch(MapEvent::PopupCloseButton(first));
    assert_eq!(helper.open_mmsi().as_deref(), Some("222"));

    helper.view.dispatch(MapEvent::PopupCloseButton(second));
    assert_eq!(helper.view.popup_state(), PopupState::Closed);

    helper.view.click(helper.screen(9.40, 41.20));
    assert!(helper.view.close_popup());
    assert!(!helper.view.close_popup());
}

#[tokio::test]
async fn test_nothing_is_clickable_before_first_load() {
    let mut helper = TestHelper::new();
    helper.view.ready();

    assert!(helper.view.layers().vessel_features().is_none());
    assert_eq!(helper.view.click(helper.screen(9.40, 41.20)), None);
}

#[tokio::test]
async fn test_map_ready_callback_gets_handle() {
    let mut helper = TestHelper::new();
    let zoom = Arc::new(Mutex::new(None));
    let seen = zoom.clone();

    helper.view.on_map_ready(move |map| {
        map.fly_to(Point::new(9.40, 41.20), Some(12.0));
        *seen.lock().unwrap() = Some(map.viewport().zoom());
    });
    assert_eq!(*zoom.lock().unwrap(), None);

    helper.view.ready();
    assert_eq!(*zoom.lock().unwrap(), Some(12.0));
    assert_eq!(helper.view.viewport().center(), Point::new(9.40, 41.20));

    let late = Arc::new(Mutex::new(false));
    let flag = late.clone();
    helper
        .view
        .on_map_ready(move |_| *flag.lock().unwrap() = true);
    assert!(*late.lock().unwrap());
}

#[tokio::test]
async fn test_teardown_removes_popup() {
    let mut helper = TestHelper::new();
    helper.load_scenario().await;

    let id = helper.view.click(helper.screen(9.40, 41.20)).unwrap();
    helper.view.teardown();

    assert_eq!(helper.view.popup_state(), PopupState::Closed);
    assert!(helper.surface.live().is_empty());
    assert_eq!(helper.surface.removed(), vec![id]);
}
