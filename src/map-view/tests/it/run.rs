use std::time::Duration;

use map_view::{MapEvent, Poller, PopupState};
use parkwatch_core::VesselRecord;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::helper::TestHelper;

#[tokio::test]
async fn test_run_binds_refreshes_and_handles_events() {
    let helper = TestHelper::new();
    helper.source.push_ready(Ok(vec![
        VesselRecord::test_default("111", 41.20, 9.40).in_park(),
        VesselRecord::test_default("222", 41.30, 9.50),
    ]));

    let TestHelper {
        store,
        view,
        surface,
        ..
    } = helper;
    let point = view.viewport().project(geo::Point::new(9.50, 41.30));
    let mut popup = view.subscribe_popup();

    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let task = tokio::spawn(view.run(rx, cancel.clone()));

    store.refresh().await;

    // The click may reach the map before the snapshot, retry until the popup opens.
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            tx.send(MapEvent::Click(point)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(10)).await;
            if popup.borrow_and_update().is_open() {
                break;
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(
        popup.borrow().session().unwrap().mmsi().as_str(),
        "222"
    );

    cancel.cancel();
    task.await.unwrap();

    assert_eq!(*popup.borrow(), PopupState::Closed);
    assert!(surface.live().is_empty());
}

#[tokio::test]
async fn test_run_stops_when_events_close() {
    let helper = TestHelper::new();
    let (tx, rx) = mpsc::channel(1);

    let task = tokio::spawn(helper.view.run(rx, CancellationToken::new()));
    drop(tx);

    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_poller_stops_after_store_teardown() {
    let helper = TestHelper::new();
    let poller = tokio::spawn(
        Poller::new(helper.store.clone(), Duration::from_secs(5)).run_continuous(),
    );

    tokio::time::sleep(Duration::from_secs(12)).await;
    helper.store.teardown();
    poller.await.unwrap();

    assert_eq!(helper.source.vessel_calls(), 3);
    assert!(helper.store.is_torn_down());
}
