use map_view::{PopupSession, PopupSurface};
use tracing::info;

/// Popup surface of the headless dashboard, popups are written to the log.
#[derive(Debug, Default)]
pub struct LogSurface;

impl PopupSurface for LogSurface {
    fn show(&mut self, session: &PopupSession) {
        let content = session.content();
        let fields = content
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.label, f.value))
            .collect::<Vec<_>>()
            .join(", ");

        info!(
            session = session.id,
            title = %content.title,
            status = content.status_label,
            longitude = session.anchor.x(),
            latitude = session.anchor.y(),
            "{fields}"
        );
    }

    fn remove(&mut self, session_id: u64) {
        info!(session = session_id, "popup removed");
    }
}
