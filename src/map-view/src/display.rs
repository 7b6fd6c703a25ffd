use parkwatch_core::ParkStatus;

use crate::FeatureAttributes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
    pub label: &'static str,
    pub value: String,
}

/// Textual content of the vessel detail popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub title: String,
    pub status: ParkStatus,
    pub status_label: &'static str,
    pub color: &'static str,
    pub fields: Vec<DisplayField>,
}

/// Maps feature attributes to popup fields.
///
/// Absent attributes produce no field at all, there are no placeholder values.
pub fn popup_content(attributes: &FeatureAttributes) -> PopupContent {
    let status = ParkStatus::from_flags(attributes.is_in_park, attributes.is_in_buffer_zone);

    let title = attributes
        .name
        .clone()
        .unwrap_or_else(|| format!("MMSI {}", attributes.mmsi));

    let vessel_type = match (&attributes.vessel_type, &attributes.type_specific) {
        (Some(t), Some(s)) if t != s => Some(format!("{t} ({s})")),
        (Some(t), _) => Some(t.clone()),
        (None, Some(s)) => Some(s.clone()),
        (None, None) => None,
    };

    let fields = [
        ("MMSI", Some(attributes.mmsi.to_string())),
        ("IMO", attributes.imo.clone()),
        ("Type", vessel_type),
        ("Country", attributes.country.clone()),
        ("Speed", number(attributes.speed).map(|v| format!("{v:.1} kn"))),
        ("Course", number(attributes.course).map(|v| format!("{v:.0}°"))),
        ("Heading", number(attributes.heading).map(|v| format!("{v:.0}°"))),
        ("Destination", attributes.destination.clone()),
        ("Distance", number(attributes.distance).map(|v| format!("{v:.1} km"))),
        ("Last update", attributes.timestamp.clone()),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value
            .filter(|v| !v.trim().is_empty())
            .map(|value| DisplayField { label, value })
    })
    .collect();

    PopupContent {
        title,
        status,
        status_label: status.label(),
        color: status.color(),
        fields,
    }
}

fn number(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl PopupContent {
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}
