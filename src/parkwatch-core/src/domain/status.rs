use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Visual classification of a vessel relative to the protected area.
///
/// Exactly one status applies to a vessel, `InPark` takes precedence over `InBuffer`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ParkStatus {
    Outside,
    InBuffer,
    InPark,
}

impl ParkStatus {
    pub fn from_flags(is_in_park: bool, is_in_buffer_zone: bool) -> Self {
        if is_in_park {
            Self::InPark
        } else if is_in_buffer_zone {
            Self::InBuffer
        } else {
            Self::Outside
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParkStatus::InPark => "Inside park",
            ParkStatus::InBuffer => "In buffer zone",
            ParkStatus::Outside => "Outside park",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ParkStatus::InPark => "#d32f2f",
            ParkStatus::InBuffer => "#f9a825",
            ParkStatus::Outside => "#1976d2",
        }
    }
}
