#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Map interaction core of the dashboard: keeps the vessel layers in sync with the polled feed,
//! resolves pointer events against rendered vessels and owns the single vessel detail popup.

mod binding;
mod display;
mod layers;
mod poller;
mod popup;
mod projector;
mod settings;
mod store;
mod view;
mod viewport;

#[cfg(any(test, feature = "test"))]
pub mod test_helper;

pub use binding::*;
pub use display::*;
pub use hit_test::*;
pub use layers::*;
pub use poller::*;
pub use popup::*;
pub use projector::*;
pub use settings::*;
pub use store::*;
pub use view::*;
pub use viewport::*;
