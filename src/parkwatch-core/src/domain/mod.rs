mod boundary;
mod query;
mod snapshot;
mod status;
mod vessel;

pub use boundary::*;
pub use query::*;
pub use snapshot::*;
pub use status::*;
pub use vessel::*;
