//! # repairtrack-shared
//!
//! Domain types shared by every repairtrack crate: the service order and
//! service provider models, the status classifier, the date/duration
//! reconciler used by the order form, and draft validation.
//!
//! Nothing in here performs I/O.

pub mod constants;
pub mod dates;
pub mod error;
pub mod models;
pub mod status;
pub mod types;
pub mod validation;

pub use dates::Schedule;
pub use error::ValidationError;
pub use models::*;
pub use status::{classify, days_until_return};
pub use types::Status;
