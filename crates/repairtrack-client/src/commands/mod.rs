//! Entity lifecycle operations.
//!
//! Each sub-module adds an `impl App` block for one entity. Every operation
//! follows the same shape: validate, call the collaborator, and only then
//! touch the in-memory store and emit a success notification. Failures are
//! reported through [`App::settle`](crate::app::App) and leave memory as it
//! was.

mod images;
mod orders;
mod providers;

pub use images::ImageFile;
