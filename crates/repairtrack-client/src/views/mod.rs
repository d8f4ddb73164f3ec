//! Read-only projections over an order snapshot.

pub mod dashboard;
pub mod kanban;
pub mod search;
pub mod table;

pub use dashboard::{dashboard, Dashboard};
pub use kanban::{kanban, Kanban};
pub use search::filter_orders;
pub use table::{table, Table, TableView};
