use std::fmt;

use repairtrack_shared::{ServiceOrder, Status};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Column<'a> {
    pub status: Status,
    pub orders: Vec<&'a ServiceOrder>,
}

/// Three fixed columns over active orders, in [`Status::ALL`] order.
#[derive(Debug, Clone, Serialize)]
pub struct Kanban<'a> {
    pub columns: [Column<'a>; 3],
}

pub fn kanban<'a, I>(orders: I) -> Kanban<'a>
where
    I: IntoIterator<Item = &'a ServiceOrder>,
{
    let mut columns = Status::ALL.map(|status| Column {
        status,
        orders: Vec::new(),
    });
    for order in orders.into_iter().filter(|o| !o.archived) {
        if let Some(col) = columns.iter_mut().find(|c| c.status == order.status) {
            col.orders.push(order);
        }
    }
    Kanban { columns }
}

impl Kanban<'_> {
    pub fn column(&self, status: Status) -> &Column<'_> {
        // ALL covers every variant.
        &self.columns[Status::ALL.iter().position(|s| *s == status).unwrap_or(0)]
    }
}

impl fmt::Display for Kanban<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for col in &self.columns {
            writeln!(f, "== {} ({}) ==", col.status.label(), col.orders.len())?;
            for o in &col.orders {
                writeln!(
                    f,
                    "  {}  {}  [{}]  due {}",
                    o.service_order_number,
                    o.client_name,
                    o.provider_label(),
                    o.expected_return_date
                )?;
            }
        }
        Ok(())
    }
}
