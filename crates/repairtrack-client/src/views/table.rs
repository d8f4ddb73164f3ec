use std::fmt;

use chrono::NaiveDate;
use repairtrack_shared::ServiceOrder;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableView {
    #[default]
    Active,
    Archived,
}

impl TableView {
    pub fn includes(self, order: &ServiceOrder) -> bool {
        match self {
            TableView::Active => !order.archived,
            TableView::Archived => order.archived,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: Uuid,
    pub service_order_number: String,
    pub client_name: String,
    pub provider: String,
    pub departure_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub status: &'static str,
}

impl From<&ServiceOrder> for Row {
    fn from(o: &ServiceOrder) -> Self {
        Self {
            id: o.id,
            service_order_number: o.service_order_number.clone(),
            client_name: o.client_name.clone(),
            provider: o.provider_label(),
            departure_date: o.departure_date,
            expected_return_date: o.expected_return_date,
            actual_return_date: o.actual_return_date,
            status: o.status.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Table {
    pub rows: Vec<Row>,
}

pub fn table<'a, I>(orders: I, view: TableView) -> Table
where
    I: IntoIterator<Item = &'a ServiceOrder>,
{
    Table {
        rows: orders
            .into_iter()
            .filter(|o| view.includes(o))
            .map(Row::from)
            .collect(),
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<14} {:<24} {:<20} {:<10} {:<10} {:<10} {}",
            "ORDER", "CLIENT", "PROVIDER", "DEPARTED", "DUE", "RETURNED", "STATUS"
        )?;
        for r in &self.rows {
            let returned = r
                .actual_return_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into());
            writeln!(
                f,
                "{:<14} {:<24} {:<20} {:<10} {:<10} {:<10} {}",
                r.service_order_number,
                r.client_name,
                r.provider,
                r.departure_date,
                r.expected_return_date,
                returned,
                r.status
            )?;
        }
        Ok(())
    }
}
