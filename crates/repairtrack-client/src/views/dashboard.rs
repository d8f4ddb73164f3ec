use std::fmt;

use chrono::{DateTime, Utc};
use repairtrack_shared::constants::DASHBOARD_SERIES_LEN;
use repairtrack_shared::{days_until_return, ServiceOrder, Status};
use serde::Serialize;

/// Summary cards plus the "days remaining" chart series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub on_time: usize,
    pub warning: usize,
    pub delayed: usize,
    pub active: usize,
    pub archived: usize,
    pub days_remaining: Vec<DaysRemaining>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaysRemaining {
    pub service_order_number: String,
    pub days: i64,
}

impl Dashboard {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::OnTime => self.on_time,
            Status::Warning => self.warning,
            Status::Delayed => self.delayed,
        }
    }
}

/// Status counts use the status stored on each order. The series takes the
/// first active orders in input order and measures them against `now`.
pub fn dashboard<'a, I>(orders: I, now: DateTime<Utc>) -> Dashboard
where
    I: IntoIterator<Item = &'a ServiceOrder>,
{
    let mut out = Dashboard::default();
    for order in orders {
        if order.archived {
            out.archived += 1;
            continue;
        }
        out.active += 1;
        match order.status {
            Status::OnTime => out.on_time += 1,
            Status::Warning => out.warning += 1,
            Status::Delayed => out.delayed += 1,
        }
        if out.days_remaining.len() < DASHBOARD_SERIES_LEN {
            out.days_remaining.push(DaysRemaining {
                service_order_number: order.service_order_number.clone(),
                days: days_until_return(order.expected_return_date, now),
            });
        }
    }
    out
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Active orders:   {}", self.active)?;
        writeln!(f, "Archived orders: {}", self.archived)?;
        for status in Status::ALL {
            writeln!(f, "  {:<10} {}", status.label(), self.count(status))?;
        }
        if !self.days_remaining.is_empty() {
            writeln!(f, "Days remaining:")?;
            for point in &self.days_remaining {
                writeln!(f, "  {:<16} {:>4}", point.service_order_number, point.days)?;
            }
        }
        Ok(())
    }
}
