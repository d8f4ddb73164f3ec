//! Departure / expected return / duration reconciliation.
//!
//! The three fields are kept consistent as any one of them is edited. Each
//! setter recomputes exactly one dependent field and never writes back to the
//! field being edited, so a UI wired to these setters cannot loop.
//!
//! | edited           | recomputed                         |
//! |------------------|------------------------------------|
//! | departure        | expected return (if duration set)  |
//! | duration         | expected return                    |
//! | expected return  | duration                           |

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::MIN_DURATION_DAYS;
use crate::error::ValidationError;

/// The date fields of a service order under edit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    departure: NaiveDate,
    expected_return: Option<NaiveDate>,
    duration: Option<u32>,
}

impl Schedule {
    /// A blank schedule departing on `departure`. No return date or duration.
    pub fn starting(departure: NaiveDate) -> Self {
        Self {
            departure,
            expected_return: None,
            duration: None,
        }
    }

    /// Rebuild a schedule from stored values, e.g. when editing an order.
    ///
    /// The stored duration is trusted as-is; callers that need it re-derived
    /// should go through [`Schedule::set_expected_return`].
    pub fn from_parts(departure: NaiveDate, expected_return: NaiveDate, duration: u32) -> Self {
        Self {
            departure,
            expected_return: Some(expected_return),
            duration: Some(duration),
        }
    }

    pub fn departure(&self) -> NaiveDate {
        self.departure
    }

    pub fn expected_return(&self) -> Option<NaiveDate> {
        self.expected_return
    }

    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    /// Change the departure date. When a duration is already set the expected
    /// return follows it; otherwise the return date is left as it was.
    ///
    /// Fails without mutating when the moved return date would leave the
    /// calendar range.
    pub fn set_departure(&mut self, departure: NaiveDate) -> Result<(), ValidationError> {
        let expected_return = match self.duration {
            Some(days) if i64::from(days) >= MIN_DURATION_DAYS => {
                Some(add_days(departure, days)?)
            }
            _ => self.expected_return,
        };
        self.departure = departure;
        self.expected_return = expected_return;
        Ok(())
    }

    /// Change the estimated duration and move the expected return with it.
    pub fn set_duration(&mut self, days: i64) -> Result<(), ValidationError> {
        if days < MIN_DURATION_DAYS {
            return Err(ValidationError::InvalidDuration(days));
        }
        let days = u32::try_from(days).map_err(|_| ValidationError::InvalidDuration(days))?;
        let expected_return = add_days(self.departure, days)?;
        self.duration = Some(days);
        self.expected_return = Some(expected_return);
        Ok(())
    }

    /// Same as [`Schedule::set_duration`] for a raw text field.
    pub fn set_duration_input(&mut self, raw: &str) -> Result<(), ValidationError> {
        let days: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ValidationError::UnparseableDuration(raw.to_string()))?;
        self.set_duration(days)
    }

    /// Change the expected return date and derive the duration from it.
    ///
    /// The return must fall strictly after departure.
    pub fn set_expected_return(&mut self, expected_return: NaiveDate) -> Result<(), ValidationError> {
        if expected_return <= self.departure {
            return Err(ValidationError::ReturnNotAfterDeparture {
                departure: self.departure,
                expected_return,
            });
        }
        let days = days_between(self.departure, expected_return);
        let days = u32::try_from(days).map_err(|_| ValidationError::InvalidDuration(days))?;
        self.expected_return = Some(expected_return);
        self.duration = Some(days);
        Ok(())
    }

    /// Both derived fields, once the schedule is complete and consistent.
    pub fn resolved(&self) -> Result<(NaiveDate, u32), ValidationError> {
        let expected_return = self.expected_return.ok_or(ValidationError::MissingReturnDate)?;
        if expected_return <= self.departure {
            return Err(ValidationError::ReturnNotAfterDeparture {
                departure: self.departure,
                expected_return,
            });
        }
        let duration = match self.duration {
            Some(days) if i64::from(days) >= MIN_DURATION_DAYS => days,
            Some(days) => return Err(ValidationError::InvalidDuration(i64::from(days))),
            None => {
                let days = days_between(self.departure, expected_return);
                u32::try_from(days).map_err(|_| ValidationError::InvalidDuration(days))?
            }
        };
        Ok((expected_return, duration))
    }
}

/// `from + days` calendar days, or an error past the end of the calendar.
pub fn add_days(from: NaiveDate, days: u32) -> Result<NaiveDate, ValidationError> {
    from.checked_add_days(Days::new(u64::from(days)))
        .ok_or(ValidationError::DateOutOfRange { from, days })
}

/// Whole calendar days from `from` to `to`. Calendar dates carry no time of
/// day, so the ceiling of the delta is the exact day count.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn duration_then_return_date() {
        let mut s = Schedule::starting(date(2024, 1, 1));
        s.set_duration(5).unwrap();
        assert_eq!(s.expected_return(), Some(date(2024, 1, 6)));

        s.set_expected_return(date(2024, 1, 11)).unwrap();
        assert_eq!(s.duration(), Some(10));
        assert_eq!(s.departure(), date(2024, 1, 1));
    }

    #[test]
    fn departure_moves_return_when_duration_set() {
        let mut s = Schedule::starting(date(2024, 1, 1));
        s.set_duration(7).unwrap();
        s.set_departure(date(2024, 2, 27)).unwrap();
        assert_eq!(s.expected_return(), Some(date(2024, 3, 5)));
        assert_eq!(s.duration(), Some(7));
    }

    #[test]
    fn departure_without_duration_leaves_return_stale() {
        let mut s = Schedule::starting(date(2024, 1, 1));
        s.set_departure(date(2024, 1, 3)).unwrap();
        assert_eq!(s.expected_return(), None);
        assert_eq!(s.duration(), None);
    }

    #[test]
    fn invalid_duration_does_not_mutate() {
        let mut s = Schedule::starting(date(2024, 1, 1));
        s.set_duration(3).unwrap();
        let before = s;

        assert_eq!(s.set_duration(0), Err(ValidationError::InvalidDuration(0)));
        assert_eq!(s.set_duration(-4), Err(ValidationError::InvalidDuration(-4)));
        assert!(matches!(
            s.set_duration_input("two"),
            Err(ValidationError::UnparseableDuration(_))
        ));
        assert_eq!(s, before);
    }

    #[test]
    fn duration_input_is_trimmed() {
        let mut s = Schedule::starting(date(2024, 1, 1));
        s.set_duration_input(" 12 ").unwrap();
        assert_eq!(s.expected_return(), Some(date(2024, 1, 13)));
    }

    #[test]
    fn return_must_follow_departure() {
        let mut s = Schedule::starting(date(2024, 1, 10));
        s.set_duration(2).unwrap();
        let before = s;

        assert!(s.set_expected_return(date(2024, 1, 10)).is_err());
        assert!(s.set_expected_return(date(2024, 1, 9)).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn forward_and_backward_are_inverse() {
        let departure = date(2023, 12, 20);
        for n in [1_i64, 2, 11, 29, 30, 31, 59, 365, 366] {
            let mut s = Schedule::starting(departure);
            s.set_duration(n).unwrap();
            let r = s.expected_return().unwrap();

            let mut back = Schedule::starting(departure);
            back.set_expected_return(r).unwrap();
            assert_eq!(back.duration(), Some(n as u32), "n = {n}");
        }
    }

    #[test]
    fn resolved_requires_return_date() {
        let s = Schedule::starting(date(2024, 1, 1));
        assert_eq!(s.resolved(), Err(ValidationError::MissingReturnDate));

        let s = Schedule::from_parts(date(2024, 1, 1), date(2024, 1, 4), 3);
        assert_eq!(s.resolved(), Ok((date(2024, 1, 4), 3)));
    }

    #[test]
    fn huge_duration_is_rejected_not_panicking() {
        let mut s = Schedule::starting(date(2024, 1, 1));
        s.set_duration(3).unwrap();
        let before = s;

        assert_eq!(
            s.set_duration(200_000_000),
            Err(ValidationError::DateOutOfRange {
                from: date(2024, 1, 1),
                days: 200_000_000,
            })
        );
        assert!(s.set_duration_input("4000000000").is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn departure_move_past_calendar_end_is_rejected() {
        let first = NaiveDate::MIN;
        let last = NaiveDate::MAX;
        let mut s = Schedule::starting(first);
        s.set_expected_return(last).unwrap();
        let before = s;

        assert!(matches!(
            s.set_departure(date(2024, 1, 1)),
            Err(ValidationError::DateOutOfRange { .. })
        ));
        assert_eq!(s, before);
    }
}
