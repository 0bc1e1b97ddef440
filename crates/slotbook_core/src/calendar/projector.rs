//! Per-day occupancy projection.
//!
//! An interval occupies every calendar date from its start date through its
//! end date, inclusive. Time of day is ignored.

use crate::calendar::grid::MonthGrid;
use crate::calendar::month::YearMonth;
use crate::calendar::CalendarError;
use crate::model::interval::Interval;
use crate::schedule::schedule_set::ScheduleSet;
use chrono::NaiveDate;

/// One cell of the calendar view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell<'a> {
    /// Padding before day 1.
    Blank,
    Day {
        day: u32,
        date: NaiveDate,
        /// Occupants in `ScheduleSet` order.
        occupants: Vec<&'a Interval>,
    },
}

/// Intervals occupying `year-month-day`, in set order.
pub fn occupants_of(
    existing: &ScheduleSet,
    year: i32,
    month: u32,
    day: u32,
) -> Result<Vec<&Interval>, CalendarError> {
    let date = YearMonth::new(year, month)?.day(day)?;
    Ok(occupants_on(existing, date))
}

/// Intervals occupying `date`, in set order.
pub fn occupants_on(existing: &ScheduleSet, date: NaiveDate) -> Vec<&Interval> {
    existing
        .iter()
        .filter(|interval| interval.occupies(date))
        .collect()
}

/// Builds every cell of the month view: leading blanks, then one cell per day.
pub fn project_month(existing: &ScheduleSet, month: YearMonth) -> Vec<CalendarCell<'_>> {
    let grid = MonthGrid::new(month);
    let mut cells = Vec::with_capacity(grid.cell_count() as usize);
    cells.extend((0..grid.leading_blanks).map(|_| CalendarCell::Blank));

    let mut date = month.first_day();
    for day in 1..=grid.days_in_month {
        cells.push(CalendarCell::Day {
            day,
            date,
            occupants: occupants_on(existing, date),
        });
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::{occupants_of, project_month, CalendarCell};
    use crate::calendar::month::YearMonth;
    use crate::calendar::CalendarError;
    use crate::model::interval::Interval;
    use crate::schedule::schedule_set::ScheduleSet;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid instant")
    }

    #[test]
    fn occupants_of_rejects_invalid_dates() {
        let set = ScheduleSet::new();
        assert_eq!(
            occupants_of(&set, 2024, 2, 30).unwrap_err(),
            CalendarError::InvalidDate {
                year: 2024,
                month: 2,
                day: 30,
            }
        );
        assert_eq!(
            occupants_of(&set, 2024, 13, 1).unwrap_err(),
            CalendarError::InvalidMonth(13)
        );
    }

    #[test]
    fn project_month_includes_intervals_spilling_in_from_previous_month() {
        let set = ScheduleSet::new().inserted(
            Interval::from_parts(1, "Mike Johnson", at(2, 28, 20), at(3, 2, 8)).unwrap(),
        );
        let cells = project_month(&set, YearMonth::new(2024, 3).unwrap());

        let occupied_days = cells
            .iter()
            .filter_map(|cell| match cell {
                CalendarCell::Day { day, occupants, .. } if !occupants.is_empty() => Some(*day),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(occupied_days, vec![1, 2]);
        assert!(matches!(cells[0], CalendarCell::Blank));
    }
}
