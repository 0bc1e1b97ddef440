//! Sunday-first month grid layout.

use crate::calendar::month::YearMonth;
use chrono::Datelike;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const DAYS_PER_WEEK: u32 = 7;

/// Layout of one month in a 7-column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    /// Empty cells before day 1 (0 = month starts on Sunday).
    pub leading_blanks: u32,
    pub days_in_month: u32,
}

impl MonthGrid {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            leading_blanks: month.first_day().weekday().num_days_from_sunday(),
            days_in_month: month.days_in_month(),
        }
    }

    /// Blank cells followed by day numbers. The last row is not padded.
    pub fn cells(&self) -> Vec<Option<u32>> {
        let blanks = (0..self.leading_blanks).map(|_| None);
        let days = (1..=self.days_in_month).map(Some);
        blanks.chain(days).collect()
    }

    /// Blank cells plus day cells, without building them.
    pub fn cell_count(&self) -> u32 {
        self.leading_blanks + self.days_in_month
    }

    /// Number of 7-cell rows the month spans.
    pub fn weeks(&self) -> u32 {
        self.cell_count().div_ceil(DAYS_PER_WEEK)
    }
}

#[cfg(test)]
mod tests {
    use super::MonthGrid;
    use crate::calendar::month::YearMonth;

    #[test]
    fn february_2015_fits_exactly_four_rows() {
        let grid = MonthGrid::new(YearMonth::new(2015, 2).unwrap());
        assert_eq!(grid.leading_blanks, 0);
        assert_eq!(grid.days_in_month, 28);
        assert_eq!(grid.weeks(), 4);
    }

    #[test]
    fn cells_start_with_blanks_then_count_days() {
        let grid = MonthGrid::new(YearMonth::new(2024, 3).unwrap());
        let cells = grid.cells();
        assert_eq!(cells.len(), 5 + 31);
        assert_eq!(grid.cell_count(), 5 + 31);
        assert!(cells[..5].iter().all(Option::is_none));
        assert_eq!(cells[5], Some(1));
        assert_eq!(cells.last().copied(), Some(Some(31)));
        assert_eq!(grid.weeks(), 6);
    }
}
