use derive_more::Display;

use crate::calendar::{days_in_month, weekday_from_monday, CalendarDate};

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS: usize = 6;
pub const CELLS: usize = DAYS_PER_WEEK * WEEKS;

/// Which month a cell of a [`MonthGrid`] actually belongs to.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthOffset {
    #[display(fmt = "p")]
    Prev,
    #[display(fmt = "c")]
    Current,
    #[display(fmt = "n")]
    Next,
}

impl MonthOffset {
    pub fn delta(self) -> i32 {
        match self {
            MonthOffset::Prev => -1,
            MonthOffset::Current => 0,
            MonthOffset::Next => 1,
        }
    }

    pub fn is_current(self) -> bool {
        matches!(self, MonthOffset::Current)
    }
}

/// Identity of a cell, unique within one grid (`p-29`, `c-1`, `n-3`, ...).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "{}-{}", offset, day)]
pub struct CellId {
    offset: MonthOffset,
    day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarCell {
    day: u32,
    offset: MonthOffset,
}

impl CalendarCell {
    pub fn new(day: u32, offset: MonthOffset) -> Self {
        CalendarCell { day, offset }
    }

    pub fn id(&self) -> CellId {
        CellId {
            offset: self.offset,
            day: self.day,
        }
    }

    pub fn identity(&self) -> String {
        self.id().to_string()
    }

    pub fn day_number(&self) -> u32 {
        self.day
    }

    pub fn month_offset(&self) -> MonthOffset {
        self.offset
    }
}

/// One visible calendar page: six Monday-first weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: CalendarDate,
    cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// First day of the month this grid was built for.
    pub fn month(&self) -> CalendarDate {
        self.month
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&CalendarCell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Absolute date a cell stands for, relative to the month of this grid.
    pub fn resolve(&self, cell: &CalendarCell) -> Option<CalendarDate> {
        self.month
            .with_month_offset(cell.month_offset().delta(), cell.day_number())
    }

    /// Index of the cell showing `date`, if it is visible on this page.
    pub fn position_of(&self, date: &CalendarDate) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| self.resolve(cell).as_ref() == Some(date))
    }

    pub fn current_range(&self) -> std::ops::Range<usize> {
        let start = self
            .cells
            .iter()
            .position(|c| c.month_offset().is_current())
            .unwrap_or(0);
        start..start + self.month.days_in_month() as usize
    }
}

/// Builds the page for the month of `reference`. The day of `reference` is
/// ignored.
pub fn build_grid(reference: &CalendarDate) -> MonthGrid {
    let month = reference.first_of_month();
    let start_weekday = weekday_from_monday(month.year(), month.month0(), 1);
    let days = month.days_in_month();
    let days_prev = days_in_month(month.year(), month.month0() as i32 - 1);

    let prev = (days_prev - start_weekday + 1..=days_prev)
        .map(|day| CalendarCell::new(day, MonthOffset::Prev));
    let current = (1..=days).map(|day| CalendarCell::new(day, MonthOffset::Current));
    let next = (1..).map(|day| CalendarCell::new(day, MonthOffset::Next));

    let cells: Vec<CalendarCell> = prev.chain(current).chain(next).take(CELLS).collect();

    log::debug!(
        "built grid for {}-{:02}: {} leading, {} trailing cells",
        month.year(),
        month.month(),
        start_weekday,
        CELLS as u32 - start_weekday - days
    );

    MonthGrid { month, cells }
}
