use std::fmt;

use crate::calendar::CalendarDate;
use crate::codec;
use crate::grid::{build_grid, CalendarCell, MonthGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn delta(self) -> i32 {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

pub type ChangeHandler = Box<dyn FnMut(&str)>;

/// Date picker state: the month being looked at (`cursor`) and the value
/// owned by the host.
///
/// The value is only ever changed by [`DatePicker::select_cell`] or by the
/// host through [`DatePicker::set_value`].
pub struct DatePicker {
    cursor: CalendarDate,
    value: String,
    grid: MonthGrid,
    visible: bool,
    on_change: Option<ChangeHandler>,
}

impl DatePicker {
    /// Seeds the cursor from `value`, falling back to `today` when `value` is
    /// empty or not a valid date.
    pub fn open(value: &str, today: CalendarDate) -> Self {
        let cursor = codec::parse(value).unwrap_or(today);

        DatePicker {
            cursor,
            value: value.to_owned(),
            grid: build_grid(&cursor),
            visible: false,
            on_change: None,
        }
    }

    pub fn on_change(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn cursor(&self) -> CalendarDate {
        self.cursor
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The committed date, if the current value is one.
    pub fn selected(&self) -> Option<CalendarDate> {
        codec::parse(&self.value)
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Replaces the value from the host side. The cursor stays where it is.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_owned();
    }

    pub fn navigate(&mut self, direction: Direction) {
        match self.cursor.shift_months(direction.delta()) {
            Some(cursor) => self.move_cursor(cursor),
            None => log::debug!("cannot move {:?} from {}", direction, self.cursor),
        }
    }

    /// Commits the date shown by `cell`, moves the cursor onto it and hides
    /// the picker. Returns the new value.
    pub fn select_cell(&mut self, cell: &CalendarCell) -> Option<String> {
        let date = match self.grid.resolve(cell) {
            Some(date) => date,
            None => {
                log::warn!("cell {} does not denote a supported date", cell.id());
                return None;
            }
        };

        let value = codec::format(&date);
        log::info!("selected {}", value);

        self.value = value.clone();
        self.move_cursor(date);
        self.hide();

        if let Some(handler) = self.on_change.as_mut() {
            handler(&value);
        }

        Some(value)
    }

    pub fn is_selected(&self, cell: &CalendarCell) -> bool {
        match (self.selected(), self.grid.resolve(cell)) {
            (Some(selected), Some(date)) => selected == date,
            _ => false,
        }
    }

    fn move_cursor(&mut self, cursor: CalendarDate) {
        if !cursor.same_month(&self.cursor) {
            self.grid = build_grid(&cursor);
        }
        self.cursor = cursor;
    }
}

impl fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("cursor", &self.cursor)
            .field("value", &self.value)
            .field("visible", &self.visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MonthOffset;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month - 1, day).expect("valid test date")
    }

    fn selected_cells(picker: &DatePicker) -> Vec<CalendarCell> {
        picker
            .grid()
            .cells()
            .iter()
            .filter(|c| picker.is_selected(c))
            .copied()
            .collect()
    }

    #[test]
    fn opens_on_value() {
        let picker = DatePicker::open("15.06.2024", date(2020, 1, 1));
        assert_eq!(picker.cursor(), date(2024, 6, 15));
        assert_eq!(picker.selected(), Some(date(2024, 6, 15)));
        assert!(!picker.is_visible());
    }

    #[test]
    fn opens_on_today_without_value() {
        let today = date(2026, 10, 16);
        for value in &["", "31.02.2024", "garbage"] {
            let picker = DatePicker::open(value, today);
            assert_eq!(picker.cursor(), today);
            assert_eq!(picker.selected(), None);
            assert!(selected_cells(&picker).is_empty());
        }
    }

    #[test]
    fn navigate_resets_day() {
        let mut picker = DatePicker::open("31.03.2024", date(2020, 1, 1));
        picker.navigate(Direction::Next);
        assert_eq!(picker.cursor(), date(2024, 4, 1));
        assert_eq!(picker.grid().month(), date(2024, 4, 1));
        assert_eq!(picker.value(), "31.03.2024");

        picker.navigate(Direction::Prev);
        picker.navigate(Direction::Prev);
        assert_eq!(picker.cursor(), date(2024, 2, 1));
    }

    #[test]
    fn navigate_across_years() {
        let mut picker = DatePicker::open("10.12.2023", date(2020, 1, 1));
        picker.navigate(Direction::Next);
        assert_eq!(picker.cursor(), date(2024, 1, 1));
        picker.navigate(Direction::Prev);
        picker.navigate(Direction::Prev);
        assert_eq!(picker.cursor(), date(2023, 11, 1));
    }

    #[test]
    fn navigate_stops_at_last_supported_month() {
        let mut picker = DatePicker::open("24.12.9999", date(2020, 1, 1));
        picker.navigate(Direction::Next);
        assert_eq!(picker.cursor(), date(9999, 12, 24));
    }

    #[test]
    fn highlights_selection_in_view() {
        let mut picker = DatePicker::open("15.06.2024", date(2020, 1, 1));
        assert_eq!(
            selected_cells(&picker),
            vec![CalendarCell::new(15, MonthOffset::Current)]
        );

        picker.navigate(Direction::Next);
        assert_eq!(picker.grid().month(), date(2024, 7, 1));
        assert!(selected_cells(&picker).is_empty());
    }

    #[test]
    fn highlights_selection_in_padding() {
        // 2024-08-01 was a Thursday, the August page starts with July 29..31
        let mut picker = DatePicker::open("30.07.2024", date(2020, 1, 1));
        picker.navigate(Direction::Next);
        assert_eq!(
            selected_cells(&picker),
            vec![CalendarCell::new(30, MonthOffset::Prev)]
        );
    }

    #[test]
    fn select_commits_and_notifies() {
        let committed = Rc::new(RefCell::new(Vec::new()));
        let sink = committed.clone();
        let mut picker = DatePicker::open("", date(2024, 2, 10))
            .on_change(move |value| sink.borrow_mut().push(value.to_owned()));
        picker.show();

        let cell = CalendarCell::new(29, MonthOffset::Current);
        assert_eq!(picker.select_cell(&cell), Some("29.02.2024".to_owned()));
        assert_eq!(picker.value(), "29.02.2024");
        assert_eq!(picker.cursor(), date(2024, 2, 29));
        assert!(!picker.is_visible());
        assert_eq!(*committed.borrow(), vec!["29.02.2024".to_owned()]);
        assert_eq!(selected_cells(&picker), vec![cell]);
    }

    #[test]
    fn selecting_padding_pages_the_view() {
        let mut picker = DatePicker::open("", date(2024, 2, 10));

        let prev = CalendarCell::new(30, MonthOffset::Prev);
        assert_eq!(picker.select_cell(&prev), Some("30.01.2024".to_owned()));
        assert_eq!(picker.grid().month(), date(2024, 1, 1));

        let next = CalendarCell::new(2, MonthOffset::Next);
        assert_eq!(picker.select_cell(&next), Some("02.02.2024".to_owned()));
        assert_eq!(picker.cursor(), date(2024, 2, 2));
    }

    #[test]
    fn selecting_unresolvable_cell_keeps_state() {
        let mut picker = DatePicker::open("01.12.9999", date(2020, 1, 1));
        let beyond = CalendarCell::new(9, MonthOffset::Next);
        assert_eq!(picker.select_cell(&beyond), None);
        assert_eq!(picker.value(), "01.12.9999");
    }

    #[test]
    fn host_value_does_not_move_cursor() {
        let mut picker = DatePicker::open("15.06.2024", date(2020, 1, 1));
        picker.set_value("01.01.2000");
        assert_eq!(picker.cursor(), date(2024, 6, 15));
        assert_eq!(picker.selected(), Some(date(2000, 1, 1)));
        assert!(selected_cells(&picker).is_empty());
    }
}
