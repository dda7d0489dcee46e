use itertools::Itertools;
use termion::{color, style};

use crate::calendar::CalendarDate;
use crate::grid::{build_grid, CalendarCell, MonthGrid};
use crate::i18n::{self, Language};

/// Terminal escape sequence applied in front of a piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    prefix: String,
}

impl Style {
    pub fn fg<C: color::Color>(mut self, c: C) -> Self {
        self.prefix.push_str(&color::Fg(c).to_string());
        self
    }

    pub fn bg<C: color::Color>(mut self, c: C) -> Self {
        self.prefix.push_str(&color::Bg(c).to_string());
        self
    }

    pub fn bold(mut self) -> Self {
        self.prefix.push_str(&style::Bold.to_string());
        self
    }

    pub fn faint(mut self) -> Self {
        self.prefix.push_str(&style::Faint.to_string());
        self
    }

    pub fn paint(&self, text: &str) -> String {
        if self.prefix.is_empty() {
            text.to_owned()
        } else {
            format!("{}{}{}", self.prefix, text, style::Reset)
        }
    }
}

pub struct DayCell {
    day_num: u32,
    in_month: bool,
    selected: bool,
    focused: bool,
    is_today: bool,
}

impl DayCell {
    pub const WIDTH: usize = 4;

    pub fn new(cell: &CalendarCell) -> Self {
        DayCell {
            day_num: cell.day_number(),
            in_month: cell.month_offset().is_current(),
            selected: false,
            focused: false,
            is_today: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }

    fn text(&self, today_symbol: Option<char>) -> String {
        let (left, right) = if self.selected {
            ('[', ']')
        } else if self.focused {
            ('>', ' ')
        } else if self.is_today {
            (today_symbol.unwrap_or(' '), ' ')
        } else {
            (' ', ' ')
        };
        format!("{}{:>2}{}", left, self.day_num, right)
    }
}

/// Renders a [`MonthGrid`] as text lines: a title, the weekday header and six
/// week rows.
pub struct MonthView {
    language: Language,
    label_style: Style,
    header_style: Style,
    cell_style: Style,
    outside_style: Style,
    selected_style: Style,
    focus_style: Style,
    today_style: Style,
    today_symbol: Option<char>,
}

impl MonthView {
    pub fn new(language: Language) -> Self {
        MonthView {
            language,
            label_style: Style::default().bold(),
            header_style: Style::default().fg(color::Yellow),
            cell_style: Style::default(),
            outside_style: Style::default().faint(),
            selected_style: Style::default().bg(color::Red).fg(color::White).bold(),
            focus_style: Style::default().bg(color::Blue),
            today_style: Style::default().fg(color::Green),
            today_symbol: Some('*'),
        }
    }

    /// A view without any escape sequences.
    pub fn plain(language: Language) -> Self {
        MonthView {
            language,
            label_style: Style::default(),
            header_style: Style::default(),
            cell_style: Style::default(),
            outside_style: Style::default(),
            selected_style: Style::default(),
            focus_style: Style::default(),
            today_style: Style::default(),
            today_symbol: Some('*'),
        }
    }

    pub fn width(&self) -> usize {
        DayCell::WIDTH * crate::grid::DAYS_PER_WEEK
    }

    pub fn title(&self, grid: &MonthGrid) -> String {
        let month = grid.month();
        format!(
            "{} {}",
            i18n::month_name(self.language, month.month0()).unwrap_or("?"),
            month.year()
        )
    }

    fn cell_style(&self, day: &DayCell) -> &Style {
        if day.selected {
            &self.selected_style
        } else if day.focused {
            &self.focus_style
        } else if day.is_today {
            &self.today_style
        } else if !day.in_month {
            &self.outside_style
        } else {
            &self.cell_style
        }
    }

    /// `selected` is the committed date, `focus` a grid index.
    pub fn render(
        &self,
        grid: &MonthGrid,
        selected: Option<CalendarDate>,
        focus: Option<usize>,
        today: Option<CalendarDate>,
    ) -> Vec<String> {
        let title = self.title(grid);
        let pad = self.width().saturating_sub(title.chars().count()) / 2;
        let mut lines = vec![format!(
            "{}{}",
            " ".repeat(pad),
            self.label_style.paint(&title)
        )];

        let header = i18n::weekday_abbrevs(self.language)
            .iter()
            .map(|abbr| format!(" {:<width$}", abbr, width = DayCell::WIDTH - 1))
            .join("");
        lines.push(self.header_style.paint(&header));

        for (week_idx, week) in grid.weeks().enumerate() {
            let row = week
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let index = week_idx * crate::grid::DAYS_PER_WEEK + i;
                    let date = grid.resolve(cell);
                    let day = DayCell::new(cell)
                        .selected(date.is_some() && date == selected)
                        .focused(focus == Some(index))
                        .today(date.is_some() && date == today);
                    self.cell_style(&day).paint(&day.text(self.today_symbol))
                })
                .join("");
            lines.push(row);
        }

        lines
    }

    /// Renders the month of `date`, or the current month when there is none.
    /// Only an explicit `date` is drawn as selected.
    pub fn render_month(&self, date: Option<CalendarDate>, today: CalendarDate) -> Vec<String> {
        let grid = build_grid(&date.unwrap_or(today));
        self.render(&grid, date, None, Some(today))
    }
}
