use chrono::{Duration, NaiveDate};
use std::io::{self, Write};
use termion::{clear, cursor};

use crate::calendar::CalendarDate;
use crate::cmds::Cmd;
use crate::config::{key_name, Config};
use crate::events::{Dispatcher, Event};
use crate::i18n::{self, translate};
use crate::picker::{DatePicker, Direction};

use super::month::MonthView;

/// Interactive front end of a [`DatePicker`].
///
/// Keeps a focused day the keyboard moves around; the picker itself only
/// sees month navigation and cell selection.
pub struct PickerApp<'a> {
    config: &'a Config,
    picker: DatePicker,
    focus: CalendarDate,
    today: CalendarDate,
    view: MonthView,
    committed: Option<String>,
}

impl<'a> PickerApp<'a> {
    pub fn new(config: &'a Config, value: &str, today: CalendarDate) -> Self {
        let picker = DatePicker::open(value, today);
        let focus = picker.cursor();

        PickerApp {
            config,
            picker,
            focus,
            today,
            view: MonthView::new(config.language),
            committed: None,
        }
    }

    pub fn with_view(mut self, view: MonthView) -> Self {
        self.view = view;
        self
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    pub fn focus(&self) -> CalendarDate {
        self.focus
    }

    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    fn move_focus(&mut self, days: i64) {
        let moved = NaiveDate::from(self.focus)
            .checked_add_signed(Duration::days(days))
            .and_then(CalendarDate::from_naive);

        let focus = match moved {
            Some(focus) => focus,
            None => return,
        };

        if !focus.same_month(&self.picker.grid().month()) {
            let direction = if focus > self.focus {
                Direction::Next
            } else {
                Direction::Prev
            };
            self.picker.navigate(direction);
        }

        if focus.same_month(&self.picker.grid().month()) {
            self.focus = focus;
        }
    }

    fn navigate(&mut self, direction: Direction) {
        self.picker.navigate(direction);
        let month = self.picker.grid().month();
        let day = self.focus.day().min(month.days_in_month());
        self.focus = CalendarDate::new(month.year(), month.month0(), day).unwrap_or(month);
    }

    fn select(&mut self) {
        let cell = self
            .picker
            .grid()
            .position_of(&self.focus)
            .and_then(|pos| self.picker.grid().get(pos).copied());

        if let Some(cell) = cell {
            if let Some(value) = self.picker.select_cell(&cell) {
                self.committed = Some(value);
            }
        }
    }

    /// Applies `cmd`. Returns `false` once the picker is done.
    pub fn handle(&mut self, cmd: Cmd) -> bool {
        match cmd {
            Cmd::NextDay => self.move_focus(1),
            Cmd::PrevDay => self.move_focus(-1),
            Cmd::NextWeek => self.move_focus(7),
            Cmd::PrevWeek => self.move_focus(-7),
            Cmd::NextMonth => self.navigate(Direction::Next),
            Cmd::PrevMonth => self.navigate(Direction::Prev),
            Cmd::Select => self.select(),
            Cmd::Exit => self.picker.hide(),
            Cmd::Noop | Cmd::Resend | Cmd::Erase => {}
        }

        self.picker.is_visible()
    }

    pub fn lines(&self) -> Vec<String> {
        let grid = self.picker.grid();
        let mut lines = self.view.render(
            grid,
            self.picker.selected(),
            grid.position_of(&self.focus),
            Some(self.today),
        );

        let name = |cmd| self.config.key_for(cmd).map(|k| key_name(&k)).unwrap_or_default();
        lines.push(String::new());
        lines.push(translate(
            self.config.language,
            "picker.hint",
            &[
                ("prev", &name(Cmd::PrevMonth)),
                ("next", &name(Cmd::NextMonth)),
                ("exit", &name(Cmd::Exit)),
            ],
        ));

        if !self.picker.value().is_empty() && self.picker.selected().is_none() {
            lines.push(translate(
                self.config.language,
                "picker.invalid",
                &[("value", &self.picker.value())],
            ));
        } else {
            lines.push(format!(
                "{}: {}",
                i18n::t(self.config.language, "auth.birthdate"),
                self.picker.value()
            ));
        }

        lines
    }

    fn draw<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", clear::All)?;
        for (row, line) in self.lines().iter().enumerate() {
            write!(out, "{}{}", cursor::Goto(1, row as u16 + 1), line)?;
        }
        out.flush()
    }

    /// Runs until a date is picked or the user quits. Returns the committed
    /// value, if any.
    pub fn run<W: Write + ?Sized>(&mut self, dispatcher: &Dispatcher, out: &mut W) -> io::Result<Option<String>> {
        self.picker.show();
        self.draw(out)?;

        while self.picker.is_visible() {
            match dispatcher.next() {
                Ok(Event::Input(key)) => {
                    let cmd = self.config.cmd_for(&key);
                    log::debug!("{:?} -> {:?}", key, cmd);
                    if !self.handle(cmd) {
                        break;
                    }
                }
                Ok(Event::Tick) => continue,
                Err(_) => break,
            }
            self.draw(out)?;
        }

        Ok(self.committed.clone())
    }
}
