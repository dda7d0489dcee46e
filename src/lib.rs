pub mod calendar;
pub mod cmds;
pub mod codec;
pub mod config;
pub mod countdown;
pub mod error;
pub mod events;
pub mod grid;
pub mod i18n;
pub mod input;
pub mod picker;
pub mod ui;

pub use calendar::CalendarDate;
pub use error::{Error, ErrorKind, Result};
pub use grid::{build_grid, CalendarCell, MonthGrid, MonthOffset};
pub use picker::{DatePicker, Direction};
