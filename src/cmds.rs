use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Cmd {
    Noop,
    NextDay,
    PrevDay,
    NextWeek,
    PrevWeek,
    NextMonth,
    PrevMonth,
    Select,
    Resend,
    Erase,
    Exit,
}

impl Default for Cmd {
    fn default() -> Self {
        Cmd::Noop
    }
}
