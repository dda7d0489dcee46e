pub mod month;
pub mod picker;
pub mod verify;

pub use month::{MonthView, Style};
pub use picker::PickerApp;
pub use verify::VerifyApp;
