use itertools::Itertools;

/// Digits of a full phone number including the country code.
pub const PHONE_DIGITS: usize = 11;
pub const PHONE_PLACEHOLDER: &str = "+ 7 (999) 999-99-99";

/// Formats free phone input as `+ 7 (XXX) XXX-XX-XX`.
///
/// Only digits are kept. A leading `8` is read as the trunk prefix and
/// replaced by the country code `7`, any other start gets `7` prepended.
/// The mask grows with the number of digits typed so far.
pub fn mask_phone(text: &str) -> String {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    let normalized = if let Some(rest) = digits.strip_prefix('8') {
        format!("7{}", rest)
    } else if digits.starts_with('7') {
        digits
    } else {
        format!("7{}", digits)
    };

    let rest: Vec<char> = normalized.chars().take(PHONE_DIGITS).skip(1).collect();
    let part = |from: usize, to: usize| -> String {
        rest[from.min(rest.len())..to.min(rest.len())].iter().collect()
    };

    let mut masked = String::from("+ 7");
    if !rest.is_empty() {
        masked.push_str(" (");
        masked.push_str(&part(0, 3));
    }
    if rest.len() >= 3 {
        masked.push(')');
    }
    if rest.len() > 3 {
        masked.push(' ');
        masked.push_str(&part(3, 6));
    }
    if rest.len() > 6 {
        masked.push('-');
        masked.push_str(&part(6, 8));
    }
    if rest.len() > 8 {
        masked.push('-');
        masked.push_str(&part(8, 10));
    }

    masked
}

pub const CODE_LENGTH: usize = 4;

/// Where input focus goes after editing a code slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Slot(usize),
    Stay,
    Complete,
}

/// The verification code, typed into one slot per digit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsCode {
    slots: [Option<char>; CODE_LENGTH],
}

impl SmsCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The full code once every slot holds a digit.
    pub fn code(&self) -> Option<String> {
        self.slots.iter().copied().collect::<Option<String>>()
    }

    pub fn clear(&mut self) {
        self.slots = [None; CODE_LENGTH];
    }

    /// Writes `text` starting at slot `index`.
    ///
    /// Non-digits are dropped. Input without digits clears the slot, several
    /// digits (a pasted code) fill the following slots.
    pub fn enter(&mut self, index: usize, text: &str) -> Focus {
        if index >= CODE_LENGTH {
            return Focus::Stay;
        }

        let digits: Vec<char> = text.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            self.slots[index] = None;
            return Focus::Stay;
        }

        for (slot, digit) in self.slots[index..].iter_mut().zip(digits.iter()) {
            *slot = Some(*digit);
        }

        if let Some(empty) = (index + 1..CODE_LENGTH).find(|&i| self.slots[i].is_none()) {
            Focus::Slot(empty)
        } else if self.is_complete() {
            Focus::Complete
        } else {
            let next = (index + digits.len()).min(CODE_LENGTH - 1);
            if self.slots[next].is_none() {
                Focus::Slot(next)
            } else {
                Focus::Stay
            }
        }
    }

    /// Backspace on an already empty slot moves focus to the previous one.
    pub fn backspace(&mut self, index: usize) -> Focus {
        match self.slot(index) {
            Some(_) => {
                self.slots[index] = None;
                Focus::Stay
            }
            None if index > 0 && index < CODE_LENGTH => Focus::Slot(index - 1),
            None => Focus::Stay,
        }
    }

    /// Slots rendered for display, `_` marking empty ones.
    pub fn display(&self) -> String {
        self.slots.iter().map(|s| s.unwrap_or('_')).join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_progressively() {
        assert_eq!(mask_phone(""), "");
        assert_eq!(mask_phone("abc"), "");
        assert_eq!(mask_phone("7"), "+ 7");
        assert_eq!(mask_phone("79"), "+ 7 (9");
        assert_eq!(mask_phone("7999"), "+ 7 (999)");
        assert_eq!(mask_phone("79991"), "+ 7 (999) 1");
        assert_eq!(mask_phone("7999123"), "+ 7 (999) 123");
        assert_eq!(mask_phone("79991234"), "+ 7 (999) 123-4");
        assert_eq!(mask_phone("799912345"), "+ 7 (999) 123-45");
        assert_eq!(mask_phone("7999123456"), "+ 7 (999) 123-45-6");
        assert_eq!(mask_phone("79991234567"), "+ 7 (999) 123-45-67");
    }

    #[test]
    fn normalizes_prefix() {
        assert_eq!(mask_phone("89991234567"), "+ 7 (999) 123-45-67");
        assert_eq!(mask_phone("9991234567"), "+ 7 (999) 123-45-67");
        assert_eq!(mask_phone("+7 (999) 123-45-67"), "+ 7 (999) 123-45-67");
    }

    #[test]
    fn truncates_extra_digits() {
        assert_eq!(mask_phone("7999123456789"), "+ 7 (999) 123-45-67");
    }

    #[test]
    fn remasking_is_stable() {
        let once = mask_phone("8 999 123 45 67");
        assert_eq!(mask_phone(&once), once);
    }

    #[test]
    fn code_entry_moves_focus() {
        let mut code = SmsCode::new();
        assert_eq!(code.enter(0, "1"), Focus::Slot(1));
        assert_eq!(code.enter(1, "x2"), Focus::Slot(2));
        assert_eq!(code.enter(2, "3"), Focus::Slot(3));
        assert_eq!(code.code(), None);
        assert_eq!(code.enter(3, "4"), Focus::Complete);
        assert_eq!(code.code(), Some("1234".to_owned()));
        assert_eq!(code.display(), "1 2 3 4");
    }

    #[test]
    fn pasted_code_fills_slots() {
        let mut code = SmsCode::new();
        assert_eq!(code.enter(0, "98765"), Focus::Complete);
        assert_eq!(code.code(), Some("9876".to_owned()));

        let mut code = SmsCode::new();
        assert_eq!(code.enter(1, "55"), Focus::Slot(3));
        assert_eq!(code.display(), "_ 5 5 _");
    }

    #[test]
    fn late_slot_with_gap_before() {
        let mut code = SmsCode::new();
        assert_eq!(code.enter(3, "1"), Focus::Stay);
        assert_eq!(code.slot(3), Some('1'));
        assert!(!code.is_complete());
    }

    #[test]
    fn clearing_and_backspace() {
        let mut code = SmsCode::new();
        code.enter(0, "12");
        assert_eq!(code.enter(1, ""), Focus::Stay);
        assert_eq!(code.slot(1), None);
        assert_eq!(code.backspace(1), Focus::Slot(0));
        assert_eq!(code.backspace(0), Focus::Stay);
        assert_eq!(code.slot(0), None);
        assert_eq!(code.backspace(0), Focus::Stay);
        assert_eq!(code.enter(7, "1"), Focus::Stay);
    }
}
