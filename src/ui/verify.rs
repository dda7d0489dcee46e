use std::io::{self, Write};
use std::time::Duration;
use termion::event::Key;
use termion::{clear, cursor};

use crate::cmds::Cmd;
use crate::config::Config;
use crate::countdown::Countdown;
use crate::events::{Dispatcher, Event};
use crate::i18n::{t, translate};
use crate::input::{Focus, SmsCode, CODE_LENGTH};

const SECOND: Duration = Duration::from_secs(1);

/// SMS code entry with a resend countdown.
pub struct VerifyApp<'a> {
    config: &'a Config,
    phone: String,
    code: SmsCode,
    slot: usize,
    countdown: Countdown,
    elapsed: Duration,
    resent: u32,
    done: bool,
}

impl<'a> VerifyApp<'a> {
    pub fn new(config: &'a Config, phone: &str) -> Self {
        VerifyApp {
            config,
            phone: phone.to_owned(),
            code: SmsCode::new(),
            slot: 0,
            countdown: Countdown::new(config.resend_timeout),
            elapsed: Duration::from_secs(0),
            resent: 0,
            done: false,
        }
    }

    pub fn code(&self) -> &SmsCode {
        &self.code
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn resent(&self) -> u32 {
        self.resent
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn apply_focus(&mut self, focus: Focus) {
        match focus {
            Focus::Slot(slot) => self.slot = slot,
            Focus::Stay => {}
            Focus::Complete => {
                log::info!("verification code complete");
                self.done = true;
            }
        }
    }

    /// Advances the countdown by the time one tick stands for.
    pub fn tick(&mut self) {
        self.elapsed += self.config.tick_rate;
        while self.elapsed >= SECOND {
            self.elapsed -= SECOND;
            self.countdown.tick();
        }
    }

    pub fn type_text(&mut self, text: &str) {
        let focus = self.code.enter(self.slot, text);
        self.apply_focus(focus);
    }

    /// Returns `false` once the screen is done.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) if c.is_ascii_digit() => self.type_text(&c.to_string()),
            key => match self.config.cmd_for(&key) {
                Cmd::PrevDay => self.slot = self.slot.saturating_sub(1),
                Cmd::NextDay => self.slot = (self.slot + 1).min(CODE_LENGTH - 1),
                Cmd::Erase => {
                    let focus = self.code.backspace(self.slot);
                    self.apply_focus(focus);
                }
                Cmd::Resend => {
                    if self.countdown.resend() {
                        self.resent += 1;
                        self.code.clear();
                        self.slot = 0;
                        log::info!("code sent again to {}", self.phone);
                    }
                }
                Cmd::Exit => self.done = true,
                _ => {}
            },
        }

        !self.done
    }

    pub fn lines(&self) -> Vec<String> {
        let lang = self.config.language;
        let mut lines = vec![
            t(lang, "sms.title"),
            String::new(),
            t(lang, "sms.sent"),
            self.phone.clone(),
            String::new(),
            t(lang, "sms.code.label"),
            self.code.display(),
            format!("{}^", " ".repeat(self.slot * 2)),
            String::new(),
        ];

        let mut resend = t(lang, "sms.resend");
        if self.countdown.is_running() {
            resend.push(' ');
            resend.push_str(&translate(
                lang,
                "sms.timer",
                &[("seconds", &self.countdown.remaining())],
            ));
        }
        lines.push(resend);

        lines
    }

    fn draw<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", clear::All)?;
        for (row, line) in self.lines().iter().enumerate() {
            write!(out, "{}{}", cursor::Goto(1, row as u16 + 1), line)?;
        }
        out.flush()
    }

    /// Runs until the code is complete or the user quits. Returns the code.
    pub fn run<W: Write + ?Sized>(&mut self, dispatcher: &Dispatcher, out: &mut W) -> io::Result<Option<String>> {
        self.draw(out)?;

        while !self.done {
            match dispatcher.next() {
                Ok(Event::Input(key)) => {
                    self.handle_key(key);
                }
                Ok(Event::Tick) => self.tick(),
                Err(_) => break,
            }
            self.draw(out)?;
        }

        Ok(self.code.code())
    }
}
