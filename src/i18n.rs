//! Localized display strings.
//!
//! Every table exists once per [`Language`]. Lookups never fail: unknown
//! translation keys are echoed back unchanged.

use nom::{
    bytes::complete::{take_until, take_while1},
    character::complete::char,
    sequence::delimited,
    IResult,
};
use phf::phf_map;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// Picks the language from the usual locale variables. Russian locales
    /// map to [`Language::Ru`], everything else to [`Language::En`].
    pub fn detect() -> Self {
        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty());

        match locale {
            Some(locale) => Language::from_locale(&locale),
            None => Language::En,
        }
    }

    pub fn from_locale(locale: &str) -> Self {
        if locale.to_lowercase().starts_with("ru") {
            Language::Ru
        } else {
            Language::En
        }
    }

    fn table(self) -> &'static phf::Map<&'static str, &'static str> {
        match self {
            Language::Ru => &RU,
            Language::En => &EN,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::detect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            _ => Err(Error::new(
                ErrorKind::LanguageParse,
                &format!("'{}' (expected 'ru' or 'en')", s),
            )),
        }
    }
}

const MONTH_NAMES_RU: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
    "Октябрь", "Ноябрь", "Декабрь",
];

const MONTH_NAMES_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const WEEKDAYS_RU: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];
const WEEKDAYS_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Name of the 0-based month.
pub fn month_name(lang: Language, month0: u32) -> Option<&'static str> {
    let names = match lang {
        Language::Ru => &MONTH_NAMES_RU,
        Language::En => &MONTH_NAMES_EN,
    };
    names.get(month0 as usize).copied()
}

/// Weekday abbreviations, Monday first.
pub fn weekday_abbrevs(lang: Language) -> &'static [&'static str; 7] {
    match lang {
        Language::Ru => &WEEKDAYS_RU,
        Language::En => &WEEKDAYS_EN,
    }
}

static RU: phf::Map<&'static str, &'static str> = phf_map! {
    "auth.subtitle" => "Зарегистрируйтесь\nили войдите в аккаунт",
    "auth.login" => "Вход",
    "auth.register" => "Регистрация",
    "auth.phone" => "Номер телефона",
    "auth.email" => "Электронная почта",
    "auth.email.placeholder" => "Введите почту",
    "auth.birthdate" => "Дата рождения",
    "auth.birthdate.placeholder" => "14.01.1999",
    "auth.gender" => "Пол",
    "auth.gender.female" => "Женский",
    "auth.gender.male" => "Мужской",
    "common.continue" => "Продолжить",
    "common.back" => "Назад",
    "picker.invalid" => "Некорректная дата: {value}",
    "picker.hint" => "{prev}/{next} месяц, стрелки - день, Enter - выбрать, {exit} - выход",
    "sms.title" => "Введите код из СМС",
    "sms.sent" => "Отправили секретный код на номер",
    "sms.code.label" => "Введите код здесь",
    "sms.resend" => "Отправить повторно",
    "sms.confirm" => "Подтвердить",
    "sms.timer" => "({seconds}с)",
    "sms.success.title" => "Регистрация завершена!",
    "sms.success.subtitle" => "Поздравляем, теперь вам доступны все возможности приложения",
    "sms.success.button" => "Отлично",
    "welcome.page" => "Welcome Page {number}",
    "welcome.skip" => "Пропустить",
    "welcome.next" => "Далее",
    "welcome.start" => "Начать",
};

static EN: phf::Map<&'static str, &'static str> = phf_map! {
    "auth.subtitle" => "Sign up\nor log in to your account",
    "auth.login" => "Log in",
    "auth.register" => "Sign up",
    "auth.phone" => "Phone number",
    "auth.email" => "Email",
    "auth.email.placeholder" => "Enter email",
    "auth.birthdate" => "Date of birth",
    "auth.birthdate.placeholder" => "DD.MM.YYYY",
    "auth.gender" => "Gender",
    "auth.gender.female" => "Female",
    "auth.gender.male" => "Male",
    "common.continue" => "Continue",
    "common.back" => "Back",
    "picker.invalid" => "Invalid date: {value}",
    "picker.hint" => "{prev}/{next} month, arrows move, Enter selects, {exit} quits",
    "sms.title" => "Enter the SMS code",
    "sms.sent" => "We sent a secret code to",
    "sms.code.label" => "Enter code here",
    "sms.resend" => "Send again",
    "sms.confirm" => "Confirm",
    "sms.timer" => "({seconds}s)",
    "sms.success.title" => "Registration completed!",
    "sms.success.subtitle" => "Congrats, you now have full access to the app features",
    "sms.success.button" => "Great",
    "welcome.page" => "Welcome Page {number}",
    "welcome.skip" => "Skip",
    "welcome.next" => "Next",
    "welcome.start" => "Start",
};

fn placeholder(input: &str) -> IResult<&str, &str> {
    delimited(
        char('{'),
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        char('}'),
    )(input)
}

fn interpolate(template: &str, params: &[(&str, &dyn fmt::Display)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let (tail, literal) = match take_until::<_, _, ()>("{")(rest) {
            Ok(parts) => parts,
            Err(_) => {
                out.push_str(rest);
                return out;
            }
        };
        out.push_str(literal);

        match placeholder(tail) {
            Ok((after, name)) => {
                if let Some((_, value)) = params.iter().find(|(key, _)| *key == name) {
                    out.push_str(&value.to_string());
                }
                rest = after;
            }
            Err(_) => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
}

/// Looks up `key` and substitutes `{name}` placeholders from `params`.
/// Placeholders without a matching parameter are dropped.
pub fn translate(lang: Language, key: &str, params: &[(&str, &dyn fmt::Display)]) -> String {
    match lang.table().get(key) {
        Some(template) => interpolate(template, params),
        None => {
            log::debug!("no '{}' translation for '{}'", lang, key);
            interpolate(key, params)
        }
    }
}

/// Looks up `key` without substitution; placeholders stay as written.
pub fn t(lang: Language, key: &str) -> String {
    match lang.table().get(key) {
        Some(template) => (*template).to_owned(),
        None => {
            log::debug!("no '{}' translation for '{}'", lang, key);
            key.to_owned()
        }
    }
}
