use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use termion::event::Key;

use crate::cmds::Cmd;
use crate::countdown::DEFAULT_RESEND_TIMEOUT;
use crate::error::{Error, ErrorKind, Result};
use crate::i18n::Language;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "ONBOARD_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("onboard").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".onboard.toml"));
    }

    locations
}

/// Loads the config from `path` if given, otherwise from the first existing
/// default location. Falls back to the default config if there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    match find_configfile_locations().into_iter().find(|p| p.is_file()) {
        Some(path) => Config::from_file(&path),
        None => {
            log::info!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn parse_key(name: &str) -> Result<Key> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Key::Char(c));
    }

    let lower = name.to_lowercase();
    let key = match lower.as_str() {
        "enter" | "return" => Key::Char('\n'),
        "space" => Key::Char(' '),
        "tab" => Key::Char('\t'),
        "esc" | "escape" => Key::Esc,
        "backspace" => Key::Backspace,
        "delete" => Key::Delete,
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        other => {
            let modified = |prefix: &str| {
                other.strip_prefix(prefix).and_then(|rest| {
                    let mut chars = rest.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(c),
                        _ => None,
                    }
                })
            };

            if let Some(c) = modified("ctrl-") {
                Key::Ctrl(c)
            } else if let Some(c) = modified("alt-") {
                Key::Alt(c)
            } else {
                return Err(Error::new(
                    ErrorKind::KeyParse,
                    &format!("unknown key '{}'", name),
                ));
            }
        }
    };

    Ok(key)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    language: Option<Language>,
    /// milliseconds
    tick_rate: Option<u64>,
    /// seconds
    resend_timeout: Option<u64>,
    keys: HashMap<String, Cmd>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub language: Language,
    pub tick_rate: Duration,
    pub resend_timeout: Duration,
    pub key_map: KeyMap,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            language: Language::detect(),
            tick_rate: Duration::from_millis(1000),
            resend_timeout: DEFAULT_RESEND_TIMEOUT,
            key_map: HashMap::new(),
        };

        config.key_map.insert(Key::Char('l'), Cmd::NextDay);
        config.key_map.insert(Key::Right, Cmd::NextDay);
        config.key_map.insert(Key::Char('h'), Cmd::PrevDay);
        config.key_map.insert(Key::Left, Cmd::PrevDay);
        config.key_map.insert(Key::Char('j'), Cmd::NextWeek);
        config.key_map.insert(Key::Down, Cmd::NextWeek);
        config.key_map.insert(Key::Char('k'), Cmd::PrevWeek);
        config.key_map.insert(Key::Up, Cmd::PrevWeek);
        config.key_map.insert(Key::Char('n'), Cmd::NextMonth);
        config.key_map.insert(Key::Char(']'), Cmd::NextMonth);
        config.key_map.insert(Key::Char('p'), Cmd::PrevMonth);
        config.key_map.insert(Key::Char('['), Cmd::PrevMonth);
        config.key_map.insert(Key::Char('\n'), Cmd::Select);
        config.key_map.insert(Key::Char('r'), Cmd::Resend);
        config.key_map.insert(Key::Backspace, Cmd::Erase);
        config.key_map.insert(Key::Char('q'), Cmd::Exit);
        config.key_map.insert(Key::Esc, Cmd::Exit);
        config.key_map.insert(Key::Ctrl('c'), Cmd::Exit);

        config
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        log::info!("loading config from '{}'", path.display());
        let content = fs::read_to_string(path).map_err(|err| {
            let msg = format!("{} ({})", err, path.display());
            Error::from(err).with_msg(&msg)
        })?;
        Config::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(language) = file.language {
            config.language = language;
        }

        if let Some(ms) = file.tick_rate {
            if ms == 0 {
                return Err(Error::new(ErrorKind::ConfigParse, "tick_rate must be positive"));
            }
            config.tick_rate = Duration::from_millis(ms);
        }

        if let Some(secs) = file.resend_timeout {
            config.resend_timeout = Duration::from_secs(secs);
        }

        for (name, cmd) in file.keys {
            let key = parse_key(&name)?;
            if let Some(old) = config.key_map.insert(key, cmd) {
                log::debug!("key '{}' rebound from {:?} to {:?}", name, old, cmd);
            }
        }

        Ok(config)
    }

    pub fn cmd_for(&self, key: &Key) -> Cmd {
        self.key_map.get(key).copied().unwrap_or_default()
    }

    /// First key bound to `cmd`, for help texts.
    pub fn key_for(&self, cmd: Cmd) -> Option<Key> {
        let mut keys: Vec<&Key> = self
            .key_map
            .iter()
            .filter(|(_, c)| **c == cmd)
            .map(|(k, _)| k)
            .collect();
        keys.sort_by_key(|k| key_name(k));
        keys.first().map(|k| **k)
    }
}

pub fn key_name(key: &Key) -> String {
    match key {
        Key::Char('\n') => "Enter".to_owned(),
        Key::Char(' ') => "Space".to_owned(),
        Key::Char(c) => c.to_string(),
        Key::Ctrl(c) => format!("Ctrl-{}", c),
        Key::Alt(c) => format!("Alt-{}", c),
        other => format!("{:?}", other),
    }
}
