extern crate onboard as lib;

use flexi_logger::{FileSpec, Logger};
use lib::calendar::CalendarDate;
use lib::config::Config;
use lib::events::Dispatcher;
use lib::i18n::{self, Language};
use lib::ui::{MonthView, PickerApp, VerifyApp};
use lib::{codec, input};
use nix::sys::termios;
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "onb",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Onboarding - date picker and sign-up inputs in the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(short = "l", long = "language", help = "display language (ru, en)")]
    pub language: Option<Language>,

    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Validates a DD.MM.YYYY date and prints it normalized
    Parse { text: String },
    /// Prints the month view of a date (today by default)
    Grid {
        #[structopt(short = "d", long = "date")]
        date: Option<CalendarDate>,
    },
    /// Picks a date interactively and prints it
    Pick {
        #[structopt(short = "v", long = "value", default_value = "")]
        value: String,
    },
    /// Prints a phone number in the input mask
    Phone { text: String },
    /// Enters an SMS verification code interactively
    Verify {
        #[structopt(short = "p", long = "phone")]
        phone: Option<String>,
    },
}

fn init_logger(log_file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;
    Ok(())
}

fn install_panic_hook() -> Result<(), Box<dyn std::error::Error>> {
    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDIN)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("onb ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    Ok(())
}

fn run_interactive<T>(
    config: &Config,
    app: impl FnOnce(&Dispatcher, &mut dyn Write) -> std::io::Result<T>,
) -> Result<T, Box<dyn std::error::Error>> {
    install_panic_hook()?;

    let dispatcher = Dispatcher::from_config(config);
    let result = {
        let stdout = stdout().into_raw_mode()?;
        let mut screen = AlternateScreen::from(stdout);
        write!(screen, "{}", termion::cursor::Hide)?;
        let result = app(&dispatcher, &mut screen);
        write!(screen, "{}", termion::cursor::Show)?;
        screen.flush()?;
        result
    };

    Ok(result?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    init_logger(args.log_file)?;

    let mut config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    if let Some(language) = args.language {
        config.language = language;
    }

    match args.cmd {
        Command::Parse { text } => match codec::parse(&text) {
            Some(date) => println!("{}", date),
            None => {
                eprintln!(
                    "{}",
                    i18n::translate(config.language, "picker.invalid", &[("value", &text)])
                );
                process::exit(1);
            }
        },
        Command::Grid { date } => {
            let view = MonthView::new(config.language);
            for line in view.render_month(date, CalendarDate::today()) {
                println!("{}", line);
            }
        }
        Command::Pick { value } => {
            let mut app = PickerApp::new(&config, &value, CalendarDate::today());
            let picked = run_interactive(&config, |dispatcher, out| app.run(dispatcher, out))?;
            if let Some(value) = picked {
                println!("{}", value);
            }
        }
        Command::Phone { text } => println!("{}", input::mask_phone(&text)),
        Command::Verify { phone } => {
            let phone = input::mask_phone(phone.as_deref().unwrap_or(input::PHONE_PLACEHOLDER));
            let mut app = VerifyApp::new(&config, &phone);
            let code = run_interactive(&config, |dispatcher, out| app.run(dispatcher, out))?;
            match code {
                Some(code) => println!("{}", code),
                None => process::exit(1),
            }
        }
    }

    Ok(())
}
