//! Logging backend which logs to a file, and over UDP in debug builds.

use chrono::Local;
use eyre::{Context, Result};
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::Write,
    net,
    sync::{mpsc, Mutex},
};

/// Where debug builds send packed log messages.
const UDP_LOG_TARGET: &str = "127.0.0.1:4568";

#[derive(Clone, Copy, Serialize, Deserialize)]
enum MessageType {
    Normal,
    Error,
    Warning,
    Debug,
}

#[derive(Serialize, Deserialize)]
struct Message {
    module: String,
    msg_type: MessageType,
    string: String,
    time: String,
}

impl Message {
    /// Serialises the message with a little-endian length prefix (which counts itself).
    fn pack(&self) -> Option<Vec<u8>> {
        let serialized = bincode::serialize::<Message>(self).ok()?;

        let mut bytes = Vec::from(u32::to_le_bytes((serialized.len() as u32) + 4));
        bytes.extend(&serialized);

        Some(bytes)
    }

    fn format(&self) -> String {
        let level_name = match self.msg_type {
            MessageType::Normal => "info",
            MessageType::Error => "error",
            MessageType::Warning => "warning",
            MessageType::Debug => "debug",
        };

        //      [date time] [module] [level] Text
        format!(
            "[{}] [{}] [{}] {}\n",
            self.time, self.module, level_name, self.string
        )
    }
}

pub struct Logger;

impl Logger {
    pub fn commit(&self, record: &log::Record) {
        let msg_type = match record.level() {
            Level::Error => MessageType::Error,
            Level::Warn => MessageType::Warning,
            Level::Info => MessageType::Normal,
            Level::Debug | Level::Trace => MessageType::Debug,
        };

        let module = record
            .module_path()
            .and_then(|path| path.split("::").last())
            .unwrap_or("unknown")
            .to_string();

        let message = Message {
            module,
            msg_type,
            string: format!("{}", record.args()),
            time: Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        };

        // If the sender has gone there's nowhere left to report the problem.
        if let Some(sender) = MSG_SENDER.get() {
            if let Ok(sender) = sender.lock() {
                let _ = sender.send(message);
            }
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.commit(record);
        }
    }

    fn flush(&self) {}
}

static LOGGER: Logger = Logger;
static MSG_SENDER: OnceCell<Mutex<mpsc::Sender<Message>>> = OnceCell::new();

fn panic_report(message: &str, location: &str) {
    let time = Local::now();
    let backtrace = backtrace::Backtrace::new();

    let info_dump = format!(
        "The cinema mod crashed.

Message: {message}
Location: {location}
Time: {time}
Backtrace: see below

{backtrace:?}"
    );

    log::error!("{info_dump}");

    if let Ok(path) = crate::meta::resources::get_data_path("PANIC.txt") {
        let _ = std::fs::write(path, info_dump);
    }

    std::process::abort();
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "no message".to_string());

        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        panic_report(&message, &location);
    }));
}

pub fn init() -> Result<()> {
    install_panic_hook();

    log::set_logger(&LOGGER).map_err(|err| eyre::eyre!("unable to set logger: {err}"))?;

    log::set_max_level(if cfg!(feature = "debug") {
        LevelFilter::max()
    } else {
        LevelFilter::Info
    });

    let (sender, receiver) = mpsc::channel::<Message>();

    MSG_SENDER
        .set(Mutex::new(sender))
        .map_err(|_| eyre::eyre!("logging was already initialised"))?;

    // Only attempt to send over UDP if we're in debug mode.
    let socket = if cfg!(feature = "debug") {
        net::UdpSocket::bind("0.0.0.0:0").ok()
    } else {
        None
    };

    let path = crate::meta::resources::get_log_path()?;
    let mut file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    // Writing happens on a background thread so that logging from a hook doesn't stall the
    // frame.
    std::thread::spawn(move || {
        for msg in receiver {
            let _ = file.write_all(msg.format().as_bytes());

            if let Some(socket) = &socket {
                if let Some(bin) = msg.pack() {
                    let _ = socket.send_to(&bin, UDP_LOG_TARGET);
                }
            }
        }
    });

    Ok(())
}
