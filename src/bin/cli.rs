//! GNTP CLI
//!
//! Build GNTP messages on stdout or inspect a captured message.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gntp::message::Reply;
use gntp::{parse_gntp, Config, HashAlgorithm, Message, Notify, Register};
use tracing_subscriber::{fmt, EnvFilter};

/// GNTP CLI
#[derive(Parser, Debug)]
#[command(name = "gntp-cli")]
#[command(about = "Encode and decode Growl Notification Transport Protocol messages")]
#[command(version)]
struct Args {
    /// Password used to sign or verify messages
    #[arg(short, long, global = true)]
    password: Option<String>,

    /// Key hash algorithm for signing (MD5, SHA1, SHA256, SHA512)
    #[arg(long, global = true, default_value = "MD5")]
    hash: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a message file and print its contents
    Decode {
        /// File holding the raw message
        path: PathBuf,
    },

    /// Encode a REGISTER message to stdout
    Register {
        /// Application name
        #[arg(short, long)]
        app: String,

        /// Notification type to register (repeatable)
        #[arg(short, long = "notification", required = true)]
        notifications: Vec<String>,

        /// Notification type enabled by default (repeatable, default: all)
        #[arg(short, long = "default")]
        defaults: Vec<String>,
    },

    /// Encode a NOTIFY message to stdout
    Notify {
        /// Application name
        #[arg(short, long)]
        app: String,

        /// Registered notification type
        #[arg(short, long)]
        name: String,

        /// Notification title
        #[arg(short, long)]
        title: String,

        /// Notification text
        #[arg(long)]
        text: Option<String>,

        /// Keep the notification on screen
        #[arg(long)]
        sticky: bool,

        /// Priority from -2 to 2
        #[arg(long, allow_hyphen_values = true)]
        priority: Option<i8>,

        /// File embedded as the notification icon
        #[arg(long)]
        icon: Option<PathBuf>,
    },
}

fn main() {
    // Logs go to stderr so encoded messages on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gntp=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let algorithm: HashAlgorithm = match args.hash.parse() {
        Ok(algorithm) => algorithm,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    let config = Config::builder().hash_algorithm(algorithm).build();
    let password = args.password.as_deref();

    let code = match args.command {
        Commands::Decode { path } => decode(&path, password),
        Commands::Register {
            app,
            notifications,
            defaults,
        } => {
            let mut register = Register::with_notifications(app, &notifications, &defaults);
            register.apply_config(&config);
            register.set_password_with(&config, password);
            emit(register.into())
        }
        Commands::Notify {
            app,
            name,
            title,
            text,
            sticky,
            priority,
            icon,
        } => {
            let mut notify = Notify::new(app, name, title);
            notify.apply_config(&config);
            notify.set_password_with(&config, password);
            if let Some(text) = text {
                notify.set_text(text);
            }
            if sticky {
                notify.set_sticky(true);
            }
            if let Some(priority) = priority {
                if let Err(e) = notify.set_priority(priority) {
                    tracing::error!("{}", e);
                    std::process::exit(2);
                }
            }
            if let Some(icon) = icon {
                match std::fs::read(&icon) {
                    Ok(data) => {
                        let url = notify.add_resource(data);
                        notify.set_icon(url);
                    }
                    Err(e) => {
                        tracing::error!("Failed to read icon {}: {}", icon.display(), e);
                        std::process::exit(1);
                    }
                }
            }
            emit(notify.into())
        }
    };

    std::process::exit(code);
}

/// Decode the message at `path`; on failure print the matching -ERROR reply
fn decode(path: &Path, password: Option<&str>) -> i32 {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            return 1;
        }
    };

    let message = match parse_gntp(&raw, password) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Rejecting message: {}", e);
            let reply: Message = e.to_error_response().into();
            emit(reply);
            return 1;
        }
    };

    print_message(&message);
    0
}

fn print_message(message: &Message) {
    let info = message.info();
    println!("Type: {}", info.message_type);
    println!("Version: {}", info.version);
    println!(
        "Encryption: {}",
        info.encryption_algorithm_id().unwrap_or("NONE")
    );
    if let Some(algorithm) = info.key_hash_algorithm_id() {
        println!("Key-Hash: {}", algorithm);
    }

    println!();
    for (key, value) in message.headers().iter() {
        println!("{}: {}", key, value);
    }

    match message {
        Message::Register(register) => {
            for notice in &register.notifications {
                println!(
                    "\nNotification: {} (enabled: {})",
                    notice.name().unwrap_or_default(),
                    notice.enabled()
                );
            }
            for resource in register.resources.values() {
                println!("\nResource: {} ({} bytes)", resource.identifier, resource.data.len());
            }
        }
        Message::Notify(notify) => {
            for resource in notify.resources.values() {
                println!("\nResource: {} ({} bytes)", resource.identifier, resource.data.len());
            }
        }
        _ => {}
    }

    match message.reply() {
        Some(Reply::Accepted(action)) => println!("\nAccepted: {}", action),
        Some(Reply::Rejected { code, description }) => {
            println!("\nRejected: {} {}", code, description)
        }
        None => {}
    }
}

/// Encode `message` to stdout, returning the process exit code
fn emit(message: Message) -> i32 {
    let bytes = match message.encode() {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to encode {}: {}", message.message_type(), e);
            return 1;
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(&bytes).and_then(|_| stdout.flush()) {
        tracing::error!("Failed to write message: {}", e);
        return 1;
    }

    0
}
