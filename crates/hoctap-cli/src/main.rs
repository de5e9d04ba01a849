//! hoctap CLI: terminal front end for the hoctap learning platform.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hoctap", version, about = "Học tập Mác - Lênin từ dòng lệnh")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and an example quiz set
    Init,

    /// Sign in with email and password
    Login {
        email: String,

        /// Password (falls back to HOCTAP_PASSWORD)
        #[arg(long, env = "HOCTAP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Password (falls back to HOCTAP_PASSWORD)
        #[arg(long, env = "HOCTAP_PASSWORD", hide_env_values = true)]
        password: String,

        /// Bot-check token from the CAPTCHA widget
        #[arg(long)]
        captcha: Option<String>,
    },

    /// Sign out and forget stored tokens
    Logout,

    /// Show the signed-in profile, level and streak
    Me,

    /// Show the learning path
    Path,

    /// Show one lesson
    Lesson {
        id: String,

        /// Also list the lesson's flashcards
        #[arg(long)]
        flashcards: bool,
    },

    /// Practise a quiz-set file offline
    Quiz {
        /// Path to a .toml quiz set
        file: PathBuf,

        /// Seed for a reproducible order
        #[arg(long)]
        seed: Option<u64>,

        /// Comma-separated 1-based option numbers to grade, e.g. "2,1,3"
        #[arg(long)]
        answers: Option<String>,

        /// Print the correct answer under each question
        #[arg(long)]
        reveal: bool,
    },

    /// Validate quiz-set TOML files
    Validate {
        /// Path to a quiz-set file or directory
        path: PathBuf,
    },

    /// Compute the level bar and streak tier offline
    Progress {
        #[arg(long, default_value = "1")]
        level: u32,

        #[arg(long, default_value = "0")]
        xp: f64,

        #[arg(long, default_value = "0")]
        streak: u32,
    },

    /// Daily check-in
    Checkin {
        /// Only show today's status
        #[arg(long)]
        status: bool,
    },

    /// List notifications
    Notifications {
        /// Keep refreshing until interrupted
        #[arg(long, conflicts_with_all = ["read", "read_all"])]
        watch: bool,

        /// Mark one notification read
        #[arg(long, value_name = "ID")]
        read: Option<String>,

        /// Mark every notification read
        #[arg(long, conflicts_with = "read")]
        read_all: bool,
    },

    /// List premium packages
    Packages,

    /// Start a package purchase
    Buy { package_id: String },

    /// Ask the study assistant
    Chat { message: String },

    /// Check where a route would take the current session
    Route {
        path: String,

        /// Evaluate as a signed-in, verified account with this role instead
        #[arg(long = "as", value_name = "ROLE")]
        as_role: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hoctap=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Login { email, password } => {
            commands::account::login(config, email, password).await
        }
        Commands::Register {
            name,
            email,
            password,
            captcha,
        } => commands::account::register(config, name, email, password, captcha).await,
        Commands::Logout => commands::account::logout(config).await,
        Commands::Me => commands::account::me(config).await,
        Commands::Path => commands::learn::path(config).await,
        Commands::Lesson { id, flashcards } => {
            commands::learn::lesson(config, id, flashcards).await
        }
        Commands::Quiz {
            file,
            seed,
            answers,
            reveal,
        } => commands::quiz::execute(file, seed, answers, reveal),
        Commands::Validate { path } => commands::validate::execute(path),
        Commands::Progress { level, xp, streak } => commands::progress::execute(level, xp, streak),
        Commands::Checkin { status } => commands::checkin::execute(config, status).await,
        Commands::Notifications {
            watch,
            read,
            read_all,
        } => commands::notifications::execute(config, watch, read, read_all).await,
        Commands::Packages => commands::payments::packages(config).await,
        Commands::Buy { package_id } => commands::payments::buy(config, package_id).await,
        Commands::Chat { message } => commands::chat::execute(config, message).await,
        Commands::Route { path, as_role } => {
            commands::route::execute(config, path, as_role).await
        }
    };

    if let Err(e) = result {
        eprintln!("Lỗi: {e:#}");
        process::exit(1);
    }
}
