use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sentinel-cli", version, about = "Sentinel CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List schools known to the backend
    Schools,
    /// Register this device's student with the backend
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        emergency_phone: String,
        #[arg(long)]
        school_id: i64,
    },
    /// Weekly schedule management
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Resolve the currently tracked room
    Resolve {
        /// Weekday (mon..sun); defaults to today
        #[arg(long)]
        day: Option<String>,
        /// Time of day as HH:MM; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Run the detection pipeline over a replayed classification stream
    Monitor {
        /// JSONL replay file, or '-' for stdin
        #[arg(long)]
        input: String,
        /// Override the persisted tracking default
        #[arg(long)]
        tracking: Option<bool>,
    },
    /// Show the latest backend alert
    Status,
    /// Manually dispatch one alert (drill)
    Report {
        /// Room code; defaults to the resolved current room
        #[arg(long)]
        room: Option<String>,
    },
    /// Toggle the dispatch gate
    Track {
        #[command(subcommand)]
        action: commands::track::TrackAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Schools => commands::schools::run(),
        Commands::Register {
            name,
            phone,
            emergency_phone,
            school_id,
        } => commands::register::run(&name, &phone, &emergency_phone, school_id),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Resolve { day, at } => commands::resolve::run(day, at),
        Commands::Monitor { input, tracking } => commands::monitor::run(&input, tracking),
        Commands::Status => commands::status::run(),
        Commands::Report { room } => commands::report::run(room),
        Commands::Track { action } => commands::track::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
