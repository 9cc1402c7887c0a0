//! examkit CLI: author exams, take them, and publish results.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "examkit", version, about = "Exam authoring, grading and reporting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and a sample exam definition
    Init,

    /// Check the data file and result log for problems
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List every exam with its owner and participation
    Exams {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Add an exam from a TOML definition file
    Author {
        /// Path to the exam definition
        #[arg(long)]
        file: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Register a student for an exam
    Register {
        /// Student id
        #[arg(long)]
        student: String,

        /// Exam code
        #[arg(long)]
        exam: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take an exam interactively, answering on stdin
    Take {
        /// Student id
        #[arg(long)]
        student: String,

        /// Exam code
        #[arg(long)]
        exam: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a student's report card for an exam
    Report {
        /// Student id
        #[arg(long)]
        student: String,

        /// Exam code
        #[arg(long)]
        exam: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write the ranked grade listing for an exam
    Grades {
        /// Exam code
        #[arg(long)]
        exam: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("examkit=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { config } => commands::validate::execute(config),
        Commands::Exams { config } => commands::exams::execute(config),
        Commands::Author { file, config } => commands::author::execute(file, config),
        Commands::Register {
            student,
            exam,
            config,
        } => commands::register::execute(student, exam, config),
        Commands::Take {
            student,
            exam,
            config,
        } => commands::take::execute(student, exam, config),
        Commands::Report {
            student,
            exam,
            format,
            config,
        } => commands::report::execute(student, exam, format, config),
        Commands::Grades {
            exam,
            format,
            config,
        } => commands::grades::execute(exam, format, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
