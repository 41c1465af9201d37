//! Student Reports CLI
//!
//! Lists students, generates bulk reports and manages achievements against
//! the student records API.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use student_reports::{
    error::{AppError, Result},
    models::{Config, NewAchievement, PdfGenerationType, ReportFormat},
    pipeline::{self, ReportOptions, SelectionCriteria},
    services::ApiClient,
    storage::{FileSink, LocalStorage},
};

/// Student Reports - records API client
#[derive(Parser, Debug)]
#[command(
    name = "student-reports",
    version,
    about = "Generate and download student reports"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "storage/config.toml")]
    config: PathBuf,

    /// Override the API base URL from the configuration
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration file
    Validate,

    /// List the Excel columns that can be selected
    Columns,

    /// List students, optionally filtered
    Students {
        /// Branch code (e.g. IT) or full branch name
        #[arg(long)]
        branch: Option<String>,

        /// Current semester
        #[arg(long)]
        semester: Option<u32>,
    },

    /// Generate bulk reports for the selected students
    Generate {
        /// Registration numbers to include
        ids: Vec<String>,

        /// Include every student matching --branch / --semester
        #[arg(long)]
        all: bool,

        #[arg(long)]
        branch: Option<String>,

        #[arg(long)]
        semester: Option<u32>,

        /// Report format (pdf, excel); repeat for several
        #[arg(short, long = "format", default_value = "pdf")]
        formats: Vec<ReportFormat>,

        /// PDF generation type (individual, combined)
        #[arg(long, default_value = "individual")]
        pdf_type: PdfGenerationType,

        /// Excel column id; repeat for several
        #[arg(long = "column")]
        columns: Vec<String>,

        /// Output directory (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Never overwrite existing files
        #[arg(long)]
        keep_existing: bool,
    },

    /// Download individual PDF reports
    Download {
        /// Registration numbers
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load a student's report preview and show its page count
    Preview {
        id: String,

        /// Also save the previewed document
        #[arg(long)]
        save: bool,
    },

    /// Manage student achievements
    Achievements {
        #[command(subcommand)]
        command: AchievementsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AchievementsCommand {
    /// List all achievements
    List,

    /// Record a new achievement
    Create {
        #[arg(long)]
        registration_number: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        description: Option<String>,

        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        scope: Option<String>,
    },

    /// Show or change whether the submission link is active
    LinkStatus {
        #[arg(long)]
        set: Option<bool>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn output_storage(config: &Config, output: Option<PathBuf>) -> LocalStorage {
    let dir = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));
    LocalStorage::new(dir).with_overwrite(config.output.overwrite)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    if let Command::Validate = cli.command {
        config.validate()?;
        log::info!("Configuration valid ({})", cli.config.display());
        log::info!("API base URL: {}", config.api.base_url);
        log::info!("Output directory: {}", config.output.dir);
        log::info!("{} branch mapping(s)", config.branches.len());
        return Ok(());
    }

    config.validate()?;
    let api = ApiClient::new(&config.api)?;
    log::debug!("Using API at {}", api.base_url());

    match cli.command {
        Command::Validate => {}

        Command::Columns => pipeline::run_columns(),

        Command::Students { branch, semester } => {
            let filter = pipeline::filter_from_args(&config, branch.as_deref(), semester);
            pipeline::run_students(&api.students(), &filter).await?;
        }

        Command::Generate {
            ids,
            all,
            branch,
            semester,
            formats,
            pdf_type,
            columns,
            output,
            keep_existing,
        } => {
            if ids.is_empty() && !all {
                return Err(AppError::validation(
                    "pass registration numbers or --all to select students",
                ));
            }

            let criteria = SelectionCriteria {
                ids,
                all,
                filter: pipeline::filter_from_args(&config, branch.as_deref(), semester),
            };
            let selection = pipeline::select_students(&api.students(), &criteria).await?;
            log::info!("{} student(s) selected", selection.len());

            let options = ReportOptions {
                formats,
                pdf_type,
                columns,
            };
            let requests = pipeline::build_requests(&options, &selection)?;

            let mut storage = output_storage(&config, output);
            if keep_existing {
                storage = storage.keep_existing();
            }

            let outcomes = pipeline::run_generate(
                &api.reports(),
                &storage,
                &requests,
                config.api.max_concurrent,
            )
            .await;
            pipeline::summarize(&outcomes)?;
        }

        Command::Download { ids, output } => {
            let storage = output_storage(&config, output);
            let outcomes =
                pipeline::run_download(&api.reports(), &storage, &ids, config.api.max_concurrent)
                    .await;
            pipeline::summarize(&outcomes)?;
        }

        Command::Preview { id, save } => {
            let storage = output_storage(&config, None);
            let sink = save.then_some(&storage as &dyn FileSink);
            let (viewer, saved) = pipeline::run_preview(&api.reports(), &id, sink).await?;

            if let Some(error) = viewer.error() {
                return Err(AppError::delivery(error.to_string()));
            }
            if let Some(saved) = saved {
                log::info!("Saved {} ({} bytes)", saved.location, saved.length);
            }
        }

        Command::Achievements { command } => {
            let client = api.achievements();
            match command {
                AchievementsCommand::List => {
                    pipeline::run_list_achievements(&client).await?;
                }
                AchievementsCommand::Create {
                    registration_number,
                    title,
                    category,
                    description,
                    date,
                    scope,
                } => {
                    let achievement = NewAchievement {
                        registration_number,
                        title,
                        category,
                        description,
                        achievement_date: date,
                        scope,
                    };
                    let created = pipeline::run_create_achievement(&client, &achievement).await?;
                    log::info!("Created achievement #{}", created.id);
                }
                AchievementsCommand::LinkStatus { set } => {
                    pipeline::run_link_status(&client, set).await?;
                }
            }
        }
    }

    Ok(())
}
