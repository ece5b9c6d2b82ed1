use crate::adapters::render::OutputFormat;
use crate::config::settings::{Settings, ViewSettings, DEFAULT_OUTPUT_PATH};
use crate::config::toml_config::TomlConfig;
use crate::domain::appointment::AppointmentRequest;
use crate::domain::model::{Session, SortOption};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sitter-directory")]
#[command(about = "Browse, filter and book nannies from the babysitter directory")]
pub struct CliConfig {
    /// TOML configuration file; flags override its values
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the realtime database
    #[arg(long, global = true, env = "SITTER_DATABASE_URL")]
    pub database_url: Option<String>,

    /// JSON export to read instead of the live database
    #[arg(long, global = true)]
    pub snapshot: Option<String>,

    /// Signed-in user id
    #[arg(long, global = true)]
    pub uid: Option<String>,

    /// ID token for the signed-in user
    #[arg(long, global = true, env = "SITTER_ID_TOKEN", hide_env_values = true)]
    pub id_token: Option<String>,

    #[arg(long, global = true)]
    pub output_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show nannies for a filter
    List(ListArgs),
    /// Mark or unmark a favorite nanny
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Send an appointment request to a nanny
    Appoint(AppointArgs),
    /// Print the available filters
    Options,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Filter; unknown values show everything
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Pages of three to show
    #[arg(short, long)]
    pub pages: Option<usize>,

    /// Only the signed-in user's favorites
    #[arg(long)]
    pub favorites: bool,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also write the page to the output directory in these formats
    #[arg(long, value_enum, value_delimiter = ',')]
    pub save: Vec<OutputFormat>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum FavoriteAction {
    Add { nanny_id: String },
    Remove { nanny_id: String },
    Toggle { nanny_id: String },
}

#[derive(Debug, Clone, Args)]
pub struct AppointArgs {
    #[arg(long)]
    pub nanny: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub child_age: String,
    #[arg(long, default_value = "12:00")]
    pub time: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub parent_name: String,
    #[arg(long)]
    pub comment: String,
}

impl From<AppointArgs> for AppointmentRequest {
    fn from(args: AppointArgs) -> Self {
        Self {
            nanny_id: args.nanny,
            address: args.address,
            phone: args.phone,
            child_age: args.child_age,
            time: args.time,
            email: args.email,
            parent_name: args.parent_name,
            comment: args.comment,
        }
    }
}

impl CliConfig {
    pub fn load_file(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                TomlConfig::from_file(path)
            }
            None => Ok(TomlConfig::default()),
        }
    }

    /// Overlays command line flags on the file configuration.
    pub fn resolve(&self, file: TomlConfig) -> Result<Settings> {
        let source = Settings::source_from(
            self.database_url.clone().or(file.database.url.clone()),
            self.snapshot.clone().or(file.database.snapshot.clone()),
            file.database.read_token.clone(),
            file.database.timeout_seconds,
        )?;

        let file_session = file.session.clone();
        let session = match (&self.uid, file_session) {
            (Some(uid), _) => Some(Session::new(uid.clone(), self.id_token.clone())),
            (None, Some(s)) => Some(Session::new(s.uid, self.id_token.clone().or(s.id_token))),
            (None, None) => None,
        };

        let mut view = ViewSettings {
            sort: file.view.sort.unwrap_or_default(),
            pages: file.view.pages.unwrap_or(1),
            favorites_only: file.view.favorites_only.unwrap_or(false),
            format: file.view.format.unwrap_or(OutputFormat::Text),
            save: file.output.formats.clone(),
        };
        if let Command::List(list) = &self.command {
            if let Some(sort) = &list.sort {
                view.sort = SortOption::parse_lenient(sort);
            }
            if let Some(pages) = list.pages {
                view.pages = pages;
            }
            if list.favorites {
                view.favorites_only = true;
            }
            if let Some(format) = list.format {
                view.format = format;
            }
            if !list.save.is_empty() {
                view.save = list.save.clone();
            }
        }

        let settings = Settings::new(source)
            .with_session(session)
            .with_view(view)
            .with_output_path(
                self.output_path
                    .clone()
                    .or(file.output.path.clone())
                    .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            );
        Ok(settings)
    }
}
