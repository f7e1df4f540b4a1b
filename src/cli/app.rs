// ABOUTME: Main application orchestration for the pageframe CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands::{self, RenderOptions};
use super::{Args, Commands, Config};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Rendered pages go to stdout, so diagnostics stay on stderr.
        match self.config.logging.format.as_str() {
            "compact" => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            }
        }

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting pageframe v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);

        match args.command {
            Commands::Render {
                page,
                view,
                template,
                no_template,
                manageable,
                params,
                vars,
                path,
                output,
            } => commands::render_page(
                RenderOptions {
                    page,
                    view,
                    template,
                    no_template,
                    manageable,
                    params,
                    vars,
                    path,
                    output,
                },
                &self.config,
            ),

            Commands::Resolve {
                page,
                view,
                manageable,
            } => commands::resolve_view(page, view, manageable, &self.config),

            Commands::Init { name, manageable } => {
                commands::init_page(name, manageable, &self.config)
            }
        }
    }

    /// Create application from command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
