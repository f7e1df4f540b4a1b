// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for pageframe

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pageframe")]
#[command(about = "Resolve and render server-side HTML pages from view templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a page directory to HTML
    Render {
        #[arg(help = "Page directory, or a name under the pages root")]
        page: PathBuf,

        #[arg(long, help = "View file to render instead of the declared one")]
        view: Option<PathBuf>,

        #[arg(long, help = "Document template to wrap the view in")]
        template: Option<PathBuf>,

        #[arg(long, help = "Render the view without the document template")]
        no_template: bool,

        #[arg(long, help = "Render as a manageable page")]
        manageable: bool,

        #[arg(short = 'P', long = "param", help = "Dynamic page parameter (key=value)")]
        params: Vec<String>,

        #[arg(short = 'V', long = "var", help = "View variable (key=value)")]
        vars: Vec<String>,

        #[arg(long, help = "Request path handed to the page")]
        path: Option<String>,

        #[arg(short, long, help = "Write the rendered body to a file")]
        output: Option<PathBuf>,
    },

    /// Show which view file a page would render
    Resolve {
        #[arg(help = "Page directory, or a name under the pages root")]
        page: PathBuf,

        #[arg(long, help = "View file to resolve instead of the declared one")]
        view: Option<PathBuf>,

        #[arg(long, help = "Resolve as a manageable page")]
        manageable: bool,
    },

    /// Create a new page directory with a manifest and view
    Init {
        #[arg(help = "Name of the page to create under the pages root")]
        name: String,

        #[arg(long, help = "Create a manageable page")]
        manageable: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut variables = HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}
