pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::RequestOverrides;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use self::toml_config::AcceleratorConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "borderplex-rfi", version)]
#[command(about = "Generate economic-development RFI responses from a short project description")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build a response from a natural-language request
    Generate {
        /// e.g. "Generate an RFI for a 200-employee automotive supplier in El Paso"
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
        #[command(flatten)]
        overrides: OverrideArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Recompute a saved response with some parameters replaced
    Update {
        /// Saved JSON response; defaults to the last export in the output directory
        #[arg(long)]
        from: Option<String>,
        #[command(flatten)]
        overrides: OverrideArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Read requests from stdin until "exit"
    Interactive {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct OverrideArgs {
    #[arg(long)]
    pub industry: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub employees: Option<i64>,
    #[arg(long)]
    pub location: Option<String>,
    /// Capital expenditure in dollars
    #[arg(long, allow_hyphen_values = true)]
    pub capex: Option<i64>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    #[arg(long)]
    pub output_path: Option<String>,
    /// Export formats (json, csv)
    #[arg(long, value_delimiter = ',')]
    pub format: Vec<String>,
    #[arg(long, help = "Print the summary only, write no files")]
    pub no_export: bool,
}

#[cfg(feature = "cli")]
impl From<&OverrideArgs> for RequestOverrides {
    fn from(args: &OverrideArgs) -> Self {
        RequestOverrides {
            industry: args.industry.clone(),
            employees: args.employees,
            location: args.location.clone(),
            capex: args.capex,
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn output_args(&self) -> &OutputArgs {
        match &self.command {
            Command::Generate { output, .. }
            | Command::Update { output, .. }
            | Command::Interactive { output } => output,
        }
    }

    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<AcceleratorConfig> {
        let mut config = match &self.config {
            Some(path) => AcceleratorConfig::from_file(path)?,
            None => AcceleratorConfig::default(),
        };

        let output = self.output_args();
        if let Some(path) = &output.output_path {
            config.output.output_path = path.clone();
        }
        if !output.format.is_empty() {
            config.output.output_formats = output.format.clone();
        }

        Ok(config)
    }
}
