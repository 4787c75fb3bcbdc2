//! CLI command definitions and handlers

mod assess;
mod classify;
mod finance;
mod init;
mod prompts;
mod rlhf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moatscope::config::{
    load_config_file, load_project_config, ProjectConfig, UserConfig, FORMAT_ENV_VAR,
};
use moatscope::reporters::{report_with_format, OutputFormat, Report};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// moatscope - brand and AI-perception scoring
///
/// Everything runs locally on the input you give it. No network calls.
#[derive(Parser, Debug)]
#[command(name = "moatscope")]
#[command(
    version,
    about = "Classify queries, score competitive moats, E-E-A-T and AI responses, and project SaaS revenue",
    after_help = "\
Examples:
  moatscope classify \"best crm for small business\"      Industry and intent
  moatscope moats --brand Acme --industry saas --customers 500000
  moatscope eeat --content-file post.md --url https://acme.com/post
  moatscope reward --prompt \"best crm\" --response \"HubSpot is ...\"
  moatscope finance --arpu 50 --customers 200 --new-per-month 20 --churn 0.03
  moatscope prompts --query \"best crm\" --brand Acme -f json"
)]
pub struct Cli {
    /// Config file (default: moatscope.toml or .moatscoperc.json in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Output format: text, json, markdown (or md)
    #[arg(long, short = 'f', global = true, value_parser = ["text", "json", "markdown", "md"])]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a commented moatscope.toml with the default settings
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing moatscope.toml
        #[arg(long)]
        force: bool,
    },

    /// Detect the industry and search intent of a query
    Classify {
        /// Query or free text to classify
        text: String,

        /// Industry slug to favour when signals are close
        #[arg(long)]
        hint: Option<String>,
    },

    /// Classify a file of queries, one per line (# starts a comment)
    Batch {
        /// Query file ("-" for stdin)
        file: PathBuf,
    },

    /// Extract competitive moats for a brand
    #[command(after_help = "\
Examples:
  moatscope moats --brand Acme --industry saas --customers 500000
  moatscope moats --input acme.json                  camelCase JSON MoatInput")]
    Moats {
        /// JSON file with the full brand profile ("-" for stdin)
        #[arg(long, conflicts_with = "brand")]
        input: Option<PathBuf>,

        #[arg(long, required_unless_present = "input")]
        brand: Option<String>,

        /// Industry slug (detected from brand and description when omitted)
        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        customers: Option<u64>,

        #[arg(long)]
        years: Option<f64>,

        #[arg(long)]
        patents: Option<u32>,

        #[arg(long)]
        integrations: Option<u32>,

        /// Market share, percent
        #[arg(long)]
        market_share: Option<f64>,

        /// Annual revenue in dollars
        #[arg(long)]
        revenue: Option<f64>,

        /// Net revenue retention, percent
        #[arg(long)]
        nrr: Option<f64>,

        /// Gross margin, percent
        #[arg(long)]
        gross_margin: Option<f64>,

        /// Aided brand awareness, percent
        #[arg(long)]
        awareness: Option<f64>,

        #[arg(long)]
        proprietary_data: bool,

        #[arg(long)]
        licenses: Option<u32>,
    },

    /// Grade content for Experience, Expertise, Authoritativeness and Trust
    Eeat {
        /// JSON file with the full page profile ("-" for stdin)
        #[arg(long, conflicts_with = "content_file")]
        input: Option<PathBuf>,

        /// Plain text or Markdown content ("-" for stdin)
        #[arg(long, required_unless_present = "input")]
        content_file: Option<PathBuf>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        author: Option<String>,

        /// Content-only score with the four dimension numbers
        #[arg(long)]
        quick: bool,
    },

    /// Score an AI response for reward modelling
    Reward {
        /// JSON file with prompt, response and brandName ("-" for stdin)
        #[arg(long, conflicts_with_all = ["prompt", "response"])]
        input: Option<PathBuf>,

        #[arg(long, required_unless_present = "input", requires = "response")]
        prompt: Option<String>,

        #[arg(long, required_unless_present = "input", requires = "prompt")]
        response: Option<String>,

        /// Brand whose mention should be reported
        #[arg(long)]
        brand: Option<String>,
    },

    /// Aggregate implicit feedback and mine preference pairs
    Pairs {
        /// JSON array of implicit signals ("-" for stdin)
        file: PathBuf,
    },

    /// Project MRR, ARR and unit economics month by month
    Finance {
        /// JSON file with the finance inputs ("-" for stdin)
        #[arg(long, conflicts_with_all = ["arpu", "customers"])]
        input: Option<PathBuf>,

        /// Average monthly revenue per customer
        #[arg(long, required_unless_present = "input")]
        arpu: Option<f64>,

        /// Customers at month 0
        #[arg(long, default_value = "0")]
        customers: f64,

        #[arg(long, default_value = "0")]
        new_per_month: f64,

        /// Monthly churn rate (0-1)
        #[arg(long, default_value = "0")]
        churn: f64,

        /// Monthly expansion rate on existing MRR (0-1)
        #[arg(long, default_value = "0")]
        expansion: f64,

        /// Gross margin (0-1)
        #[arg(long, default_value = "0.8")]
        gross_margin: f64,

        /// Customer acquisition cost
        #[arg(long)]
        cac: Option<f64>,

        #[arg(long, default_value = "12")]
        months: u32,
    },

    /// Select prompts to probe AI assistants with
    Prompts {
        #[arg(long, conflicts_with = "query")]
        industry: Option<String>,

        /// Classify this query and use its industry and intent
        #[arg(long)]
        query: Option<String>,

        #[arg(long, conflicts_with = "query")]
        intent: Option<String>,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        audience: Option<String>,

        #[arg(long, default_value_t = moatscope::prompts::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Look up a metric or term (all terms when omitted)
    Glossary {
        term: Option<String>,
    },
}

/// Settings and output target shared by every command
pub(crate) struct RunContext {
    pub config: ProjectConfig,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl RunContext {
    /// Render and write a report to the output file or stdout
    pub fn emit(&self, report: Report<'_>) -> Result<()> {
        let rendered = report_with_format(report, self.format)?;
        self.write(&rendered)
    }

    /// Files never get terminal escape codes
    fn write(&self, rendered: &str) -> Result<()> {
        match &self.output {
            Some(path) => {
                std::fs::write(path, console::strip_ansi_codes(rendered).as_bytes())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Wrote {}", path.display());
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }
}

fn load_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

fn resolve_format(flag: Option<&str>, config: &ProjectConfig) -> Result<OutputFormat> {
    select_format(
        flag,
        UserConfig::env_format().as_deref(),
        config,
        || UserConfig::load_file().output.format,
    )
}

/// CLI flag, then environment, then project defaults, then user config, then text
fn select_format(
    flag: Option<&str>,
    env: Option<&str>,
    config: &ProjectConfig,
    user: impl FnOnce() -> Option<String>,
) -> Result<OutputFormat> {
    if let Some(f) = flag {
        return OutputFormat::from_str(f);
    }
    if let Some(f) = env {
        return OutputFormat::from_str(f)
            .with_context(|| format!("Invalid {FORMAT_ENV_VAR} value"));
    }
    if let Some(f) = config.defaults.format.as_deref() {
        return OutputFormat::from_str(f).context("Invalid [defaults] format in project config");
    }
    match user() {
        Some(f) => OutputFormat::from_str(&f).context("Invalid user output format"),
        None => Ok(OutputFormat::Text),
    }
}

/// Read a file, or stdin when the path is "-"
pub(crate) fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse a camelCase JSON input file
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_source(path)?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if let Commands::Init { dir, force } = &cli.command {
        return init::run(dir, *force);
    }

    let config = load_config(cli.config.as_deref())?;
    let format = resolve_format(cli.format.as_deref(), &config)?;
    debug!("Output format: {}", format);
    let ctx = RunContext {
        config,
        format,
        output: cli.output,
    };

    match cli.command {
        Commands::Init { .. } => Ok(()),

        Commands::Classify { text, hint } => classify::run(&ctx, &text, hint.as_deref()),

        Commands::Batch { file } => classify::run_batch(&ctx, &file),

        Commands::Moats {
            input,
            brand,
            industry,
            description,
            customers,
            years,
            patents,
            integrations,
            market_share,
            revenue,
            nrr,
            gross_margin,
            awareness,
            proprietary_data,
            licenses,
        } => {
            let moat_input = match input {
                Some(path) => read_json(&path)?,
                None => moatscope::scoring::MoatInput {
                    brand_name: brand.unwrap_or_default(),
                    industry_slug: industry,
                    description,
                    customer_count: customers,
                    years_in_business: years,
                    patent_count: patents,
                    integration_count: integrations,
                    market_share,
                    annual_revenue: revenue,
                    net_revenue_retention: nrr,
                    gross_margin,
                    brand_awareness: awareness,
                    has_proprietary_data: proprietary_data.then_some(true),
                    regulatory_licenses: licenses,
                },
            };
            assess::run_moats(&ctx, &moat_input)
        }

        Commands::Eeat {
            input,
            content_file,
            url,
            author,
            quick,
        } => assess::run_eeat(&ctx, input, content_file, url, author, quick),

        Commands::Reward {
            input,
            prompt,
            response,
            brand,
        } => {
            let reward_input = match input {
                Some(path) => {
                    let mut parsed: moatscope::rlhf::RewardInput = read_json(&path)?;
                    if brand.is_some() {
                        parsed.brand_name = brand;
                    }
                    parsed
                }
                None => moatscope::rlhf::RewardInput {
                    prompt: prompt.unwrap_or_default(),
                    response: response.unwrap_or_default(),
                    brand_name: brand,
                },
            };
            rlhf::run_reward(&ctx, &reward_input)
        }

        Commands::Pairs { file } => rlhf::run_pairs(&ctx, &file),

        Commands::Finance {
            input,
            arpu,
            customers,
            new_per_month,
            churn,
            expansion,
            gross_margin,
            cac,
            months,
        } => {
            let finance_input = match input {
                Some(path) => read_json(&path)?,
                None => moatscope::finance::FinanceInput {
                    starting_customers: customers,
                    arpu: arpu.unwrap_or_default(),
                    new_customers_per_month: new_per_month,
                    monthly_churn_rate: churn,
                    expansion_rate: expansion,
                    gross_margin,
                    cac,
                    months,
                },
            };
            finance::run(&ctx, &finance_input)
        }

        Commands::Prompts {
            industry,
            query,
            intent,
            brand,
            category,
            audience,
            limit,
        } => match query {
            Some(q) => prompts::run_for_query(&ctx, &q, brand.as_deref(), limit),
            None => prompts::run(
                &ctx,
                &moatscope::prompts::PromptRequest {
                    industry,
                    intent,
                    brand,
                    category,
                    audience,
                    limit: Some(limit),
                },
            ),
        },

        Commands::Glossary { term } => prompts::run_glossary(&ctx, term.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["moatscope", "classify", "best crm", "-f", "json"])
            .expect("parse");
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert!(matches!(cli.command, Commands::Classify { .. }));
    }

    #[test]
    fn test_moats_requires_brand_or_input() {
        assert!(Cli::try_parse_from(["moatscope", "moats"]).is_err());
        assert!(Cli::try_parse_from(["moatscope", "moats", "--brand", "Acme"]).is_ok());
        assert!(Cli::try_parse_from(["moatscope", "moats", "--input", "a.json"]).is_ok());
    }

    #[test]
    fn test_reward_needs_prompt_and_response_together() {
        assert!(Cli::try_parse_from(["moatscope", "reward", "--prompt", "x"]).is_err());
        assert!(
            Cli::try_parse_from(["moatscope", "reward", "--prompt", "x", "--response", "y"])
                .is_ok()
        );
    }

    #[test]
    fn test_format_precedence() {
        let mut config = ProjectConfig::default();
        let user = || Some("markdown".to_string());
        assert_eq!(
            select_format(None, None, &config, user).expect("format"),
            OutputFormat::Markdown
        );

        config.defaults.format = Some("text".into());
        assert_eq!(
            select_format(None, None, &config, user).expect("format"),
            OutputFormat::Text
        );
        assert_eq!(
            select_format(None, Some("json"), &config, user).expect("format"),
            OutputFormat::Json
        );
        assert_eq!(
            select_format(Some("markdown"), Some("json"), &config, user).expect("format"),
            OutputFormat::Markdown
        );
        assert_eq!(
            select_format(None, None, &ProjectConfig::default(), || None).expect("format"),
            OutputFormat::Text
        );
    }

    #[test]
    fn test_bad_env_format_is_an_error() {
        let err = select_format(None, Some("yaml"), &ProjectConfig::default(), || None)
            .unwrap_err();
        assert!(err.to_string().contains(FORMAT_ENV_VAR));
    }

    #[test]
    fn test_file_output_has_no_ansi_codes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("report.txt");
        let ctx = RunContext {
            config: ProjectConfig::default(),
            format: OutputFormat::Text,
            output: Some(path.clone()),
        };
        ctx.write("\x1b[1mMoat score\x1b[0m: \x1b[32m72.0\x1b[0m\n")
            .expect("write report");
        let written = std::fs::read_to_string(&path).expect("read report");
        assert_eq!(written, "Moat score: 72.0\n");
    }
}
