use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use colored::Colorize;

use manual_tester::parser::{self, OptionTag};
use manual_tester::wizard::{WizardConfig, WizardServer};

#[derive(Parser)]
#[command(name = "manual-tester")]
#[command(version = "0.1.0")]
#[command(about = "Web wizard for walking through manual Gherkin test scenarios", long_about = None)]
#[command(group = ArgGroup::new("option").required(true).multiple(false))]
struct Cli {
    /// Walk through @manual scenarios tagged @PV
    #[arg(long, group = "option")]
    pv: bool,

    /// Walk through @manual scenarios tagged @IV
    #[arg(long, group = "option")]
    iv: bool,

    /// Walk through @manual scenarios tagged @pPV
    #[arg(long, group = "option")]
    ppv: bool,

    /// Walk through @manual scenarios tagged @pIV
    #[arg(long, group = "option")]
    piv: bool,

    /// Directory containing .feature files
    #[arg(long, default_value = "requirements")]
    features_dir: PathBuf,

    /// Environment the tests are executed in, used only in result
    /// filenames, options: [validation|production]
    #[arg(long, default_value = "")]
    environment: String,

    /// Directory result JSON files are written to
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Directory of static assets served under /static
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Server port
    #[arg(long, default_value = "8080")]
    port: u16,
}

impl Cli {
    fn option_tag(&self) -> OptionTag {
        if self.pv {
            OptionTag::Pv
        } else if self.iv {
            OptionTag::Iv
        } else if self.ppv {
            OptionTag::PPv
        } else {
            OptionTag::PIv
        }
    }
}

/// Result filenames embed the environment label; restricting it to the
/// filename-safe set keeps every generated name servable by `/download`.
fn validate_environment(label: &str) -> anyhow::Result<()> {
    if label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Ok(())
    } else {
        anyhow::bail!("environment label may only contain [A-Za-z0-9_.-]: {label}")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let option_tag = cli.option_tag();
    validate_environment(&cli.environment)?;

    println!(
        "{} Loading manual scenarios from: {}",
        "▶".green().bold(),
        cli.features_dir.display()
    );
    println!("  Option tag: {}", option_tag.tag().cyan());
    if !cli.environment.is_empty() {
        println!("  Environment: {}", cli.environment.cyan());
    }

    let scenarios = parser::load_scenarios(&cli.features_dir, option_tag)
        .with_context(|| format!("error loading scenarios from {}", cli.features_dir.display()))?;

    if scenarios.is_empty() {
        println!(
            "  {}",
            "No matching scenarios; the wizard starts on the completion page.".yellow()
        );
    } else {
        println!("  Scenarios: {}", scenarios.len().to_string().cyan());
    }

    let config = WizardConfig {
        port: cli.port,
        option_tag,
        environment: cli.environment.clone(),
        output_dir: cli.output.clone(),
        static_dir: cli.static_dir.clone(),
    };

    WizardServer::new(config, scenarios).start().await
}
