//! Guardrail operator tool
//!
//! Reports the limits a node is configured with.
//!
//! - `guardtool getinterdcstreamthroughput [-e]` - inter-DC streaming cap
//! - `guardtool showguardrails` - every guardrail limit, flag and value list

use clap::{Parser, Subcommand};
use guardrail_core::{
    config::{load_config_or_default, NodeConfig},
    logging::{init_logging, LogConfig},
};
use guardrail_engine::{GuardrailsConfig, Result, ThresholdConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guardtool")]
#[command(version, about = "Inspect node guardrails and streaming limits", long_about = None)]
struct Cli {
    /// Path to the node configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "GUARDRAIL_CONFIG_PATH",
        value_name = "FILE",
        default_value = "node.toml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Mb/s throughput cap for inter-datacenter streaming
    #[command(name = "getinterdcstreamthroughput")]
    GetInterDcStreamThroughput {
        /// Print the entire SSTable streaming throughput instead
        #[arg(short = 'e', long = "entire-sstable-throughput")]
        entire_sstable: bool,
    },

    /// Print every guardrail limit
    #[command(name = "showguardrails")]
    ShowGuardrails,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let node = load_config_or_default(&cli.config);
    init_logging(LogConfig::from(&node.logging));

    match cli.command {
        Commands::GetInterDcStreamThroughput { entire_sstable } => {
            println!("{}", describe_throughput(&node, entire_sstable));
        }
        Commands::ShowGuardrails => {
            let guardrails = if cli.config.exists() {
                GuardrailsConfig::load(&cli.config)?
            } else {
                tracing::warn!(
                    "{} not found, showing default guardrails",
                    cli.config.display()
                );
                GuardrailsConfig::default()
            };
            for line in describe_guardrails(&guardrails) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn describe_throughput(node: &NodeConfig, entire_sstable: bool) -> String {
    node.streaming.describe_inter_dc_throughput(entire_sstable)
}

fn describe_limit(limit: Option<i64>) -> String {
    limit.map_or_else(|| "disabled".to_string(), |l| l.to_string())
}

fn describe_threshold(name: &str, config: &ThresholdConfig) -> String {
    format!(
        "{}: warn={} abort={}",
        name,
        describe_limit(config.warn_limit()),
        describe_limit(config.abort_limit())
    )
}

fn describe_guardrails(config: &GuardrailsConfig) -> Vec<String> {
    let mut lines: Vec<String> = config
        .thresholds()
        .iter()
        .map(|(name, threshold)| describe_threshold(name, threshold))
        .collect();

    let flags = [
        ("user_timestamps", config.user_timestamps_enabled),
        ("secondary_indexes", config.secondary_indexes_enabled),
        ("drop_truncate_table", config.drop_truncate_table_enabled),
    ];
    for (name, enabled) in flags {
        lines.push(format!(
            "{}: {}",
            name,
            if enabled { "enabled" } else { "disabled" }
        ));
    }

    lines.push(format!(
        "table_properties: ignored={} disallowed={}",
        config.table_properties_ignored, config.table_properties_disallowed
    ));
    lines.push(format!(
        "read_consistency_levels: disallowed={}",
        config.read_consistency_levels_disallowed
    ));
    lines.push(format!(
        "write_consistency_levels: disallowed={}",
        config.write_consistency_levels_disallowed
    ));

    lines
}
