use std::collections::HashMap;

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;

use principal_core::provider::{Provider, ProviderError};
use principal_core::resource::{Resource, State, Value};
use principal_provider_aws::AwsProvider;
use principal_provider_aws::endpoints::{self, Partition};
use principal_provider_aws::schemas::service_principal::SERVICE_PRINCIPAL_TYPE;

#[derive(Parser)]
#[command(name = "principal")]
#[command(about = "Resolve AWS service principal names", long_about = None)]
struct Cli {
    /// Region the provider falls back to (defaults to the AWS environment)
    #[arg(long, global = true)]
    provider_region: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the service principal of a service
    Lookup {
        /// Service name (e.g., s3, logs)
        service_name: String,

        /// Region to resolve in (e.g., us-east-1)
        #[arg(long, short)]
        region: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List known regions
    Regions {
        /// Only list regions of this partition
        #[arg(long, short)]
        partition: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List known partitions
    Partitions {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lookup {
            service_name,
            region,
            json,
        } => run_lookup(cli.provider_region, &service_name, region, json).await,
        Commands::Regions { partition, json } => run_regions(partition.as_deref(), json),
        Commands::Partitions { json } => run_partitions(json),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Build the provider from the flag, or from the AWS environment
async fn get_provider(provider_region: Option<String>) -> AwsProvider {
    match provider_region {
        Some(region) => AwsProvider::new(region),
        None => AwsProvider::from_env().await,
    }
}

fn lookup_resource(service_name: &str, region: Option<String>) -> Resource {
    let resource = Resource::data_source(SERVICE_PRINCIPAL_TYPE, service_name)
        .with_attribute("service_name", Value::from(service_name));
    match region {
        Some(region) => resource.with_attribute("region", Value::String(region)),
        None => resource,
    }
}

async fn run_lookup(
    provider_region: Option<String>,
    service_name: &str,
    region: Option<String>,
    json: bool,
) -> Result<(), String> {
    let provider = get_provider(provider_region).await;
    debug!("provider region: {}", provider.region());

    let resource = lookup_resource(service_name, region);
    let state = provider
        .read_data_source(&resource)
        .await
        .map_err(|e| format_provider_error(&e))?;

    if json {
        let output = attributes_to_json(&state.attributes);
        let text = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
        println!("{}", text);
    } else {
        print_state(&state);
    }

    Ok(())
}

fn run_regions(partition: Option<&str>, json: bool) -> Result<(), String> {
    let partitions: Vec<&Partition> = match partition {
        Some(id) => vec![
            endpoints::partition_by_id(id).ok_or_else(|| format!("Unknown partition '{}'", id))?,
        ],
        None => endpoints::default_partitions().iter().collect(),
    };

    if json {
        let regions: Vec<_> = partitions.iter().flat_map(|p| p.regions.iter()).collect();
        let text = serde_json::to_string_pretty(&regions).map_err(|e| e.to_string())?;
        println!("{}", text);
        return Ok(());
    }

    for partition in partitions {
        println!("{}", partition.id().cyan().bold());
        for region in &partition.regions {
            println!("  {:<18} {}", region.id().green(), region.description);
        }
    }

    Ok(())
}

fn run_partitions(json: bool) -> Result<(), String> {
    let partitions = endpoints::default_partitions();

    if json {
        let text = serde_json::to_string_pretty(partitions).map_err(|e| e.to_string())?;
        println!("{}", text);
        return Ok(());
    }

    for partition in partitions {
        println!(
            "{:<12} {:<20} {} ({} regions)",
            partition.id().cyan().bold(),
            partition.name,
            partition.dns_suffix(),
            partition.regions.len()
        );
    }

    Ok(())
}

fn print_state(state: &State) {
    println!(
        "{}",
        format!("{}.{}", state.id.resource_type, state.id.name).cyan().bold()
    );

    let mut keys: Vec<&String> = state.attributes.keys().collect();
    keys.sort();
    for key in keys {
        println!(
            "  {} = {}",
            key.yellow(),
            format_value(&state.attributes[key])
        );
    }
}

/// Error message followed by its causes
fn format_provider_error(err: &ProviderError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    message
}

fn format_value(value: &Value) -> String {
    format!("\"{}\"", value.as_str())
}

fn attributes_to_json(attributes: &HashMap<String, Value>) -> serde_json::Value {
    let obj: serde_json::Map<_, _> = attributes
        .iter()
        .map(|(k, v)| (k.clone(), serde_json::Value::String(v.as_str().to_string())))
        .collect();
    serde_json::Value::Object(obj)
}
