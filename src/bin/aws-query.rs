//! CLI binary for the aws-query crate.

use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use aws_query::{arn, Credentials, Filter, Rds, Region, Vpc, DEFAULT_TIMEOUT};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "aws-query")]
#[command(author, version, about = "Describe RDS and VPC resources through the AWS query API")]
struct Cli {
    /// Region to query
    #[arg(short, long, global = true, env = "AWS_REGION", default_value = "us-east-1")]
    region: String,

    /// Send requests to this URL instead of the region's endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe database instances
    DbInstances(Selection),

    /// Describe database parameter groups
    DbParameterGroups(Selection),

    /// Describe the parameters of database parameter groups
    DbParameters(Selection),

    /// Describe VPCs
    Vpcs(Selection),

    /// Describe subnets
    Subnets(Selection),

    /// Print the ARN of a database instance
    Arn {
        /// 12-digit account number; dashes are ignored
        account: String,

        /// Database instance identifier
        name: String,
    },
}

#[derive(Args)]
struct Selection {
    /// Resource identifiers to describe
    ids: Vec<String>,

    /// Filter as name=value[,value...] (repeatable)
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, Vec<String>)>,
}

impl Selection {
    fn ids(&self) -> Vec<&str> {
        self.ids.iter().map(String::as_str).collect()
    }

    fn filter(&self) -> Option<Filter> {
        let mut filter = Filter::new();
        for (name, values) in &self.filters {
            filter.add(name, values.iter().cloned());
        }
        (!filter.is_empty()).then_some(filter)
    }
}

fn parse_filter(s: &str) -> Result<(String, Vec<String>), String> {
    match s.split_once('=') {
        Some((name, values)) if !name.is_empty() => Ok((
            name.to_string(),
            values.split(',').map(str::to_string).collect(),
        )),
        _ => Err(format!("invalid filter: {} (expected name=value)", s)),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let region = match &cli.endpoint {
        Some(url) => Region::custom(&cli.region, url, url),
        None => Region::from_name(&cli.region)?,
    };
    let timeout = cli.timeout.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT);

    match &cli.command {
        Commands::Arn { account, name } => {
            println!("{}", arn::rds_db(&region, account, name)?);
            Ok(())
        }
        Commands::DbInstances(sel) => {
            let rds = rds(region, timeout)?;
            print_json(&rds.describe_db_instances(&sel.ids(), sel.filter().as_ref())?)
        }
        Commands::DbParameterGroups(sel) => {
            let rds = rds(region, timeout)?;
            print_json(&rds.describe_db_parameter_groups(&sel.ids(), sel.filter().as_ref())?)
        }
        Commands::DbParameters(sel) => {
            let rds = rds(region, timeout)?;
            print_json(&rds.describe_db_parameters(&sel.ids(), sel.filter().as_ref())?)
        }
        Commands::Vpcs(sel) => {
            let vpc = vpc(region, timeout)?;
            print_json(&vpc.describe_vpcs(&sel.ids(), sel.filter().as_ref())?)
        }
        Commands::Subnets(sel) => {
            let vpc = vpc(region, timeout)?;
            print_json(&vpc.describe_subnets(&sel.ids(), sel.filter().as_ref())?)
        }
    }
}

fn rds(region: Region, timeout: Duration) -> Result<Rds, Box<dyn Error>> {
    Ok(Rds::new(Credentials::from_env()?, region)?.with_timeout(timeout)?)
}

fn vpc(region: Region, timeout: Duration) -> Result<Vpc, Box<dyn Error>> {
    Ok(Vpc::new(Credentials::from_env()?, region)?.with_timeout(timeout)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
