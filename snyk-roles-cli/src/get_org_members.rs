use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;
use snyk_roles_core::run::run_member_listing;
use snyk_roles_core::{Context, SnykClient};
use std::io::Write;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr, stdout carries the CSV
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("get_org_members")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fetch members from a Snyk organization and output their details in CSV format.")
        .arg(
            Arg::new("org")
                .long("org")
                .value_name("ORG_ID")
                .required(true)
                .help("Your Snyk Organization ID."),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .value_name("TOKEN")
                .required(true)
                .help("Your Snyk Personal Access Token (PAT)."),
        )
        .get_matches();

    let org_id = required(&matches, "org")?;
    let token = SecretString::from(required(&matches, "token")?.to_string());

    let ctx = Context::new();
    debug!("Context: {:?}", ctx);

    let client = SnykClient::new(&ctx, token)?;

    let mut stdout = std::io::stdout();
    let code = run_member_listing(&client, org_id, &mut stdout).await?;
    stdout.flush()?;

    std::process::exit(code);
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("--{} is required", name))
}
