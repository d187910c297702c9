use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;
use snyk_roles_core::run::{run_role_update, RoleUpdateOptions};
use snyk_roles_core::{Context, ExplicitUsers, SnykClient};
use std::io::Write;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr, stdout carries the update transcript
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("update_member_roles")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Update the role for a list of users in a Snyk organization.")
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
        .arg(
            Arg::new("users")
                .long("users")
                .value_name("USER_IDS")
                .required(true)
                .help("A comma-separated list of Snyk User IDs to update."),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .value_name("ROLE_ID")
                .required(true)
                .help("The public ID of the new role to assign."),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the users that would be updated without changing anything."),
        )
        .get_matches();

    let org_id = required(&matches, "org")?;
    let token = SecretString::from(required(&matches, "token")?.to_string());
    let selector = ExplicitUsers::parse(required(&matches, "users")?);
    let opts = RoleUpdateOptions {
        new_role_id: required(&matches, "role")?.to_string(),
        dry_run: matches.get_flag("dry-run"),
    };

    let ctx = Context::new();
    debug!("Context: {:?}", ctx);

    let client = SnykClient::new(&ctx, token)?;

    let mut stdout = std::io::stdout();
    let code = run_role_update(&client, org_id, &selector, &opts, &mut stdout).await?;
    stdout.flush()?;

    std::process::exit(code);
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("--{} is required", name))
}
