use anyhow::{anyhow, Context as _, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use medsupply_access::{
    auth::{role_definitions, Capabilities},
    config, AuthSession, Permission, Role, RoleLevel, UserPermissions,
};
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = config::load_config().context("failed to load configuration")?;
    config::init_tracing(app_config.effective_log_level(), app_config.log_json);

    match cli.command {
        Commands::Matrix => handle_matrix(cli.json)?,
        Commands::Check(args) => handle_check(args, cli.json)?,
        Commands::Capabilities(args) => handle_capabilities(args, cli.json)?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "access-cli",
    about = "Inspect back-office roles, permissions and capabilities",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the permissions granted to every role
    Matrix,
    /// Check a single permission for a role
    Check(CheckArgs),
    /// Print the capability flags a role receives
    Capabilities(RoleArgs),
}

#[derive(Args)]
struct RoleArgs {
    #[arg(long, help = "Role name (e.g. sales_rep) or numeric role level")]
    role: String,
}

#[derive(Args)]
struct CheckArgs {
    #[arg(long, help = "Role name (e.g. sales_rep) or numeric role level")]
    role: String,
    #[arg(long, help = "Permission as resource:action or resource:action:context")]
    permission: String,
}

#[derive(Serialize)]
struct CheckOutcome<'a> {
    role: &'a str,
    role_level: RoleLevel,
    permission: String,
    allowed: bool,
}

fn parse_role_level(raw: &str) -> Result<RoleLevel> {
    if let Ok(role) = Role::from_str(raw) {
        return Ok(role.level());
    }
    raw.parse::<i64>()
        .map(RoleLevel)
        .map_err(|_| anyhow!("'{raw}' is neither a role name nor a role level"))
}

fn permissions_for(raw_role: &str) -> Result<UserPermissions> {
    let level = parse_role_level(raw_role)?;
    debug!(%level, "deriving permissions");
    Ok(UserPermissions::derive(Some(&AuthSession::new(
        Uuid::nil(),
        level,
    ))))
}

fn handle_matrix(json: bool) -> Result<()> {
    let definitions = role_definitions();

    if json {
        return print_json(&definitions);
    }

    for definition in definitions {
        println!(
            "{} (level {}): {}",
            definition.role.display_name(),
            definition.role.level(),
            definition.description
        );
        if definition.role == Role::Admin {
            println!("  * every permission (bypass)");
            continue;
        }
        for permission in &definition.permissions {
            println!("  - {}", permission);
        }
    }

    Ok(())
}

fn handle_check(args: CheckArgs, json: bool) -> Result<()> {
    let perms = permissions_for(&args.role)?;
    let permission: Permission = args
        .permission
        .parse()
        .with_context(|| format!("invalid permission '{}'", args.permission))?;
    let allowed = perms.has_permission(permission.resource, permission.action, permission.context);

    let outcome = CheckOutcome {
        role: perms.role_display_name(),
        role_level: perms.role_level.unwrap_or(RoleLevel::CUSTOMER),
        permission: permission.to_string(),
        allowed,
    };

    if json {
        print_json(&outcome)
    } else {
        println!(
            "{} (level {}) {} {}",
            outcome.role,
            outcome.role_level,
            if allowed { "is allowed" } else { "is denied" },
            outcome.permission
        );
        Ok(())
    }
}

fn handle_capabilities(args: RoleArgs, json: bool) -> Result<()> {
    let perms = permissions_for(&args.role)?;
    let capabilities = Capabilities::derive(&perms);

    if json {
        return print_json(&capabilities);
    }

    let rendered = serde_json::to_value(capabilities)?;
    println!("{}", perms.role_display_name());
    if let Some(sections) = rendered.as_object() {
        for (section, flags) in sections {
            println!("  {section}:");
            if let Some(flags) = flags.as_object() {
                for (flag, value) in flags {
                    println!("    {flag}: {value}");
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
