use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use page_router::config::loader::load_config;
use page_router::config::RouterConfig;
use page_router::http::page::{build_registry, PageTarget};
use page_router::routing::{Resolution, RouteRegistry};

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Management CLI for the page router", long_about = None)]
struct Cli {
    /// Route table to operate on.
    #[arg(short, long, default_value = "config/routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table
    Check,
    /// List registered routes
    Routes,
    /// Resolve a path against the route table, following redirects
    Resolve { path: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Check => {
            println!(
                "{}: OK ({} pages, max {} redirect hops)",
                cli.config.display(),
                config.pages.len(),
                config.limits.max_redirect_hops
            );
            ExitCode::SUCCESS
        }
        Commands::Routes => match registry_from(&config) {
            Ok(registry) => {
                for entry in registry.entries() {
                    match entry.guard_target() {
                        Some(target) => println!(
                            "{} -> {} (redirects to {})",
                            entry.pattern(),
                            entry.target().name,
                            target
                        ),
                        None => println!("{} -> {}", entry.pattern(), entry.target().name),
                    }
                }
                ExitCode::SUCCESS
            }
            Err(code) => code,
        },
        Commands::Resolve { path } => match registry_from(&config) {
            Ok(registry) => resolve_and_print(&registry, &path),
            Err(code) => code,
        },
    }
}

fn registry_from(config: &RouterConfig) -> Result<RouteRegistry<PageTarget>, ExitCode> {
    build_registry(config).map_err(|e| {
        eprintln!("Failed to build registry: {}", e);
        ExitCode::FAILURE
    })
}

fn resolve_and_print(registry: &RouteRegistry<PageTarget>, path: &str) -> ExitCode {
    match registry.resolve(path) {
        Ok(Resolution::Matched {
            target,
            path,
            params,
            query,
        }) => {
            let out = json!({
                "page": target.name,
                "path": path,
                "params": params,
                "query": query,
            });
            match serde_json::to_string_pretty(&out) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("Failed to encode result: {}", e),
            }
            ExitCode::SUCCESS
        }
        // resolve() follows redirects itself, so a Redirect can't be the
        // final result; handled for exhaustiveness.
        Ok(Resolution::Redirect { to, .. }) => {
            println!("redirect -> {}", to);
            ExitCode::SUCCESS
        }
        Ok(Resolution::NotFound) => {
            eprintln!("{}: no route matched", path);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
