use std::path::PathBuf;

use axum::http::Request;
use clap::{Parser, Subcommand};
use serde_json::json;

use method_rewrite::config::load_config;
use method_rewrite::routing::Target;
use method_rewrite::{HookResult, MethodModule, ScopeModule, ScopeTree};

#[derive(Parser)]
#[command(name = "method-check")]
#[command(about = "Inspect the effective Method rules of a site configuration", long_about = None)]
struct Cli {
    /// Site configuration file (TOML).
    #[arg(short, long)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the scope for a request and show the resulting method
    Resolve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long, default_value = "/")]
        path: String,
        #[arg(long)]
        method: String,
    },
    /// Print every effective scope
    Dump,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let tree = ScopeTree::build(MethodModule, &config)?;

    let output = match cli.command {
        Commands::Resolve { host, path, method } => {
            let scope = tree.resolve(&Target::new(host.as_deref(), &path));
            let mut request = Request::builder().method(method.as_str()).uri(&path).body(())?;
            match tree.module().fixup(scope, &mut request) {
                HookResult::Continue => {}
            }
            json!({
                "scope": scope,
                "method": method,
                "rewritten": request.method().as_str(),
            })
        }
        Commands::Dump => serde_json::to_value(tree.describe())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
