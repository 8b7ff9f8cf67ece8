//! cfgstore CLI
//!
//! Entry point for the `cfgstore` command-line tool.

use cfgstore::{ConfigStore, Value};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cfgstore")]
#[command(about = "Hierarchical YAML configuration with automatic backups", version)]
struct Cli {
    /// Path to the configuration file
    #[arg(
        long,
        short = 'f',
        global = true,
        env = "CFGSTORE_FILE",
        default_value = "config/application.yaml"
    )]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the whole document (creates defaults if the file is missing)
    Show {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the value at a dot-separated path
    Get {
        /// Dot-separated key, e.g. features.discounts.enabled
        path: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Set the value at a dot-separated path
    Set {
        /// Dot-separated key, e.g. features.discounts.enabled
        path: String,

        /// Value, read as YAML (true, 42, 1.5, "[a, b]", text)
        value: String,
    },

    /// List backup snapshots of the configuration file
    Backups {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // stdout carries command output; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let store = ConfigStore::new(cli.file);

    match cli.command {
        Commands::Show { json } => run_show(&store, json),
        Commands::Get { path, json } => run_get(&store, &path, json),
        Commands::Set { path, value } => run_set(&store, &path, &value),
        Commands::Backups { json } => run_backups(&store, json),
    }
}

fn run_show(store: &ConfigStore, json: bool) {
    let doc = match store.read_all() {
        Ok(doc) => doc,
        Err(e) => fail(&e),
    };
    print_value(&Value::Mapping(doc), json);
}

fn run_get(store: &ConfigStore, path: &str, json: bool) {
    match store.get_by_path(path) {
        Ok(Some(value)) => print_value(&value, json),
        Ok(None) => {
            eprintln!("No value at {}", path);
            process::exit(1);
        }
        Err(e) => fail(&e),
    }
}

fn run_set(store: &ConfigStore, path: &str, raw: &str) {
    let value = Value::parse_scalar(raw);
    if let Err(e) = store.set_by_path(path, value) {
        fail(&e);
    }
}

fn run_backups(store: &ConfigStore, json: bool) {
    let backups = match store.backups() {
        Ok(b) => b,
        Err(e) => fail(&e),
    };

    if json {
        let paths: Vec<String> = backups.iter().map(|p| p.display().to_string()).collect();
        match serde_json::to_string_pretty(&paths) {
            Ok(s) => println!("{}", s),
            Err(e) => fail(&e),
        }
    } else if backups.is_empty() {
        println!("No backups for {}", store.path().display());
    } else {
        for path in backups {
            println!("{}", path.display());
        }
    }
}

fn print_value(value: &Value, json: bool) {
    let rendered = if json {
        serde_json::to_string_pretty(value).map_err(|e| e.to_string())
    } else if let Value::String(s) = value {
        Ok(s.clone())
    } else {
        serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| e.to_string())
    };

    match rendered {
        Ok(s) => println!("{}", s),
        Err(e) => fail(&e),
    }
}

fn fail(err: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    process::exit(1);
}
