//! Windpark dashboard entry point — CLI wiring and mode selection.

use std::path::Path;
use std::process;

use windkalk::config::DashConfig;
use windkalk::io::export::export_csv;
use windkalk::kpi::KpiSummary;
use windkalk::provider::{MemoryStore, ProjectCollection, ProjectStore, RestStore};
use windkalk::seed::seed_projects;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    base_url: Option<String>,
    offline: bool,
    export_out: Option<String>,
    #[cfg(feature = "tui")]
    tui: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: Option<u16>,
    #[cfg(feature = "api")]
    bind: Option<String>,
}

fn print_help() {
    eprintln!("windkalk — Windpark investment project dashboard");
    eprintln!();
    eprintln!("Usage: windkalk [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>    Load settings from a TOML config file");
    eprintln!("  --base-url <url>   Project API base URL (default: http://localhost:8000/api/v1)");
    eprintln!("  --offline          Use the built-in sample projects, no API calls");
    eprintln!("  --export <path>    Export the project list to CSV");
    #[cfg(feature = "tui")]
    eprintln!("  --tui              Open the interactive terminal dashboard");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve            Serve the project API instead of consuming one");
        eprintln!("  --port <u16>       API server port (default: from config, 8000)");
        eprintln!("  --bind <addr>      Bind address, e.g. 127.0.0.1:8000 (overrides --port)");
    }
    eprintln!("  --help             Show this help message");
    eprintln!();
    eprintln!("Without --serve, the project list is fetched from the API; if that");
    eprintln!("fails, the built-in sample projects are shown instead.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        base_url: None,
        offline: false,
        export_out: None,
        #[cfg(feature = "tui")]
        tui: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: None,
        #[cfg(feature = "api")]
        bind: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--base-url" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --base-url requires a URL argument");
                    process::exit(1);
                }
                cli.base_url = Some(args[i].clone());
            }
            "--offline" => {
                cli.offline = true;
            }
            "--export" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --export requires a path argument");
                    process::exit(1);
                }
                cli.export_out = Some(args[i].clone());
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = Some(p);
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            #[cfg(feature = "api")]
            "--bind" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --bind requires an address argument");
                    process::exit(1);
                }
                cli.bind = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Picks the project store: REST-backed by default, in-memory with --offline.
fn build_store(cli: &CliArgs, config: &DashConfig) -> Box<dyn ProjectStore> {
    if cli.offline {
        Box::new(MemoryStore::new(seed_projects()))
    } else {
        let base_url = cli.base_url.as_deref().unwrap_or(&config.api.base_url);
        Box::new(RestStore::new(base_url))
    }
}

fn main() {
    let cli = parse_args();

    let config = if let Some(ref path) = cli.config_path {
        match DashConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        DashConfig::default()
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    windkalk::logging::init(Some(&config.log.level));

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(windkalk::api::AppState {
            store: MemoryStore::new(seed_projects()),
        });
        let addr = if let Some(ref bind) = cli.bind {
            match bind.parse::<SocketAddr>() {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("error: --bind value \"{bind}\" is not a valid address: {e}");
                    process::exit(1);
                }
            }
        } else {
            SocketAddr::from(([0, 0, 0, 0], cli.port.unwrap_or(config.api.port)))
        };
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(windkalk::api::serve(state, addr));
        return;
    }

    let store = build_store(&cli, &config);

    #[cfg(feature = "tui")]
    if cli.tui {
        windkalk::tui::run(store, seed_projects());
        return;
    }

    let mut collection = ProjectCollection::new(seed_projects());
    collection.refresh(store.as_ref());

    if let Some(notice) = collection.error() {
        eprintln!("{notice} — Beispieldaten werden angezeigt");
    }

    for project in collection.projects() {
        println!("{project}");
    }

    let kpis = KpiSummary::from_projects(collection.projects());
    println!("\n{kpis}");

    if let Some(ref path) = cli.export_out {
        if let Err(e) = export_csv(collection.projects(), Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Projektliste geschrieben nach {path}");
    }
}
