//! ROI evaluator entry point: CLI wiring and report printing.

use std::path::Path;
use std::process;

use roi_eval::config::CostAssumptions;
use roi_eval::eval::evaluator::evaluate;
use roi_eval::eval::viability::check_expansions;
use roi_eval::io::export::export_csv;
use roi_eval::profile::{ClientProfile, EvaluationParameters};
use roi_eval::report::{ExpansionTable, ProfileSummary, RoiTable};

/// Parsed CLI arguments.
struct CliArgs {
    client_path: Option<String>,
    preset: Option<String>,
    bess_pct: Option<f64>,
    assumptions_path: Option<String>,
    csv_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("roi-eval — Capacity-extension ROI evaluator for utility clients");
    eprintln!();
    eprintln!("Usage: roi-eval [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --client <path>          Load client profile from TOML file");
    eprintln!("  --preset <name>          Use a built-in demo client (textile_mill)");
    eprintln!("  --bess-pct <f64>         BESS sizing as percent of DC solar (default: 10)");
    eprintln!("  --assumptions <path>     Load cost assumptions from TOML file");
    eprintln!("  --csv-out <path>         Export opportunity rows to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the report");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --client or --preset is given, the textile_mill demo is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        client_path: None,
        preset: None,
        bess_pct: None,
        assumptions_path: None,
        csv_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--client" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --client requires a path argument");
                    process::exit(1);
                }
                cli.client_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--bess-pct" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --bess-pct requires a numeric argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<f64>() {
                    cli.bess_pct = Some(p);
                } else {
                    eprintln!("error: --bess-pct value \"{}\" is not a valid number", args[i]);
                    process::exit(1);
                }
            }
            "--assumptions" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --assumptions requires a path argument");
                    process::exit(1);
                }
                cli.assumptions_path = Some(args[i].clone());
            }
            "--csv-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --csv-out requires a path argument");
                    process::exit(1);
                }
                cli.csv_out = Some(args[i].clone());
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
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
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

fn main() {
    let cli = parse_args();

    // Load assumptions: --assumptions takes priority, then the defaults
    let assumptions = if let Some(ref path) = cli.assumptions_path {
        match CostAssumptions::from_toml_file(Path::new(path)) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        CostAssumptions::default()
    };

    let errors = assumptions.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Load profile: --client takes priority, then --preset, then the demo default
    let profile = if let Some(ref path) = cli.client_path {
        match ClientProfile::from_toml_file(Path::new(path)) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ClientProfile::from_preset(name) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ClientProfile::textile_mill()
    };

    let mut params = EvaluationParameters::default();
    if let Some(pct) = cli.bess_pct {
        params.bess_percent_of_solar = pct;
    }

    // Evaluate
    let evaluation = match evaluate(&profile, &params, &assumptions) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let expansions = check_expansions(&profile);

    // Print report sections
    println!("{}", ProfileSummary(&profile));
    println!();
    println!("{}", ExpansionTable(&expansions));
    println!();
    println!("{}", RoiTable(&evaluation));

    // Export CSV if requested
    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&evaluation, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Opportunity rows written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(roi_eval::api::AppState { assumptions });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(roi_eval::api::serve(state, addr));
    }
}
