//! Flowcheck CLI Entry Point
//!
//! Validates a workflow definition against a contract and prints a report.
//!
//! # Usage
//!
//! ```bash
//! # Validate against a contract file
//! flowcheck workflow.yml contract.yml
//!
//! # Validate against the built-in compound-engineering-loop contract
//! flowcheck workflow.yml --builtin-contract
//!
//! # Debug logging
//! flowcheck workflow.yml contract.yml --verbose
//! ```

use std::env;
use std::process::ExitCode;

use log::{error, info};

use flowcheck::contract::{load_contract, Contract};
use flowcheck::validator::validate_workflow;
use flowcheck::workflow::load_workflow;
use flowcheck::{APP_NAME, VERSION};

/// Default workflow file used when none is specified.
const DEFAULT_WORKFLOW: &str = "workflow.yml";

/// Default contract file used when none is specified.
const DEFAULT_CONTRACT: &str = "contract.yml";

/// Command-line configuration parsed from arguments.
#[derive(Debug)]
struct Config {
    workflow_path: String,
    contract_path: String,
    builtin_contract: bool,
    verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workflow_path: DEFAULT_WORKFLOW.to_string(),
            contract_path: DEFAULT_CONTRACT.to_string(),
            builtin_contract: false,
            verbose: false,
        }
    }
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME, VERSION);
    println!("Workflow Contract Validator");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: flowcheck [OPTIONS] [WORKFLOW_FILE] [CONTRACT_FILE]");
    println!();
    println!("Arguments:");
    println!("  [WORKFLOW_FILE]      Workflow YAML file (default: {})", DEFAULT_WORKFLOW);
    println!("  [CONTRACT_FILE]      Contract YAML file (default: {})", DEFAULT_CONTRACT);
    println!();
    println!("Options:");
    println!("  --builtin-contract   Use the built-in compound-engineering-loop contract");
    println!("  --verbose            Enable debug logging");
    println!("  --help               Show this help message");
    println!("  --version            Show version information");
    println!();
    println!("Examples:");
    println!("  flowcheck workflow.yml contract.yml");
    println!("  flowcheck workflow.yml --builtin-contract");
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut positional_index = 0;
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--builtin-contract" => {
                config.builtin_contract = true;
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                // Positional argument
                match positional_index {
                    0 => config.workflow_path = arg.clone(),
                    1 => config.contract_path = arg.clone(),
                    _ => return Err(format!("Unexpected argument: {}", arg)),
                }
                positional_index += 1;
            }
        }
        i += 1;
    }

    if config.builtin_contract && positional_index > 1 {
        return Err("--builtin-contract and a CONTRACT_FILE are mutually exclusive".to_string());
    }

    Ok(config)
}

/// Main application entry point.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    // Setup logging
    setup_logging(config.verbose);

    // Print banner
    print_banner();

    // Load workflow
    let workflow = load_workflow(&config.workflow_path).map_err(|e| {
        error!("Failed to load workflow: {}", e);
        e
    })?;

    info!(
        "Workflow '{}' loaded: {} steps",
        workflow.id,
        workflow.steps.len()
    );

    // Load contract
    let contract = if config.builtin_contract {
        info!("Using built-in compound-engineering-loop contract");
        Contract::compound_engineering_loop()
    } else {
        load_contract(&config.contract_path).map_err(|e| {
            error!("Failed to load contract: {}", e);
            e
        })?
    };

    // Run the check suite and print the report
    let report = validate_workflow(&workflow, &contract);
    print!("{}", report.render());

    Ok(report.is_passing())
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
