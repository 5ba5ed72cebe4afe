//! Topping Optimizer CLI
//!
//! Runs a team's worth of topping-selection requirements against a starting
//! inventory and prints each cookie's outcome.

use clap::Parser;
use topping_optimizer::{config::Config, run};

#[derive(Parser)]
#[command(name = "optimize", about = "Solve topping sets for a team of cookies")]
struct Args {
    /// Path to the starting topping inventory, in CSV form.
    #[arg(long)]
    inventory: std::path::PathBuf,

    /// Path to the team's requirements document, in YAML form: one file
    /// naming every cookie to solve, in the order given.
    #[arg(long = "requirements", required = true)]
    requirements: std::path::PathBuf,
}

fn main() {
    topping_optimizer::init();

    let args = Args::parse();
    let inventory_csv = std::fs::read_to_string(&args.inventory).unwrap_or_else(|e| {
        log::error!("failed to read inventory {:?}: {e}", args.inventory);
        std::process::exit(1);
    });
    let requirements_yaml = std::fs::read_to_string(&args.requirements).unwrap_or_else(|e| {
        log::error!("failed to read requirements {:?}: {e}", args.requirements);
        std::process::exit(1);
    });

    let config = Config::default();
    match run(&requirements_yaml, &inventory_csv, &config) {
        Ok(result) => {
            for (name, outcome) in &result.outcomes {
                match outcome {
                    topping_optimizer::team::CookieOutcome::SetSelected(solved) => {
                        println!("{name}:\n{}", solved.set);
                    }
                    topping_optimizer::team::CookieOutcome::NoFeasibleSolution => {
                        println!("{name}: no feasible solution");
                    }
                    topping_optimizer::team::CookieOutcome::Cancelled => {
                        println!("{name}: cancelled");
                    }
                }
            }
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
