pub mod config;
pub mod cutter;
pub mod error;
pub mod io;
pub mod objective;
pub mod optimizer;
pub mod progress;
pub mod requirements;
pub mod substat;
pub mod team;
pub mod topping;
pub mod validity;

/// the fixed size of every topping set this crate ever produces
pub const TEAM_SET_SIZE: usize = 5;

/// initialize logging, mirroring the teacher's dual stderr/file logger but
/// via `env_logger` since this crate has no file-sink requirement of its own
#[cfg(feature = "cli")]
pub fn init() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
}

/// Library-level entry point a CLI binary delegates to: parses a team's
/// requirements document and its starting inventory, runs the greedy
/// cookie-by-cookie search, and returns the outcome for every cookie.
pub fn run(
    requirements_yaml: &str,
    inventory_csv: &str,
    config: &config::Config,
) -> Result<team::TeamResult, error::Error> {
    let inventory = io::csv::parse_inventory(inventory_csv)?;
    let requirements = io::yaml::parse_team(requirements_yaml, config)?;

    let progress = progress::SharedProgress::new();
    let deadline = std::time::Instant::now() + config.deadlines.hard;

    Ok(team::solve_team(&requirements, inventory, progress, deadline))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_reports_no_feasible_solution_on_empty_inventory() {
        let requirements_yaml = "
cookies:
  - name: Squid
    requirements:
      - max: ATK
";
        let result = run(requirements_yaml, "", &config::Config::default()).unwrap();
        assert_eq!(result.outcomes.len(), 1);
        assert!(matches!(result.outcomes[0].1, team::CookieOutcome::NoFeasibleSolution));
    }
}
