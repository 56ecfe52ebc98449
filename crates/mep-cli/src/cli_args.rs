use std::time::Duration;

use clap::Parser;
use mep_dashboard::COPY_FEEDBACK_RESET_MS;
use mep_gateway::{DashboardServerConfig, DEFAULT_DASHBOARD_BIND};

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "mep-dashboard",
    about = "MEP Digital Ecosystem dashboard server",
    version
)]
/// Public struct `Cli` used by the `mep-dashboard` binary.
pub struct Cli {
    #[arg(
        long,
        env = "MEP_DASHBOARD_BIND",
        default_value = DEFAULT_DASHBOARD_BIND,
        help = "Socket address for the dashboard HTTP server."
    )]
    pub bind: String,

    #[arg(
        long = "copy-feedback-ms",
        env = "MEP_DASHBOARD_COPY_FEEDBACK_MS",
        default_value_t = COPY_FEEDBACK_RESET_MS,
        value_parser = parse_positive_u64,
        help = "How long the share modal keeps showing the copied indicator."
    )]
    pub copy_feedback_ms: u64,

    #[arg(
        long = "copy-diagram-definition",
        default_value_t = false,
        conflicts_with = "print_diagram_definition",
        help = "Copy the concept diagram definition to the system clipboard and exit."
    )]
    pub copy_diagram_definition: bool,

    #[arg(
        long = "print-diagram-definition",
        default_value_t = false,
        help = "Print the concept diagram definition to stdout and exit."
    )]
    pub print_diagram_definition: bool,
}

impl Cli {
    pub fn server_config(&self) -> DashboardServerConfig {
        DashboardServerConfig {
            bind: self.bind.trim().to_string(),
            copy_feedback_reset: Duration::from_millis(self.copy_feedback_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_positive_u64, Cli};
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn unit_parse_positive_u64_rejects_zero_and_garbage() {
        assert_eq!(parse_positive_u64("2000"), Ok(2_000));
        assert!(parse_positive_u64("0").is_err());
        assert!(parse_positive_u64("soon").is_err());
    }

    #[test]
    fn functional_cli_flags_build_server_config() {
        let cli = Cli::try_parse_from([
            "mep-dashboard",
            "--bind",
            "0.0.0.0:9000",
            "--copy-feedback-ms",
            "750",
        ])
        .expect("parse cli");
        let config = cli.server_config();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.copy_feedback_reset, Duration::from_millis(750));
        assert!(!cli.copy_diagram_definition);
        assert!(!cli.print_diagram_definition);
    }

    #[test]
    fn regression_cli_rejects_zero_copy_feedback_window() {
        let error = Cli::try_parse_from(["mep-dashboard", "--copy-feedback-ms", "0"])
            .expect_err("zero window must fail");
        assert!(error.to_string().contains("greater than 0"));
    }

    #[test]
    fn regression_cli_rejects_conflicting_definition_modes() {
        let result = Cli::try_parse_from([
            "mep-dashboard",
            "--copy-diagram-definition",
            "--print-diagram-definition",
        ]);
        assert!(result.is_err());
    }
}
