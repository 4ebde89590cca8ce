use crate::demo::{demo_reports, render_demo};
use crate::expansion::TreeExpansion;
use crate::infra::{parse_can_delay, parse_datetime, parse_scenario};
use crate::render::{render_directory, render_report, render_transport, render_tree};
use chrono::{Local, NaiveDateTime};
use clap::{ArgAction, Args, Parser, Subcommand};
use nbs_discharge::config::{AppConfig, OutputFormat};
use nbs_discharge::error::AppError;
use nbs_discharge::telemetry;
use nbs_discharge::workflows::screening::{
    ActivePath, DecisionTree, DischargeInputs, DischargeReport, NodeId, ReferralDirectory,
    Scenario, TransportProtocol,
};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "nbs-discharge",
    about = "Newborn screening discharge and follow-up recommendations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Print JSON instead of text (overrides NBS_OUTPUT)
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the discharge recommendation for one newborn
    Decide(DecideArgs),
    /// Print the decision tree, highlighting the path for a scenario
    Tree(TreeArgs),
    /// List wilayat keys and their collection centers
    Wilayat,
    /// Show the lab transport protocol and the next dispatch slot
    Transport(TransportArgs),
    /// Walk through one discharge per scenario
    Demo,
}

#[derive(Args, Debug)]
struct DecideArgs {
    /// Age at discharge in hours
    #[arg(long, required_unless_present = "born_at", conflicts_with = "born_at")]
    age_hours: Option<f64>,
    /// Birth time (YYYY-MM-DD HH:MM)
    #[arg(long, value_parser = parse_datetime, requires = "discharge_at")]
    born_at: Option<NaiveDateTime>,
    /// Planned discharge time (YYYY-MM-DD HH:MM)
    #[arg(long, value_parser = parse_datetime, requires = "born_at")]
    discharge_at: Option<NaiveDateTime>,
    /// Whether discharge can be delayed (yes/no)
    #[arg(long, value_parser = parse_can_delay, action = ArgAction::Set, default_value = "yes")]
    can_delay: bool,
    /// Mother's wilayat key, see `nbs-discharge wilayat`
    #[arg(long)]
    wilayat: Option<String>,
    /// Also print the decision tree with the active path
    #[arg(long)]
    tree: bool,
}

#[derive(Args, Debug, Default)]
struct TreeArgs {
    /// Scenario whose path should be highlighted (A, B or C)
    #[arg(long, value_parser = parse_scenario)]
    scenario: Option<Scenario>,
    /// Wilayat key selecting the referral leaf under scenario C
    #[arg(long)]
    wilayat: Option<String>,
    /// Start from a collapsed tree instead of a fully expanded one
    #[arg(long)]
    collapse_all: bool,
    /// Flip the expanded state of a node id (repeatable)
    #[arg(long = "toggle", value_name = "NODE_ID")]
    toggles: Vec<String>,
}

#[derive(Args, Debug, Default)]
struct TransportArgs {
    /// Reference time for the next dispatch (defaults to now)
    #[arg(long, value_parser = parse_datetime)]
    after: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
struct DecisionView<'a> {
    report: &'a DischargeReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<&'a DecisionTree>,
}

#[derive(Debug, Serialize)]
struct TreeView<'a> {
    tree: &'a DecisionTree,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_path: Option<&'a ActivePath>,
}

#[derive(Debug, Serialize)]
struct TransportView<'a> {
    protocol: &'a TransportProtocol,
    next_dispatch: NaiveDateTime,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };
    info!(
        environment = ?config.environment,
        ?format,
        "nbs discharge command starting"
    );

    let output = execute(cli.command, format)?;
    println!("{output}");
    Ok(())
}

fn execute(command: Command, format: OutputFormat) -> Result<String, AppError> {
    match command {
        Command::Decide(args) => run_decide(args, format),
        Command::Tree(args) => run_tree(args, format),
        Command::Wilayat => {
            let directory = ReferralDirectory::north_batinah();
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(directory.regions())?),
                OutputFormat::Text => Ok(render_directory(directory)),
            }
        }
        Command::Transport(args) => {
            let protocol = TransportProtocol::north_batinah();
            let after = args.after.unwrap_or_else(|| Local::now().naive_local());
            let next_dispatch = protocol.next_dispatch(after);
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&TransportView {
                    protocol: &protocol,
                    next_dispatch,
                })?),
                OutputFormat::Text => Ok(render_transport(&protocol, next_dispatch)),
            }
        }
        Command::Demo => {
            let reports = demo_reports()?;
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&reports)?),
                OutputFormat::Text => Ok(render_demo(&reports)),
            }
        }
    }
}

fn run_decide(args: DecideArgs, format: OutputFormat) -> Result<String, AppError> {
    let DecideArgs {
        age_hours,
        born_at,
        discharge_at,
        can_delay,
        wilayat,
        tree: show_tree,
    } = args;

    let inputs = match (born_at, discharge_at, age_hours) {
        (Some(born_at), Some(discharge_at), _) => {
            DischargeInputs::from_timestamps(born_at, discharge_at, can_delay, wilayat)?
        }
        (_, _, age_hours) => DischargeInputs::new(age_hours.unwrap_or(0.0), can_delay, wilayat)?,
    };

    let tree = DecisionTree::standard();
    let report = DischargeReport::standard(inputs);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&DecisionView {
            report: &report,
            tree: show_tree.then_some(tree),
        })?),
        OutputFormat::Text => {
            let mut output = render_report(&report);
            if show_tree {
                output.push_str("\n\nDecision tree\n");
                output.push_str(&render_tree(
                    tree,
                    Some(&report.active_path),
                    &TreeExpansion::expand_all(tree),
                ));
            }
            Ok(output)
        }
    }
}

fn run_tree(args: TreeArgs, format: OutputFormat) -> Result<String, AppError> {
    let tree = DecisionTree::standard();
    let active = args
        .scenario
        .map(|scenario| tree.active_path(scenario, args.wilayat.as_deref()));

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&TreeView {
            tree,
            active_path: active.as_ref(),
        })?),
        OutputFormat::Text => {
            let mut expansion = if args.collapse_all {
                TreeExpansion::collapse_all(tree)
            } else {
                TreeExpansion::expand_all(tree)
            };
            for raw in &args.toggles {
                match tree.walk().into_iter().find(|(_, node)| node.id().as_str() == raw) {
                    Some((_, node)) => expansion.toggle(node.id()),
                    None => tracing::warn!(node = %raw, "ignoring toggle for unknown node"),
                }
            }
            Ok(render_tree(tree, active.as_ref(), &expansion))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nbs-discharge").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn decide_defaults_to_delay_allowed() {
        let cli = parse(&["decide", "--age-hours", "20", "--wilayat", "sohar"]);
        let Command::Decide(args) = cli.command else {
            panic!("expected decide command");
        };
        assert!(args.can_delay);
        assert_eq!(args.age_hours, Some(20.0));
    }

    #[test]
    fn decide_requires_an_age_source() {
        let result = Cli::try_parse_from(["nbs-discharge", "decide", "--can-delay", "no"]);
        assert!(result.is_err());
    }

    #[test]
    fn decide_text_output_for_delayed_discharge() {
        let cli = parse(&["decide", "--age-hours", "20", "--can-delay", "yes"]);
        let output = execute(cli.command, OutputFormat::Text).expect("decide runs");
        assert!(output.contains("Scenario B - Delay Discharge [MEDIUM]"));
        assert!(output.contains("(4h until eligible)"));
    }

    #[test]
    fn decide_from_timestamps_reports_collection_date() {
        let cli = parse(&[
            "decide",
            "--born-at",
            "2025-03-10 06:00",
            "--discharge-at",
            "2025-03-10 16:00",
            "--can-delay",
            "no",
            "--wilayat",
            "saham",
        ]);
        let output = execute(cli.command, OutputFormat::Text).expect("decide runs");
        assert!(output.contains("Inputs: 10.0 hours old"));
        assert!(output.contains("Required collection date: 2025-03-12 06:00"));
        assert!(output.contains("Direct mother to Saham Hospital"));
    }

    #[test]
    fn decide_rejects_discharge_before_birth() {
        let cli = parse(&[
            "decide",
            "--born-at",
            "2025-03-10 16:00",
            "--discharge-at",
            "2025-03-10 06:00",
        ]);
        let err = execute(cli.command, OutputFormat::Text).expect_err("invalid timestamps");
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn decide_json_includes_tree_on_request() {
        let cli = parse(&["--json", "decide", "--age-hours", "5", "--can-delay", "no", "--tree"]);
        assert!(cli.json);
        let output = execute(cli.command, OutputFormat::Json).expect("decide runs");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value["report"]["outcome"]["scenario"], "C");
        assert_eq!(value["report"]["outcome"]["hours_until_window_closes"], 43);
        assert_eq!(value["tree"]["root"]["id"], "root");
    }

    #[test]
    fn tree_toggle_collapses_a_branch() {
        let cli = parse(&["tree", "--scenario", "b", "--toggle", "age_lt_24"]);
        let output = execute(cli.command, OutputFormat::Text).expect("tree renders");
        assert!(output.contains("● Age < 24 hours [NO] - Too early for NBS sample >"));
        assert!(!output.contains("Can Delay Discharge?"));
    }

    #[test]
    fn tree_json_lists_active_path() {
        let cli = parse(&["tree", "--scenario", "C", "--wilayat", "sohar"]);
        let output = execute(cli.command, OutputFormat::Json).expect("tree renders");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        let path = value["active_path"].as_array().expect("path array");
        assert_eq!(path.len(), 6);
        assert_eq!(path[5], NodeId::new("ref_sohar").as_str());
    }

    #[test]
    fn transport_skips_friday_dispatch() {
        let cli = parse(&["transport", "--after", "2025-03-13 18:00"]);
        let output = execute(cli.command, OutputFormat::Text).expect("transport renders");
        assert!(output.contains("Next dispatch: Saturday 2025-03-15 05:00"));
        assert!(output
            .contains("- DISPATCH: Daily at 5:00 AM to Genetic Center, Muscat (Except Fridays)"));
    }

    #[test]
    fn wilayat_json_lists_keys_in_order() {
        let output = execute(Command::Wilayat, OutputFormat::Json).expect("directory renders");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        let keys: Vec<&str> = value
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|region| region["key"].as_str())
            .collect();
        assert_eq!(keys, ["sohar", "shinas_liwa", "saham", "khabourah_suwaiq"]);
    }
}
