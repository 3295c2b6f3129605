//! Inspect, validate and compose persisted combo documents
//!
//! Usage:
//!   combo-tool inspect combo.json
//!   combo-tool validate combo.json
//!   combo-tool compose gainer cork:complete --transition 0=skip

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use trick_combo_graph::projections::{chip_labels, StaticCatalog};
use trick_combo_graph::{
    marshal, to_sequence, unmarshal, ComposerCommand, ComposerConfig, ComposerSession,
    MovementNode, SequenceItem,
};

#[derive(Parser)]
#[command(name = "combo-tool")]
#[command(about = "Work with persisted trick combo graphs")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the chips of a persisted combo
    Inspect {
        /// JSON file holding the combo graph
        file: PathBuf,
    },
    /// Check a persisted combo against the marshalling rules
    Validate {
        /// JSON file holding the combo graph
        file: PathBuf,
    },
    /// Build a combo from movement ids and print its persisted form
    Compose {
        /// Movements as `id` or `id:landing_stance`
        #[arg(required = true)]
        movements: Vec<String>,
        /// Transitions as `index=transition_id`, index counting arrows from 0
        #[arg(short, long)]
        transition: Vec<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trick_combo_graph=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Inspect { file } => {
            let document = read_document(&file)?;
            let graph = unmarshal(Some(&document)).context("could not process combo")?;
            let sequence = to_sequence(&graph)?;

            for chip in chip_labels(&sequence, &StaticCatalog::new()) {
                println!("{}", chip.text);
            }
            Ok(())
        }
        Command::Validate { file } => {
            let document = read_document(&file)?;
            let graph = unmarshal(Some(&document)).context("could not process combo")?;
            println!(
                "{}: ok ({} tricks, {} transitions)",
                file.display(),
                graph.node_count(),
                graph.edge_count()
            );
            Ok(())
        }
        Command::Compose {
            movements,
            transition,
        } => {
            let config = ComposerConfig::from_env()?;
            let mut session = ComposerSession::new(config);
            for movement in &movements {
                session.apply(ComposerCommand::AppendMovement {
                    node: parse_movement(movement)?,
                })?;
            }

            for spec in &transition {
                let (index, transition_id) = spec
                    .split_once('=')
                    .with_context(|| format!("transition `{spec}` is not `index=id`"))?;
                let index: usize = index
                    .parse()
                    .with_context(|| format!("transition index `{index}` is not a number"))?;
                let arrow_id = session
                    .sequence()
                    .iter()
                    .filter(|item| item.is_arrow())
                    .nth(index)
                    .map(SequenceItem::id)
                    .with_context(|| format!("combo has no arrow {index}"))?;
                session.apply(ComposerCommand::SetTransition {
                    arrow_id,
                    transition_id: Some(transition_id.to_string()),
                })?;
            }

            let persisted = marshal(&session.finish()?)?;
            println!("{}", serde_json::to_string_pretty(persisted.as_value())?);
            Ok(())
        }
    }
}

fn read_document(file: &Path) -> Result<serde_json::Value> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("{} is not JSON", file.display()))
}

fn parse_movement(raw: &str) -> Result<MovementNode> {
    let node = match raw.split_once(':') {
        Some((movement_id, stance)) => MovementNode::new(movement_id).with_landing_stance(stance),
        None => MovementNode::new(raw),
    };
    if node.movement_id.is_empty() {
        bail!("movement `{raw}` has an empty id");
    }
    Ok(node)
}
