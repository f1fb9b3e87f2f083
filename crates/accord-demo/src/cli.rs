use std::path::{Path, PathBuf};
use std::time::Duration;

use accord_core::logging::{self, LogFormat};
use accord_widgets::TweenEngine;
use accord_widgets::accordion::{AccordionBuilder, AccordionConfig, Environment, Target};
use accord_widgets::memory::MemoryHost;
use clap::Parser;

use crate::error::{DemoError, Result};
use crate::replay::{Replay, StepReport, parse_script};

#[derive(Debug, Parser)]
#[command(
    name = "accord-demo",
    about = "Mount an accordion in memory and replay a scripted interaction",
    version
)]
pub struct Cli {
    /// Panel content heights in pixels, comma separated.
    #[arg(long, default_value = "120,260,180")]
    pub heights: String,

    /// Steps to replay: tab indexes, `tick:<ms>`, `settle`, `resize:<px>`, `load`.
    #[arg(long, default_value = "1,settle,1,settle,2,settle")]
    pub script: String,

    /// TOML or JSON accordion configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Panel open on mount (overrides the config file).
    #[arg(long)]
    pub initial: Option<usize>,

    /// Keep one panel open at all times.
    #[arg(long)]
    pub no_self_closing: bool,

    /// Size every panel to the tallest one.
    #[arg(long)]
    pub equalize: bool,

    /// URL fragment naming a panel id to open on mount, e.g. `#panel-2`.
    #[arg(long)]
    pub fragment: Option<String>,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    pub viewport: f64,

    /// Frame length used when ticking transitions.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Emit one JSON object per step instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "warn")]
    pub log: String,

    /// Emit logs as JSON lines (requires the `logging-json` feature).
    #[arg(long)]
    pub log_json: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    logging::init(&cli.log, format)?;
    let reports = run(&cli)?;
    print_reports(&reports, cli.json)
}

/// Mount the accordion described by `cli` and replay its script.
pub fn run(cli: &Cli) -> Result<Vec<StepReport>> {
    let heights = parse_heights(&cli.heights)?;
    let steps = parse_script(&cli.script)?;
    let config = build_config(cli)?;

    let host = MemoryHost::new(heights.iter().copied())
        .with_panel_ids((0..heights.len()).map(|i| format!("panel-{i}")));
    let mut environment = Environment::with_viewport(cli.viewport);
    if let Some(fragment) = &cli.fragment {
        environment = environment.url_fragment(fragment.as_str());
    }
    let accordion = AccordionBuilder::new(config)
        .environment(environment)
        .mount(host, TweenEngine::new())?;
    tracing::info!(
        message = "demo.mounted",
        panels = accordion.panel_count(),
        current = ?accordion.current(),
        steps = steps.len(),
    );

    let mut replay = Replay::new(accordion, Duration::from_millis(cli.frame_ms));
    let mut reports = vec![replay.snapshot("mount", None)];
    reports.extend(replay.run_all(&steps)?);
    if let Some(Target::Tab(i) | Target::Panel(i)) = replay.accordion().host().focused() {
        tracing::info!(message = "demo.finished", focused = i);
    }
    Ok(reports)
}

fn build_config(cli: &Cli) -> Result<AccordionConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AccordionConfig::new(),
    };
    if let Some(initial) = cli.initial {
        config = config.initial_index(initial);
    }
    if cli.no_self_closing {
        config = config.self_closing(false);
    }
    if cli.equalize {
        config = config.equalize_height(true);
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<AccordionConfig> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(AccordionConfig::from_toml_file(path)?),
        Some("json") => Ok(AccordionConfig::from_json_file(path)?),
        other => Err(DemoError::ConfigExtension(
            other.unwrap_or_default().to_owned(),
        )),
    }
}

fn parse_heights(raw: &str) -> Result<Vec<f64>> {
    let heights = raw
        .split(',')
        .map(|h| h.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| DemoError::Heights(raw.to_owned()))?;
    if heights.iter().any(|h| !h.is_finite() || *h < 0.0) {
        return Err(DemoError::Heights(raw.to_owned()));
    }
    Ok(heights)
}

fn print_reports(reports: &[StepReport], json: bool) -> Result<()> {
    if json {
        for report in reports {
            println!("{}", serde_json::to_string(report)?);
        }
        return Ok(());
    }
    println!(
        "{:<12} {:<22} {:<8} {:<6} {:<10} heights",
        "step", "outcome", "current", "busy", "max"
    );
    for r in reports {
        let current = r.current.map_or_else(|| "-".to_owned(), |c| c.to_string());
        let heights: Vec<String> = r.heights.iter().map(|h| format!("{h:.0}")).collect();
        println!(
            "{:<12} {:<22} {:<8} {:<6} {:<10} [{}]",
            r.step,
            r.outcome.as_deref().unwrap_or("-"),
            current,
            r.animating,
            r.max_height,
            heights.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("accord-demo").chain(args.iter().copied()))
            .expect("args parse")
    }

    #[test]
    fn defaults_replay_the_walkthrough() {
        let reports = run(&cli(&[])).expect("run");
        assert_eq!(reports[0].step, "mount");
        assert_eq!(reports[0].current, Some(0));
        let last = reports.last().expect("reports");
        assert_eq!(last.current, Some(2));
        assert!(!last.animating);
    }

    #[test]
    fn flags_override_config() {
        let reports = run(&cli(&[
            "--heights",
            "50,90",
            "--initial",
            "1",
            "--no-self-closing",
            "--equalize",
            "--script",
            "1",
        ]))
        .expect("run");
        assert_eq!(reports[0].current, Some(1));
        assert_eq!(reports[0].max_height, "90px");
        assert_eq!(reports[1].outcome.as_deref(), Some("Focused(1)"));
    }

    #[test]
    fn fragment_selects_initial_panel() {
        let reports = run(&cli(&["--fragment", "#panel-2", "--script", ""])).expect("run");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].current, Some(2));
    }

    #[test]
    fn bad_input_maps_to_usage_exit_code() {
        let err = run(&cli(&["--heights", "10,abc"])).unwrap_err();
        assert!(matches!(err, DemoError::Heights(_)));
        assert_eq!(err.exit_code(), 2);

        let err = run(&cli(&["--config", "accordion.yaml"])).unwrap_err();
        assert!(matches!(err, DemoError::ConfigExtension(ref ext) if ext == "yaml"));
    }

    #[test]
    fn out_of_range_click_is_a_runtime_error() {
        let err = run(&cli(&["--script", "7"])).unwrap_err();
        assert!(matches!(err, DemoError::Accordion(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
