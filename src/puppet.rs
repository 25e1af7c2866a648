//! Result and age of the last Puppet agent run, read from `last_run_summary.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::{CheckError, Metric, Resource, ServiceState, Thresholds, TriggerIfValue, Unit};

pub const DEFAULT_SUMMARY_FILE: &str = "/opt/puppetlabs/puppet/public/last_run_summary.yaml";

#[derive(Debug, clap::Parser)]
#[command(
    name = "check_puppet_agent",
    version,
    about = "Nagios plugin to check the results of the last Puppet agent run"
)]
pub struct Args {
    /// Location of the last_run_summary.yaml file
    #[arg(short = 'F', long, default_value = DEFAULT_SUMMARY_FILE)]
    pub file: PathBuf,
    /// Seconds since the last Puppet run to trigger a warning
    #[arg(short, long, default_value_t = 1200)]
    pub warn: i64,
    /// Seconds since the last Puppet run to trigger a critical
    #[arg(short, long, default_value_t = 2700)]
    pub crit: i64,
    /// Append perfdata to the plugin output
    #[arg(long)]
    pub perfdata: bool,
    /// Produce verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// The fields of the run summary the check looks at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub resources_failed: i64,
    pub events_failure: i64,
    /// Unix timestamp of the last run.
    pub last_run: i64,
}

pub fn read_summary(path: &Path) -> Result<RunSummary, CheckError> {
    tracing::debug!(path = %path.display(), "reading puppet run summary");

    let content =
        fs::read_to_string(path).map_err(|err| CheckError::unreachable(path.display().to_string(), err))?;
    parse_summary(&content)
}

pub fn parse_summary(content: &str) -> Result<RunSummary, CheckError> {
    let document: Value =
        serde_yaml::from_str(content).map_err(|err| CheckError::parse("summary", err))?;

    Ok(RunSummary {
        resources_failed: integer_at(&document, "resources.failed")?,
        events_failure: integer_at(&document, "events.failure")?,
        last_run: integer_at(&document, "time.last_run")?,
    })
}

/// Looks up a dotted key path. Puppet writes plain integers, older agents sometimes quoted them.
fn integer_at(document: &Value, path: &str) -> Result<i64, CheckError> {
    let value = path
        .split('.')
        .try_fold(document, |node, key| node.get(key))
        .ok_or_else(|| CheckError::missing(path))?;

    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(i),
            None => truncate(path, n.as_f64()),
        },
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(i),
            Err(_) => truncate(path, s.trim().parse::<f64>().ok())
                .map_err(|_| CheckError::parse(path, format!("{s:?} is not a number"))),
        },
        other => Err(CheckError::parse(path, format!("unexpected value {other:?}"))),
    }
}

/// Drops the fractional part of a float, refusing NaN, infinities and values outside `i64`.
fn truncate(path: &str, value: Option<f64>) -> Result<i64, CheckError> {
    match value {
        Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f.trunc() as i64)
        }
        Some(f) => Err(CheckError::parse(path, format!("{f} is out of range"))),
        None => Err(CheckError::parse(path, "not a number")),
    }
}

/// Renders a duration the way a human would say it, e.g. `1 days, 2 hours, 3 minutes and 4
/// seconds ago`. Leading zero units are left out.
pub fn humanize_elapsed(secs: i64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let mut message = format!("{seconds} seconds ago");
    if minutes > 0 {
        message = format!("{minutes} minutes and {message}");
    }
    if hours > 0 {
        message = format!("{hours} hours, {message}");
    }
    if days > 0 {
        message = format!("{days} days, {message}");
    }
    message
}

/// Failures win over the age of the run; a run dated in the future is always critical.
pub fn evaluate(
    summary: &RunSummary,
    now: i64,
    thresholds: &Thresholds<i64>,
    perfdata: bool,
    verbose: bool,
) -> Result<Resource, CheckError> {
    let elapsed = now.checked_sub(summary.last_run).ok_or_else(|| {
        CheckError::parse("time.last_run", format!("{} is out of range", summary.last_run))
    })?;

    let mut resource = Resource::new()
        .with_perfdata(perfdata)
        .with_result(Metric::new("resources_failed", summary.resources_failed).with_minimum(0))
        .with_result(Metric::new("events_failure", summary.events_failure).with_minimum(0));

    if verbose {
        resource = resource
            .with_long_output(format!("Failed resources: {}", summary.resources_failed))
            .with_long_output(format!("Failed events: {}", summary.events_failure))
            .with_long_output(format!("Last run timestamp: {}", summary.last_run));
    }

    if summary.resources_failed > 0 {
        return Ok(resource
            .with_state(ServiceState::Critical)
            .with_description(format!("{} resource failures", summary.resources_failed)));
    }

    if summary.events_failure > 0 {
        return Ok(resource
            .with_state(ServiceState::Critical)
            .with_description(format!("{} event failures", summary.events_failure)));
    }

    if elapsed < 0 {
        return Ok(resource
            .with_state(ServiceState::Critical)
            .with_description("Puppet summary file modified in the future!"));
    }

    Ok(resource
        .with_result(
            Metric::new("last_run", elapsed)
                .with_thresholds(thresholds.clone())
                .with_unit(Unit::Seconds)
                .with_minimum(0),
        )
        .with_description(format!("Puppet last ran {}", humanize_elapsed(elapsed))))
}

pub fn check(args: &Args) -> Result<Resource, CheckError> {
    let thresholds = Thresholds::new(args.warn, args.crit, TriggerIfValue::Greater)
        .map_err(|err| CheckError::Config(err.to_string()))?;

    let summary = read_summary(&args.file)?;
    let now = chrono::Utc::now().timestamp();
    tracing::debug!(?summary, now, "puppet run summary");

    evaluate(&summary, now, &thresholds, args.perfdata, args.verbose)
}

pub fn error_state(err: &CheckError) -> (ServiceState, String) {
    match err {
        CheckError::Unreachable { target, reason } => (
            ServiceState::Critical,
            format!("Cannot open {target} ({reason}). Check permissions and Puppet status."),
        ),
        CheckError::Config(_) => (ServiceState::Unknown, err.to_string()),
        _ => (
            ServiceState::Critical,
            format!("Error parsing the Puppet status file: {err}"),
        ),
    }
}
