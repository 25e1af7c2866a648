//! The nagios_probes crate provides the building blocks shared by its check binaries (service
//! states, thresholds, metrics and the final plugin output) together with the probes themselves.
//!
//! ```rust
//! use nagios_probes::{Metric, Resource, ServiceState, Thresholds, TriggerIfValue};
//!
//! let thresholds = Thresholds::new(15.0, 10.0, TriggerIfValue::Less).unwrap();
//! let resource = Resource::new()
//!     .with_description("Black: 42%")
//!     .with_result(Metric::new("black", 42.0).with_thresholds(thresholds))
//!     .with_perfdata(true);
//!
//! assert_eq!(resource.state(), ServiceState::Ok);
//! assert_eq!(&resource.to_nagios_string(), "OK - Black: 42%|'black'=42;15;10;;");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::process;

pub mod cli;
pub mod credentials;
pub mod error;
pub mod icinga;
pub mod logging;
pub mod modem;
pub mod printer;
pub mod puppet;

mod html;
mod runner;

pub use crate::error::CheckError;
pub use crate::runner::{safe_run, Runner, RunnerResult};

/// Represents a service state from nagios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    /// Returns the corresponding nagios exit code to signal the service state of self.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }

    /// Returns the more severe of both states.
    ///
    /// Unknown outranks Warning but never masks a Critical, which is how nagios itself picks the
    /// worst state of a service group.
    pub fn worst(self, other: ServiceState) -> ServiceState {
        let rank = |state: ServiceState| match state {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Unknown => 2,
            ServiceState::Critical => 3,
        };

        if rank(other) > rank(self) {
            other
        } else {
            self
        }
    }

    fn severity(&self) -> Option<u8> {
        match self {
            ServiceState::Ok => Some(0),
            ServiceState::Warning => Some(1),
            ServiceState::Critical => Some(2),
            ServiceState::Unknown => None,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Ok < Warning < Critical. Unknown only compares equal to itself.
impl PartialOrd for ServiceState {
    fn partial_cmp(&self, other: &ServiceState) -> Option<Ordering> {
        match (self.severity(), other.severity()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Unit {
    None,
    Seconds,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::None => Ok(()),
            Unit::Seconds => f.write_str("s"),
        }
    }
}

/// The direction in which a value becomes a problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerIfValue {
    /// Alert when the value rises above the thresholds (elapsed time, failures).
    Greater,
    /// Alert when the value drops below the thresholds (ink levels, signal margins).
    Less,
}

#[derive(Debug, thiserror::Error)]
#[error("critical threshold {critical} must be {direction} than warning threshold {warning}")]
pub struct ThresholdError {
    warning: String,
    critical: String,
    direction: &'static str,
}

/// A warning/critical pair with a direction.
///
/// The critical boundary is always strictly beyond the warning boundary, so a value can never be
/// critical without having passed the warning boundary first.
#[derive(Clone, Debug, PartialEq)]
pub struct Thresholds<T> {
    warning: T,
    critical: T,
    trigger: TriggerIfValue,
}

impl<T> Thresholds<T>
where
    T: PartialOrd + Clone + fmt::Display,
{
    pub fn new(warning: T, critical: T, trigger: TriggerIfValue) -> Result<Self, ThresholdError> {
        let (valid, direction) = match trigger {
            TriggerIfValue::Greater => (critical > warning, "greater"),
            TriggerIfValue::Less => (critical < warning, "lower"),
        };

        if !valid {
            return Err(ThresholdError {
                warning: warning.to_string(),
                critical: critical.to_string(),
                direction,
            });
        }

        Ok(Thresholds {
            warning,
            critical,
            trigger,
        })
    }

    /// Critical is checked before warning; a value sitting exactly on a boundary does not trigger.
    pub fn evaluate(&self, value: &T) -> ServiceState {
        let beyond = |boundary: &T| match self.trigger {
            TriggerIfValue::Greater => value > boundary,
            TriggerIfValue::Less => value < boundary,
        };

        if beyond(&self.critical) {
            ServiceState::Critical
        } else if beyond(&self.warning) {
            ServiceState::Warning
        } else {
            ServiceState::Ok
        }
    }
}

/// Represents a single metric of a resource. You shouldn't need to implement this by yourself
/// since [Metric] already implements it.
pub trait ResourceMetric {
    fn name(&self) -> &str;
    fn state(&self) -> ServiceState;
    fn perf_string(&self) -> String;
}

/// A named observation. If thresholds are given its state is computed from them, otherwise it is
/// always [ServiceState::Ok].
///
/// ```rust
/// # use nagios_probes::{Metric, ServiceState, Thresholds, TriggerIfValue};
/// let thresholds = Thresholds::new(1200, 2700, TriggerIfValue::Greater).unwrap();
/// let metric = Metric::new("last_run", 1500).with_thresholds(thresholds);
/// assert_eq!(metric.state(), ServiceState::Warning);
/// ```
#[derive(Clone, Debug)]
pub struct Metric<T> {
    name: String,
    value: T,
    thresholds: Option<Thresholds<T>>,
    min: Option<T>,
    unit: Unit,
}

impl<T> Metric<T>
where
    T: PartialOrd + Clone + fmt::Display,
{
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Metric {
            name: name.into(),
            value,
            thresholds: None,
            min: None,
            unit: Unit::None,
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds<T>) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn with_minimum(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ServiceState {
        self.thresholds
            .as_ref()
            .map(|t| t.evaluate(&self.value))
            .unwrap_or(ServiceState::Ok)
    }

    /// Renders `'label'=value[unit];warn;crit;min;max`, keeping empty fields in place. No probe
    /// knows an upper bound, so `max` is always empty.
    pub fn to_perf_string(&self) -> String {
        let label = self.name.replace('=', "_").replace('\'', "''");
        let optional = |v: Option<&T>| v.map(|v| v.to_string()).unwrap_or_default();

        format!(
            "'{}'={}{};{};{};{};",
            label,
            self.value,
            self.unit,
            optional(self.thresholds.as_ref().map(|t| &t.warning)),
            optional(self.thresholds.as_ref().map(|t| &t.critical)),
            optional(self.min.as_ref()),
        )
    }
}

impl<T> ResourceMetric for Metric<T>
where
    T: PartialOrd + Clone + fmt::Display,
{
    fn name(&self) -> &str {
        Metric::name(self)
    }

    fn state(&self) -> ServiceState {
        Metric::state(self)
    }

    fn perf_string(&self) -> String {
        self.to_perf_string()
    }
}

/// A Resource is the report for a single service from the perspective of nagios.
///
/// Unless a state is forced with [Resource::with_state], the state is the worst state of its
/// metrics. Perfdata is only rendered once enabled with [Resource::with_perfdata].
#[derive(Default)]
pub struct Resource {
    state: Option<ServiceState>,
    description: Option<String>,
    metrics: Vec<Box<dyn ResourceMetric>>,
    perfdata: bool,
    long_output: Vec<String>,
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metrics: Vec<String> = self.metrics.iter().map(|m| m.perf_string()).collect();
        f.debug_struct("Resource")
            .field("state", &self.state())
            .field("description", &self.description)
            .field("metrics", &metrics)
            .field("long_output", &self.long_output)
            .finish()
    }
}

impl Resource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the state, disabling the automatic determination from the metrics.
    pub fn with_state(mut self, state: ServiceState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_result<M>(mut self, metric: M) -> Self
    where
        M: ResourceMetric + 'static,
    {
        self.metrics.push(Box::new(metric));
        self
    }

    pub fn with_perfdata(mut self, enabled: bool) -> Self {
        self.perfdata = enabled;
        self
    }

    /// Adds a line printed after the status line. Does not influence the state.
    pub fn with_long_output(mut self, line: impl Into<String>) -> Self {
        self.long_output.push(line.into());
        self
    }

    pub fn long_output(&self) -> &[String] {
        &self.long_output
    }

    pub fn state(&self) -> ServiceState {
        match self.state {
            Some(state) => state,
            None => self
                .metrics
                .iter()
                .map(|m| m.state())
                .fold(ServiceState::Ok, ServiceState::worst),
        }
    }

    /// Returns the plugin output: `STATUS - description|perfdata` followed by the long output.
    pub fn to_nagios_string(&self) -> String {
        let mut s = self.state().to_string();

        if let Some(description) = &self.description {
            s.push_str(" - ");
            s.push_str(description);
        }

        if self.perfdata && !self.metrics.is_empty() {
            let perf: Vec<String> = self.metrics.iter().map(|m| m.perf_string()).collect();
            s.push('|');
            s.push_str(&perf.join(" "));
        }

        for line in &self.long_output {
            s.push('\n');
            s.push_str(line);
        }

        s
    }

    pub fn exit_code(&self) -> i32 {
        self.state().exit_code()
    }

    /// Prints [Resource::to_nagios_string] and exits with [Resource::exit_code].
    pub fn print_and_exit(&self) -> ! {
        println!("{}", self.to_nagios_string());
        process::exit(self.exit_code());
    }
}
