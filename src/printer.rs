//! Ink cartridge levels of an Epson WF-3520, read from the printer's embedded web page.
//!
//! The status page draws every cartridge as an image whose pixel height is the remaining level;
//! `scale` is the height of a full cartridge.

use scraper::Html;

use crate::html::selector;
use crate::{CheckError, Metric, Resource, ServiceState, Thresholds, TriggerIfValue};

const STATUS_PATH: &str = "/PRESENTATION/HTML/TOP/PRTINFO.HTML";

#[derive(Debug, clap::Parser)]
#[command(
    name = "check_epson_wf3520",
    version,
    about = "Nagios plugin to check the cartridge levels of an Epson WF-3520"
)]
pub struct Args {
    /// Printer IP address or hostname
    #[arg(short = 'H', long, default_value = "localhost")]
    pub host: String,
    /// Listening port of the printer web server
    #[arg(short, long, default_value_t = 80)]
    pub port: u16,
    /// Warning threshold, in percent
    #[arg(short, long, default_value_t = 15.0)]
    pub warning: f64,
    /// Critical threshold, in percent
    #[arg(short, long, default_value_t = 10.0)]
    pub critical: f64,
    /// Image height, in pixels, of a full cartridge
    #[arg(long, default_value_t = 50.0)]
    pub scale: f64,
    /// Append perfdata to the plugin output
    #[arg(long)]
    pub perfdata: bool,
    /// Produce verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cartridge {
    Black,
    Magenta,
    Yellow,
    Cyan,
    Waste,
}

impl Cartridge {
    pub const ALL: [Cartridge; 5] = [
        Cartridge::Black,
        Cartridge::Magenta,
        Cartridge::Yellow,
        Cartridge::Cyan,
        Cartridge::Waste,
    ];

    fn image(&self) -> &'static str {
        match self {
            Cartridge::Black => "Ink_K.PNG",
            Cartridge::Magenta => "Ink_M.PNG",
            Cartridge::Yellow => "Ink_Y.PNG",
            Cartridge::Cyan => "Ink_C.PNG",
            Cartridge::Waste => "Ink_Waste.PNG",
        }
    }

    /// Perfdata label.
    pub fn label(&self) -> &'static str {
        match self {
            Cartridge::Black => "black",
            Cartridge::Magenta => "magenta",
            Cartridge::Yellow => "yellow",
            Cartridge::Cyan => "cyan",
            Cartridge::Waste => "waste",
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            Cartridge::Black => "Black",
            Cartridge::Magenta => "Magenta",
            Cartridge::Yellow => "Yellow",
            Cartridge::Cyan => "Cyan",
            Cartridge::Waste => "Waste container",
        }
    }
}

/// Levels in percent, in the order of [Cartridge::ALL].
#[derive(Clone, Debug, PartialEq)]
pub struct InkLevels(Vec<(Cartridge, f64)>);

impl InkLevels {
    pub fn get(&self, cartridge: Cartridge) -> Option<f64> {
        self.0.iter().find(|(c, _)| *c == cartridge).map(|(_, level)| *level)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Cartridge, f64)> {
        self.0.iter()
    }
}

impl FromIterator<(Cartridge, f64)> for InkLevels {
    fn from_iter<I: IntoIterator<Item = (Cartridge, f64)>>(iter: I) -> Self {
        InkLevels(iter.into_iter().collect())
    }
}

pub fn status_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}{STATUS_PATH}")
}

pub fn fetch_status_page(url: &str) -> Result<String, CheckError> {
    tracing::debug!(url, "fetching printer status page");

    reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|err| CheckError::unreachable(url, err))
}

/// Reads the height of every cartridge image. A single missing or unreadable cartridge fails the
/// whole extraction.
pub fn extract_levels(page: &str, scale: f64) -> Result<InkLevels, CheckError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CheckError::Config(format!("scale must be positive, got {scale}")));
    }

    let document = Html::parse_document(page);

    Cartridge::ALL
        .iter()
        .map(|cartridge| -> Result<(Cartridge, f64), CheckError> {
            let image = selector(&format!("img[src$=\"{}\"]", cartridge.image()))?;
            let element = document
                .select(&image)
                .next()
                .ok_or_else(|| CheckError::missing(cartridge.label()))?;

            let height = element
                .value()
                .attr("height")
                .ok_or_else(|| CheckError::parse(cartridge.label(), "image has no height"))?;
            let height: f64 = height
                .trim()
                .parse()
                .map_err(|err| CheckError::parse(cartridge.label(), format!("height {height:?}: {err}")))?;
            if !height.is_finite() || height < 0.0 {
                return Err(CheckError::parse(
                    cartridge.label(),
                    format!("height {height} is not a pixel count"),
                ));
            }

            let level = height * 100.0 / scale;
            tracing::debug!(cartridge = cartridge.label(), height, level, "cartridge level");
            Ok((*cartridge, level))
        })
        .collect()
}

pub fn evaluate(
    levels: &InkLevels,
    thresholds: &Thresholds<f64>,
    perfdata: bool,
    verbose: bool,
) -> Resource {
    let summary: Vec<String> = levels
        .iter()
        .map(|(cartridge, level)| format!("{}: {}%", cartridge.display_name(), level))
        .collect();

    let mut resource = Resource::new()
        .with_description(summary.join(", "))
        .with_perfdata(perfdata);

    for (cartridge, level) in levels.iter() {
        let metric = Metric::new(cartridge.label(), *level).with_thresholds(thresholds.clone());
        if verbose {
            resource = resource.with_long_output(format!(
                "{}: {}% ({})",
                cartridge.display_name(),
                level,
                metric.state()
            ));
        }
        resource = resource.with_result(metric);
    }

    resource
}

pub fn check(args: &Args) -> Result<Resource, CheckError> {
    let thresholds = Thresholds::new(args.warning, args.critical, TriggerIfValue::Less)
        .map_err(|err| CheckError::Config(err.to_string()))?;

    let page = fetch_status_page(&status_url(&args.host, args.port))?;
    let levels = extract_levels(&page, args.scale)?;

    Ok(evaluate(&levels, &thresholds, args.perfdata, args.verbose))
}

/// Anything preventing a reading is CRITICAL, except a bad command line.
pub fn error_state(err: &CheckError) -> (ServiceState, String) {
    match err {
        CheckError::Config(_) => (ServiceState::Unknown, err.to_string()),
        _ => (
            ServiceState::Critical,
            format!("Cannot check cartridges status: {err}"),
        ),
    }
}
