//! Connectivity of a VOO Technicolor cable modem in bridge mode.
//!
//! The modem only shows its connection status after a login through its web interface, so the
//! probe keeps a cookie session for the login and the status page. The status page is a set of
//! tables, which are located by their title row and read by row label or column header.

use std::path::PathBuf;

use reqwest::blocking::Client;
use reqwest::{Method, Url};
use scraper::{ElementRef, Html};

use crate::credentials::{self, CredentialStrategy, Credentials};
use crate::html::{leading_number, selector, text_of};
use crate::{CheckError, Metric, Resource, ServiceState};

pub const DEFAULT_HOST: &str = "192.168.100.1";
pub const DEFAULT_CONFIG_FILE: &str = "check_voo.yml";

const CONNECTION_PAGE: &str = "RgConnect.asp";
const USERNAME_FIELD: &str = "loginUsername";
const PASSWORD_FIELD: &str = "loginPassword";

#[derive(Debug, clap::Parser)]
#[command(
    name = "check_voo",
    version,
    about = "Nagios plugin to check the connectivity status of a VOO Technicolor modem in bridge mode",
    after_help = "The configuration file holds `login` and `password` with --credentials file, \
                  or `server`, `role`, `secret`, `mountpoint` and `path` with --credentials vault."
)]
pub struct Args {
    /// IP address of the VOO modem
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    pub host: String,
    /// Configuration file location
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,
    /// Where the modem credentials come from
    #[arg(long, value_enum, default_value_t = CredentialStrategy::File)]
    pub credentials: CredentialStrategy,
    /// Append perfdata to the plugin output
    #[arg(long)]
    pub perfdata: bool,
    /// Produce verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// A filled-in login form, ready to be submitted.
#[derive(Debug, PartialEq)]
pub struct LoginForm {
    pub action: Url,
    pub method: Method,
    pub fields: Vec<(String, String)>,
}

/// Finds the form named `login` and fills it in the way a browser would submit it.
pub fn parse_login_form(
    page: &str,
    base: &Url,
    credentials: &Credentials,
) -> Result<LoginForm, CheckError> {
    let document = Html::parse_document(page);
    let form = document
        .select(&selector("form[name=\"login\"]")?)
        .next()
        .ok_or_else(|| CheckError::Auth("login form not found".to_owned()))?;

    let action = form.value().attr("action").unwrap_or("");
    let action = base
        .join(action)
        .map_err(|err| CheckError::Auth(format!("invalid login form action {action:?}: {err}")))?;

    let method = match form.value().attr("method") {
        Some(method) if method.eq_ignore_ascii_case("get") => Method::GET,
        _ => Method::POST,
    };

    let mut fields = Vec::new();
    let mut submit_seen = false;
    for input in form.select(&selector("input[name]")?) {
        let element = input.value();
        let Some(name) = element.attr("name") else {
            continue;
        };
        let kind = element.attr("type").unwrap_or("text");
        let value = element.attr("value").unwrap_or("");

        match kind.to_ascii_lowercase().as_str() {
            "submit" | "image" => {
                if !submit_seen {
                    submit_seen = true;
                    fields.push((name.to_owned(), value.to_owned()));
                }
            }
            "button" | "reset" | "file" => {}
            "checkbox" | "radio" if element.attr("checked").is_none() => {}
            _ => fields.push((name.to_owned(), value.to_owned())),
        }
    }

    for (name, value) in [
        (USERNAME_FIELD, &credentials.login),
        (PASSWORD_FIELD, &credentials.password),
    ] {
        match fields.iter_mut().find(|(field, _)| field == name) {
            Some(field) => field.1 = value.clone(),
            None => fields.push((name.to_owned(), value.clone())),
        }
    }

    Ok(LoginForm {
        action,
        method,
        fields,
    })
}

fn has_login_form(page: &str) -> bool {
    let document = Html::parse_document(page);
    selector("form[name=\"login\"]")
        .map(|login| document.select(&login).next().is_some())
        .unwrap_or(false)
}

/// A cookie holding web session on the modem.
pub struct ModemSession {
    client: Client,
    base: Url,
}

impl ModemSession {
    pub fn open(host: &str) -> Result<Self, CheckError> {
        let base = Url::parse(&format!("http://{host}/"))
            .map_err(|err| CheckError::Config(format!("invalid modem address {host:?}: {err}")))?;

        let client = Client::builder()
            .cookie_store(true)
            .user_agent("Mozilla/5.0")
            .build()
            .map_err(|err| CheckError::Config(format!("cannot create HTTP client: {err}")))?;

        Ok(ModemSession { client, base })
    }

    fn get(&self, path: &str) -> Result<String, CheckError> {
        let url = self
            .base
            .join(path)
            .map_err(|err| CheckError::Config(format!("invalid path {path:?}: {err}")))?;
        tracing::debug!(%url, "fetching modem page");

        self.client
            .get(url.clone())
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|err| CheckError::unreachable(url.as_str(), err))
    }

    pub fn login(&self, credentials: &Credentials) -> Result<(), CheckError> {
        let page = self.get("")?;
        let form = parse_login_form(&page, &self.base, credentials)?;
        tracing::debug!(action = %form.action, method = %form.method, "submitting login form");

        let request = self.client.request(form.method.clone(), form.action.clone());
        let request = if form.method == Method::GET {
            request.query(&form.fields)
        } else {
            request.form(&form.fields)
        };

        let response = request
            .send()
            .map_err(|err| CheckError::unreachable(form.action.as_str(), err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Auth(format!("login answered with {status}")));
        }

        let body = response
            .text()
            .map_err(|err| CheckError::unreachable(form.action.as_str(), err))?;
        if has_login_form(&body) {
            return Err(CheckError::Auth("modem rejected the credentials".to_owned()));
        }

        Ok(())
    }

    pub fn connection_page(&self) -> Result<String, CheckError> {
        self.get(CONNECTION_PAGE)
    }
}

/// Rows of cell texts.
type Table = Vec<Vec<String>>;

/// Tables that do not contain other tables; the page nests its data tables in layout tables.
fn leaf_tables(document: &Html) -> Result<Vec<Table>, CheckError> {
    let table = selector("table")?;
    let row = selector("tr")?;
    let cell = selector("td, th")?;

    let tables = document
        .select(&table)
        .filter(|t| t.select(&table).next().is_none())
        .map(|t: ElementRef<'_>| -> Table {
            t.select(&row)
                .map(|r| r.select(&cell).map(text_of).collect::<Vec<String>>())
                .collect()
        })
        .collect();

    Ok(tables)
}

fn find_table<'a>(tables: &'a [Table], title: &str) -> Result<&'a Table, CheckError> {
    let title_lower = title.to_lowercase();
    tables
        .iter()
        .find(|table| {
            table
                .first()
                .map(|row| row.iter().any(|c| c.to_lowercase().contains(&title_lower)))
                .unwrap_or(false)
        })
        .ok_or_else(|| CheckError::missing(format!("table {title:?}")))
}

fn row_value<'a>(table: &'a Table, label: &str, column: usize) -> Result<&'a str, CheckError> {
    table
        .iter()
        .find(|row| row.first().is_some_and(|c| c.eq_ignore_ascii_case(label)))
        .and_then(|row| row.get(column))
        .map(|c| c.as_str())
        .ok_or_else(|| CheckError::missing(format!("row {label:?}")))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartupStatus {
    pub downstream: String,
    pub connectivity: String,
}

impl StartupStatus {
    pub fn is_locked(&self) -> bool {
        self.downstream.eq_ignore_ascii_case("Locked")
    }

    pub fn is_connected(&self) -> bool {
        self.connectivity.eq_ignore_ascii_case("OK")
    }
}

fn startup_status(tables: &[Table]) -> Result<StartupStatus, CheckError> {
    let table = find_table(tables, "Startup Procedure")?;

    Ok(StartupStatus {
        downstream: row_value(table, "Acquire Downstream Channel", 2)?.to_owned(),
        connectivity: row_value(table, "Connectivity State", 1)?.to_owned(),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Downstream,
    Upstream,
}

impl Direction {
    fn title(&self) -> &'static str {
        match self {
            Direction::Downstream => "Downstream Bonded Channels",
            Direction::Upstream => "Upstream Bonded Channels",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Direction::Downstream => "down",
            Direction::Upstream => "up",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    /// Position in the table, starting at 1.
    pub number: usize,
    pub modulation: Option<String>,
    pub symbol_rate: Option<String>,
    /// dBmV
    pub power: f64,
    /// dB, downstream only.
    pub snr: Option<f64>,
}

fn column(header: &[String], names: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let cell = cell.to_lowercase();
        names.iter().any(|name| cell.contains(name))
    })
}

fn channels(tables: &[Table], direction: Direction) -> Result<Vec<Channel>, CheckError> {
    let table = find_table(tables, direction.title())?;
    let prefix = direction.prefix();

    let header_index = table
        .iter()
        .position(|row| row.iter().any(|c| c.eq_ignore_ascii_case("Power")))
        .ok_or_else(|| CheckError::missing(format!("{prefix}stream channel header")))?;
    let header = &table[header_index];

    let power_column = column(header, &["power"])
        .ok_or_else(|| CheckError::missing(format!("{prefix}stream power column")))?;
    let snr_column = match direction {
        Direction::Downstream => Some(
            column(header, &["snr"])
                .ok_or_else(|| CheckError::missing(format!("{prefix}stream SNR column")))?,
        ),
        Direction::Upstream => None,
    };
    let modulation_column = column(header, &["modulation", "channel type"]);
    let symbol_rate_column = column(header, &["symbol rate"]);

    let rows = table[header_index + 1..]
        .iter()
        .filter(|row| row.len() >= header.len() && row.iter().any(|c| !c.is_empty()));

    let mut found = Vec::new();
    for (index, row) in rows.enumerate() {
        let number = index + 1;
        let text = |column: Option<usize>| column.map(|c| row[c].clone());

        let power_field = format!("{prefix}_{number}_pwr");
        let power = leading_number(&row[power_column])
            .ok_or_else(|| CheckError::parse(&power_field, format!("{:?}", row[power_column])))?;

        let snr = match snr_column {
            Some(c) => Some(leading_number(&row[c]).ok_or_else(|| {
                CheckError::parse(format!("{prefix}_{number}_snr"), format!("{:?}", row[c]))
            })?),
            None => None,
        };

        found.push(Channel {
            number,
            modulation: text(modulation_column),
            symbol_rate: text(symbol_rate_column),
            power,
            snr,
        });
    }

    if found.is_empty() {
        return Err(CheckError::missing(format!("{prefix}stream channels")));
    }

    tracing::debug!(direction = ?direction, channels = found.len(), "channels read");
    Ok(found)
}

fn describe(channel: &Channel) -> String {
    let mut line = format!("  Channel {}:", channel.number);
    if let Some(modulation) = &channel.modulation {
        line.push_str(&format!(" {modulation},"));
    }
    if let Some(symbol_rate) = &channel.symbol_rate {
        line.push_str(&format!(" {symbol_rate},"));
    }
    line.push_str(&format!(" power {} dBmV", channel.power));
    if let Some(snr) = channel.snr {
        line.push_str(&format!(", SNR {snr} dB"));
    }
    line
}

/// Reads the connection page and reports on it. Channel tables are only required once the
/// modem reports a locked downstream and a working connection.
pub fn evaluate_page(page: &str, perfdata: bool, verbose: bool) -> Result<Resource, CheckError> {
    let document = Html::parse_document(page);
    let tables = leaf_tables(&document)?;
    let status = startup_status(&tables)?;
    tracing::debug!(?status, "startup procedure");

    let mut resource = Resource::new().with_perfdata(perfdata);
    if verbose {
        resource = resource
            .with_long_output(format!("Acquire Downstream Channel: {}", status.downstream))
            .with_long_output(format!("Connectivity State: {}", status.connectivity));
    }

    if !status.is_locked() {
        return Ok(resource
            .with_state(ServiceState::Critical)
            .with_description("Downstream channel unlocked"));
    }
    if !status.is_connected() {
        return Ok(resource
            .with_state(ServiceState::Critical)
            .with_description("Connection issue"));
    }

    let downstream = channels(&tables, Direction::Downstream)?;
    let upstream = channels(&tables, Direction::Upstream)?;

    resource = resource.with_state(ServiceState::Ok).with_description(format!(
        "Downstream locked, connectivity OK ({} downstream, {} upstream channels)",
        downstream.len(),
        upstream.len()
    ));

    for channel in &downstream {
        let n = channel.number;
        resource = resource.with_result(Metric::new(format!("down_{n}_pwr"), channel.power));
        if let Some(snr) = channel.snr {
            resource = resource.with_result(Metric::new(format!("down_{n}_snr"), snr));
        }
    }
    for channel in &upstream {
        let n = channel.number;
        resource = resource.with_result(Metric::new(format!("up_{n}_pwr"), channel.power));
    }

    if verbose {
        resource = resource.with_long_output("Downstream channels info");
        for channel in &downstream {
            resource = resource.with_long_output(describe(channel));
        }
        resource = resource.with_long_output("Upstream channels info");
        for channel in &upstream {
            resource = resource.with_long_output(describe(channel));
        }
    }

    Ok(resource)
}

/// Credentials are resolved before the modem is contacted at all.
pub fn check(args: &Args) -> Result<Resource, CheckError> {
    let credentials = credentials::source_for(args.credentials, &args.config_file).resolve()?;

    let session = ModemSession::open(&args.host)?;
    session.login(&credentials)?;
    let page = session.connection_page()?;

    evaluate_page(&page, args.perfdata, args.verbose)
}

/// Not being able to talk to the modem is UNKNOWN; a page that cannot be read is CRITICAL.
pub fn error_state(err: &CheckError) -> (ServiceState, String) {
    match err {
        CheckError::Auth(_) => (ServiceState::Unknown, format!("Cannot login to modem: {err}")),
        CheckError::Unreachable { .. } => (
            ServiceState::Unknown,
            format!("Cannot open connection info: {err}"),
        ),
        CheckError::Config(_) => (ServiceState::Unknown, err.to_string()),
        CheckError::Parse { .. } => (
            ServiceState::Critical,
            format!("Unexpected connection info page: {err}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            login: "voo".to_owned(),
            password: "s3cr3t".to_owned(),
        }
    }

    fn connection_page(downstream: &str, connectivity: &str, down: usize, up: usize) -> String {
        let mut html = String::from(
            "<html><head><title>Technicolor</title></head><body>\
             <table class=\"layout\"><tr><td>\n",
        );

        html.push_str(&format!(
            "<table>\
             <tr><th colspan=\"3\"><strong>Startup Procedure</strong></th></tr>\
             <tr><td>Procedure</td><td>Status</td><td>Comment</td></tr>\
             <tr><td>Acquire Downstream Channel</td><td>651000000 Hz</td>\
             <td><script>i18n(\"{downstream}\")</script></td></tr>\
             <tr><td>Connectivity State</td><td><script>i18n(\"{connectivity}\")</script></td>\
             <td>Operational</td></tr>\
             <tr><td>Boot State</td><td>OK</td><td>Operational</td></tr>\
             </table>\n"
        ));

        html.push_str(
            "<table>\
             <tr><th colspan=\"8\"><strong><script>i18n(\"Downstream Bonded Channels\")</script></strong></th></tr>\
             <tr><td>Channel</td><td>Lock Status</td><td>Modulation</td><td>Channel ID</td>\
             <td>Symbol rate</td><td>Frequency</td><td>Power</td><td>SNR</td></tr>",
        );
        for i in 1..=down {
            html.push_str(&format!(
                "<tr><td>{i}</td><td>Locked</td><td>QAM256</td><td>{}</td><td>6952 kSym/s</td>\
                 <td>{} Hz</td><td> {:.1} dBmV</td><td> 38.{i} dB</td></tr>",
                i + 20,
                602_000_000 + i * 8_000_000,
                i as f64 / 2.0
            ));
        }
        html.push_str("</table>\n");

        html.push_str(
            "<table>\
             <tr><th colspan=\"7\"><strong>Upstream Bonded Channels</strong></th></tr>\
             <tr><td>Channel</td><td>Lock Status</td><td>US Channel Type</td><td>Channel ID</td>\
             <td>Symbol Rate</td><td>Frequency</td><td>Power</td></tr>",
        );
        for i in 1..=up {
            html.push_str(&format!(
                "<tr><td>{i}</td><td>Locked</td><td>ATDMA</td><td>{i}</td><td>5120 kSym/s</td>\
                 <td>{} Hz</td><td> 4{i}.5 dBmV</td></tr>",
                30_000_000 + i * 6_400_000
            ));
        }
        html.push_str("</table>\n</td></tr></table></body></html>");
        html
    }

    fn perf_tokens(output: &str) -> Vec<String> {
        let (_, perf) = output.split_once('|').expect("perfdata present");
        perf.split_whitespace().map(|s| s.to_owned()).collect()
    }

    #[test]
    fn test_connected_modem_is_ok() {
        let resource = evaluate_page(&connection_page("Locked", "OK", 16, 4), true, false).unwrap();

        assert_eq!(resource.state(), ServiceState::Ok);
        assert_eq!(resource.exit_code(), 0);

        let output = resource.to_nagios_string();
        assert!(output.starts_with(
            "OK - Downstream locked, connectivity OK (16 downstream, 4 upstream channels)|"
        ));

        let tokens = perf_tokens(&output);
        let count = |prefix: &str, suffix: &str| {
            tokens
                .iter()
                .filter(|t| t.starts_with(prefix) && t.contains(suffix))
                .count()
        };
        assert_eq!(count("'down_", "_pwr'="), 16);
        assert_eq!(count("'down_", "_snr'="), 16);
        assert_eq!(count("'up_", "_pwr'="), 4);
        assert_eq!(tokens.len(), 36);

        assert_eq!(tokens[0], "'down_1_pwr'=0.5;;;;");
        assert_eq!(tokens[1], "'down_1_snr'=38.1;;;;");
        assert_eq!(tokens[3], "'down_2_snr'=38.2;;;;");
        assert_eq!(tokens[2], "'down_2_pwr'=1;;;;");
        assert_eq!(tokens[32], "'up_1_pwr'=41.5;;;;");
    }

    #[test]
    fn test_perfdata_is_opt_in() {
        let resource = evaluate_page(&connection_page("Locked", "OK", 16, 4), false, false).unwrap();
        assert!(!resource.to_nagios_string().contains('|'));
    }

    #[test]
    fn test_unlocked_downstream_is_critical() {
        let resource = evaluate_page(&connection_page("Not Locked", "OK", 0, 0), true, false).unwrap();

        assert_eq!(
            &resource.to_nagios_string(),
            "CRITICAL - Downstream channel unlocked"
        );
        assert_eq!(resource.exit_code(), 2);
    }

    #[test]
    fn test_connection_issue_is_critical() {
        let resource =
            evaluate_page(&connection_page("Locked", "In Progress", 16, 4), false, false).unwrap();

        assert_eq!(&resource.to_nagios_string(), "CRITICAL - Connection issue");
    }

    #[test]
    fn test_verbose_output() {
        let resource = evaluate_page(&connection_page("Locked", "OK", 2, 1), false, true).unwrap();

        assert_eq!(
            resource.long_output(),
            [
                "Acquire Downstream Channel: Locked",
                "Connectivity State: OK",
                "Downstream channels info",
                "  Channel 1: QAM256, 6952 kSym/s, power 0.5 dBmV, SNR 38.1 dB",
                "  Channel 2: QAM256, 6952 kSym/s, power 1 dBmV, SNR 38.2 dB",
                "Upstream channels info",
                "  Channel 1: ATDMA, 5120 kSym/s, power 41.5 dBmV",
            ]
        );
        assert_eq!(resource.exit_code(), 0);
    }

    #[test]
    fn test_layout_changes_fail_explicitly() {
        let page = connection_page("Locked", "OK", 16, 4).replace("Startup Procedure", "Boot Log");
        match evaluate_page(&page, false, false) {
            Err(CheckError::Parse { field, .. }) => assert_eq!(field, "table \"Startup Procedure\""),
            other => panic!("unexpected result {:?}", other.map(|r| r.to_nagios_string())),
        }

        let page = connection_page("Locked", "OK", 0, 4);
        match evaluate_page(&page, false, false) {
            Err(CheckError::Parse { field, .. }) => assert_eq!(field, "downstream channels"),
            other => panic!("unexpected result {:?}", other.map(|r| r.to_nagios_string())),
        }

        let page = connection_page("Locked", "OK", 16, 4).replace(" 43.5 dBmV", "---");
        match evaluate_page(&page, false, false) {
            Err(CheckError::Parse { field, .. }) => assert_eq!(field, "up_3_pwr"),
            other => panic!("unexpected result {:?}", other.map(|r| r.to_nagios_string())),
        }
    }

    #[test]
    fn test_parse_login_form() {
        let page = r#"<html><body>
            <form name="login" action="/goform/login" method="post">
              <input type="hidden" name="csrf" value="f00d">
              <input type="text" name="loginUsername" value="">
              <input type="password" name="loginPassword">
              <input type="checkbox" name="remember">
              <input type="submit" name="apply" value="Login">
              <input type="submit" name="cancel" value="Cancel">
            </form></body></html>"#;
        let base = Url::parse("http://192.168.100.1/").unwrap();
        let form = parse_login_form(page, &base, &credentials()).unwrap();

        assert_eq!(form.action.as_str(), "http://192.168.100.1/goform/login");
        assert_eq!(form.method, Method::POST);
        assert_eq!(
            form.fields,
            vec![
                ("csrf".to_owned(), "f00d".to_owned()),
                ("loginUsername".to_owned(), "voo".to_owned()),
                ("loginPassword".to_owned(), "s3cr3t".to_owned()),
                ("apply".to_owned(), "Login".to_owned()),
            ]
        );
    }

    #[test]
    fn test_parse_login_form_missing() {
        let base = Url::parse("http://192.168.100.1/").unwrap();
        let result = parse_login_form("<html><body>Welcome</body></html>", &base, &credentials());
        assert!(matches!(result, Err(CheckError::Auth(_))));
        assert!(!has_login_form("<html><body>Welcome</body></html>"));
    }

    #[test]
    fn test_error_state() {
        let (state, msg) = error_state(&CheckError::Auth("login form not found".to_owned()));
        assert_eq!(state, ServiceState::Unknown);
        assert_eq!(msg, "Cannot login to modem: authentication failed: login form not found");

        let (state, _) = error_state(&CheckError::unreachable("http://192.168.100.1/", "refused"));
        assert_eq!(state, ServiceState::Unknown);

        let (state, _) = error_state(&CheckError::Config("missing config".to_owned()));
        assert_eq!(state, ServiceState::Unknown);

        let (state, _) = error_state(&CheckError::missing("downstream channels"));
        assert_eq!(state, ServiceState::Critical);
    }

    #[test]
    fn test_credential_failure_stops_before_network() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = dir.path().join("check_voo.yml");
        let args = Args::try_parse_from([
            "check_voo",
            "-H",
            "203.0.113.1",
            "-c",
            config.to_str().unwrap(),
        ])?;

        let err = check(&args).unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
        assert_eq!(error_state(&err).0, ServiceState::Unknown);
        Ok(())
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["check_voo"]).unwrap();
        assert_eq!(args.host, DEFAULT_HOST);
        assert_eq!(args.config_file, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(args.credentials, CredentialStrategy::File);
        assert!(!args.perfdata);

        let args = Args::try_parse_from(["check_voo", "--credentials", "vault", "--perfdata", "-v"])
            .unwrap();
        assert_eq!(args.credentials, CredentialStrategy::Vault);
        assert!(args.perfdata);
        assert!(args.verbose);

        assert!(Args::try_parse_from(["check_voo", "--credentials", "keyring"]).is_err());
        assert!(Args::try_parse_from(["check_voo", "-w", "10"]).is_err());
    }
}
