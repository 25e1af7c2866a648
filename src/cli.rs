use std::process;

use clap::Parser;

use crate::{icinga, ServiceState};

/// Parses the command line of a probe.
///
/// Usage errors exit with the UNKNOWN code instead of clap's default of 2, which nagios would
/// read as CRITICAL. When `GENERATE_ICINGA_COMMAND` is set the CheckCommand definition is printed
/// instead and the process exits.
pub fn parse_or_exit<A: Parser>(name: &str) -> A {
    if let Err(err) = icinga::print_check_command_if_env_and_exit(name, &A::command()) {
        println!("{} - {}", ServiceState::Unknown, err);
        process::exit(ServiceState::Unknown.exit_code());
    }

    A::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        process::exit(usage_exit_code(&err))
    })
}

/// `--help` and `--version` end the run successfully; anything else is a usage error.
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        ServiceState::Unknown.exit_code()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer;

    fn parse_error(args: &[&str]) -> clap::Error {
        match printer::Args::try_parse_from(args) {
            Err(err) => err,
            Ok(args) => panic!("unexpected success {args:?}"),
        }
    }

    #[test]
    fn test_usage_errors_exit_unknown() {
        let cases: [&[&str]; 3] = [
            &["check_epson_wf3520", "--bogus"],
            &["check_epson_wf3520", "-p", "not-a-port"],
            &["check_epson_wf3520", "-w"],
        ];
        for args in cases {
            assert_eq!(usage_exit_code(&parse_error(args)), 3, "{args:?}");
        }
    }

    #[test]
    fn test_help_and_version_exit_ok() {
        assert_eq!(usage_exit_code(&parse_error(&["check_epson_wf3520", "--help"])), 0);
        assert_eq!(usage_exit_code(&parse_error(&["check_epson_wf3520", "--version"])), 0);
    }
}
