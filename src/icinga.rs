//! Generation of Icinga2 `CheckCommand` objects from the clap definition of a probe.

use clap::ArgAction;

/// Environment variable that switches a probe into generation mode.
pub const GENERATE_ENV: &str = "GENERATE_ICINGA_COMMAND";

#[derive(Debug, thiserror::Error)]
pub enum IcingaCommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid executable path")]
    InvalidExecutablePath,
}

#[derive(Debug, PartialEq)]
struct CommandArgument {
    flag: String,
    var: String,
    description: Option<String>,
    is_flag: bool,
    default_value: Option<String>,
}

/// The arguments of a probe, expressed as Icinga custom variables prefixed with the command name.
#[derive(Debug)]
pub struct CheckCommand {
    name: String,
    arguments: Vec<CommandArgument>,
}

impl CheckCommand {
    /// Collects every named argument of `cmd`. Positional arguments have no Icinga equivalent and
    /// are skipped.
    pub fn from_clap(name: &str, cmd: &clap::Command) -> Self {
        let prefix = name.replace('-', "_");
        let arguments = cmd
            .get_arguments()
            .filter(|arg| !arg.is_hide_set())
            .filter_map(|arg| {
                let long = arg.get_long()?;
                if long == "help" || long == "version" {
                    return None;
                }

                Some(CommandArgument {
                    flag: format!("--{long}"),
                    var: format!("{prefix}_{}", long.replace('-', "_")),
                    description: arg.get_help().map(|s| s.to_string()),
                    is_flag: matches!(arg.get_action(), ArgAction::SetTrue | ArgAction::SetFalse),
                    default_value: arg
                        .get_default_values()
                        .first()
                        .and_then(|v| v.to_str())
                        .map(|s| s.to_owned()),
                })
            })
            .collect();

        CheckCommand {
            name: name.to_owned(),
            arguments,
        }
    }

    pub fn render(&self, executable: &str) -> String {
        let mut out = format!("object CheckCommand \"{}\" {{\n", self.name);
        out.push_str(&format!("  command = [ \"{}\" ]\n", escape(executable)));
        out.push_str("  arguments = {\n");

        for arg in &self.arguments {
            out.push_str(&format!("    \"{}\" = {{\n", arg.flag));
            if arg.is_flag {
                out.push_str(&format!("      set_if = \"${}$\"\n", arg.var));
            } else {
                out.push_str(&format!("      value = \"${}$\"\n", arg.var));
            }
            if let Some(description) = &arg.description {
                out.push_str(&format!("      description = \"{}\"\n", escape(description)));
            }
            out.push_str("    }\n");
        }
        out.push_str("  }\n");

        let defaults: Vec<_> = self
            .arguments
            .iter()
            .filter(|arg| !arg.is_flag)
            .filter_map(|arg| arg.default_value.as_ref().map(|d| (&arg.var, d)))
            .collect();
        if !defaults.is_empty() {
            out.push('\n');
            for (var, default) in defaults {
                out.push_str(&format!("  vars.{} = \"{}\"\n", var, escape(default)));
            }
        }

        out.push_str("}\n");
        out
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('$', "$$")
}

/// Prints the CheckCommand for `cmd` and exits when [GENERATE_ENV] is set, otherwise does nothing.
pub fn print_check_command_if_env_and_exit(
    name: &str,
    cmd: &clap::Command,
) -> Result<(), IcingaCommandError> {
    if std::env::var_os(GENERATE_ENV).is_none() {
        return Ok(());
    }

    let executable = std::env::current_exe()?;
    let executable = executable
        .to_str()
        .ok_or(IcingaCommandError::InvalidExecutablePath)?;

    print!("{}", CheckCommand::from_clap(name, cmd).render(executable));
    std::process::exit(0);
}
