use nagios_probes::{cli, logging, puppet, Runner};

fn main() {
    let args: puppet::Args = cli::parse_or_exit("check_puppet_agent");
    logging::init(args.verbose);

    Runner::new()
        .on_error(puppet::error_state)
        .safe_run(|| puppet::check(&args))
        .print_and_exit()
}
