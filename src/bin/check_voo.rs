use nagios_probes::{cli, logging, modem, Runner};

fn main() {
    let args: modem::Args = cli::parse_or_exit("check_voo");
    logging::init(args.verbose);

    Runner::new()
        .on_error(modem::error_state)
        .safe_run(|| modem::check(&args))
        .print_and_exit()
}
