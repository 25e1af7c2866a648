use nagios_probes::{cli, logging, printer, Runner};

fn main() {
    let args: printer::Args = cli::parse_or_exit("check_epson_wf3520");
    logging::init(args.verbose);

    Runner::new()
        .on_error(printer::error_state)
        .safe_run(|| printer::check(&args))
        .print_and_exit()
}
