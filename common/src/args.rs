use clap::Parser;

use crate::exit_codes;

/// Parse `std::env::args`, exiting with [`exit_codes::FAILURE`] on usage errors.
///
/// clap's own default for usage errors is 2; the dotkit tools report every
/// failure as 1. `--help` and `--version` still exit 0.
pub fn parse_args_or_exit<P: Parser>() -> P {
    match P::try_parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_codes::FAILURE
            } else {
                exit_codes::SUCCESS
            };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}
