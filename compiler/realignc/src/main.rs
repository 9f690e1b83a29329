//! realign command-line entry point.

use realignc::cli::{parse_args, usage, Command};
use realignc::driver::{run, EXIT_FAILURE};
use realignc::version::version;

fn main() {
    realignc::init_tracing();

    match parse_args(std::env::args().skip(1)) {
        Ok(Command::Version) => println!("{}", version()),
        Ok(Command::Help) => println!("{}", usage()),
        Ok(Command::Run { config, paths }) => std::process::exit(run(&config, &paths)),
        Err(e) => {
            eprintln!("realign: {e}");
            eprintln!("Run 'realign -help' for usage.");
            std::process::exit(EXIT_FAILURE);
        }
    }
}
