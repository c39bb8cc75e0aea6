extern crate wineject;

use std::{env, io};
use std::process::ExitCode;
use wineject::{cli, logging, platform};
use wineject::cli::Command;
use wineject::tuning::Configuration;

fn main() -> ExitCode {
    logging::init();

    let stdout = io::stdout();
    let stderr = io::stderr();

    let code = match cli::parse_args(env::args().collect(), &mut stdout.lock(), &mut stderr.lock()) {
        Command::Exit(code) => code,
        Command::Run(invocation) => {
            let host = platform::open_host();

            cli::run(&host, &invocation, &Configuration::default(), &mut stdout.lock(), &mut stderr.lock())
        }
    };

    ExitCode::from(code as u8)
}
