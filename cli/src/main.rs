mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, html, png};
use terminal::{logging, print};
use tracing::error;

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);
    print::banner(commands.no_banner, commands.quiet);

    let cfg = commands.config();

    let result = match &commands.command {
        Commands::Html(args) => html::html(args, &cfg),
        Commands::Png(args) => png::png(args, &cfg),
    };

    match result {
        Ok(()) => {
            if cfg.quiet == 0 {
                print::end_of_program();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
