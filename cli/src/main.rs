mod commands;
mod terminal;

use commands::{CommandLine, Commands, map, resolve};
use terminal::{print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    spinner::init_logging();

    match commands.command {
        Commands::Resolve { addresses, opts } => {
            print::header("resolving computer identities", opts.quiet);
            resolve::resolve(addresses, &opts).await
        }
        Commands::Map { opts } => {
            print::header("zone address map", opts.quiet);
            map::map(&opts).await
        }
    }
}
