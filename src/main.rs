// Entrypoint for the uploader.
// - Keeps `main` small: parse arguments, dispatch, map the result to an
//   exit status.
// - A missing path prints usage and exits with status 1.

use clap::{CommandFactory, Parser};
use walkreport_upload::cli::{self, Args};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let Some(path) = args.path.clone() else {
        Args::command().print_help()?;
        println!();
        std::process::exit(1);
    };

    let all_succeeded = cli::run(&path, &args)?;
    std::process::exit(cli::exit_code(all_succeeded, &args));
}
