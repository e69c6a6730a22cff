use rangedl_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; an unwritable state dir must not stop a download.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let args = Cli::parse_or_exit();
    if let Err(err) = cli::run(args).await {
        eprintln!("rangedl error: {:#}", err);
        std::process::exit(1);
    }
}
