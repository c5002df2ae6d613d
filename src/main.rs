//! Index Release - guided version bump, changelog update and two-phase publish.
//!
//! Exit code 0 on success or an intentional early stop (dry run, test only),
//! 1 on any validation, I/O or publish failure.

use index_release::cli;
use std::process;

#[tokio::main]
async fn main() {
    let exit_code = cli::run().await;
    process::exit(exit_code);
}
