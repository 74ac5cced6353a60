#![forbid(unsafe_code)]

//! Thin entrypoint delegating to [`seedcat_cli::run`].

#[tokio::main]
async fn main() {
    let exit_code = seedcat_cli::run().await;
    std::process::exit(exit_code);
}
