use gha_token_cli::run_cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run_cli().await {
        // Written directly so RUST_LOG cannot hide it.
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
