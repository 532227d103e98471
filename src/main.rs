use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    weekly::app::startup::startup().await
}
