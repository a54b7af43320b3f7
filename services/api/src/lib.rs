mod cli;
mod infra;
mod report;
mod routes;
mod server;

use lead_score::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
