mod cli;
mod infra;
mod report;
mod routes;
mod server;

use fuxing_benefits::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
