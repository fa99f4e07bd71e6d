mod cli;
mod commands;
pub mod infra;
pub mod routes;
mod server;

use math_reviews::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
