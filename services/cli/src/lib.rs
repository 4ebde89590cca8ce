mod cli;
mod demo;
mod expansion;
mod infra;
mod render;

use nbs_discharge::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
