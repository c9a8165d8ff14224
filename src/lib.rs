pub mod alignment;
pub mod config;
pub mod errors;
pub mod runner;
pub mod seq;
pub mod swap;

use crate::errors::SwapError;

pub fn run() -> Result<(), SwapError> {
    runner::run()
}
