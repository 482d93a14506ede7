use anyhow::Context;
use log::{error, info};
use std::io;
use std::process;

use units_token_kernel::config::KernelConfig;
use units_token_kernel::dispatch::TokenModule;
use units_token_kernel::driver::run_invocation;
use units_token_kernel::error::KernelError;

fn main() {
    // stdout carries the effect list, so logs go to stderr only
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = match KernelConfig::from_env().context("loading kernel configuration") {
        Ok(config) => config,
        Err(err) => {
            error!("{:#}", err);
            process::exit(KernelError::INVALID_PARAMS);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let status = run_invocation(&TokenModule, &config.limits, &mut stdin.lock(), &mut stdout.lock());

    info!("token kernel exiting with status {}", status.code());
    process::exit(status.code());
}
