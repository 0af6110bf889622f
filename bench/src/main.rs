use batchbench::cli;
use batchbench_core::{DefaultStore, Store};
use std::{
    env,
    io::{self, Write},
    process,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut out = io::stdout().lock();
    let code = cli::run_cli(env::args_os(), DefaultStore::create, &mut out, &mut io::stderr());
    let _ = out.flush();

    process::exit(code);
}
