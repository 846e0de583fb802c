use std::io;

use account_watch::session::{Session, SharedWriter};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries the transcript, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let session = Session {
        input: io::stdin().lock(),
        output: SharedWriter::new(io::stdout()),
    };
    session.run()
}
