use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// The activity under inspection. The tool is a fixed-target diagnostic;
/// there are no flags.
const ACTIVITY_PATH: &str = "assets/i124672129.fit";

fn main() -> Result<()> {
    // Diagnostics on stderr; the report owns stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    fit_doctor::inspect_file(Path::new(ACTIVITY_PATH), &mut out)?;
    out.flush()?;
    Ok(())
}
