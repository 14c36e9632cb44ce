use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::Context;

use storeplan_api::{LayoutService, ServiceConfig};

/// Reads one JSON request from stdin and writes the JSON response to stdout.
fn main() -> anyhow::Result<ExitCode> {
    storeplan_observability::init();

    let config = ServiceConfig::from_env();
    if config.layout.seed.is_none() {
        tracing::debug!("STOREPLAN_SEED not set; layouts will differ between runs");
    }
    let service = LayoutService::new(config);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;

    let response = service.handle_str(&input);
    let failed = response.get("error").is_some();

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &response).context("failed to write response")?;
    writeln!(stdout).context("failed to write response")?;

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
