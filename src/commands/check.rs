//! Prerequisite check for the inspection tool

use crate::config::Settings;
use crate::inspect::ToolCommand;
use crate::utils::prereqs::check_all;
use crate::utils::{CommandPrereq, DetectorError};
use anyhow::Result;

/// Verify the inspection program resolves on PATH
pub fn check(tool: Option<String>, settings: &Settings) -> Result<()> {
    let command = ToolCommand::parse(tool.as_deref().unwrap_or(&settings.inspect.tool))?;
    crate::log_info!("Checking prerequisites for `{} config <image>`...", command);

    let prereq = CommandPrereq::inspect_tool(command.program());
    let (found, missing) = check_all(&[&prereq]);

    if let Some((name, hint)) = missing.into_iter().next() {
        return Err(DetectorError::tool_not_found(&name, &hint).into());
    }

    for name in found {
        println!("✓ {} found", name);
    }
    Ok(())
}
