//! Remove command implementation

use std::path::Path;

use agntc::error::Result;
use agntc::operations::RemoveOperation;

use super::Runtime;
use crate::cli::RemoveArgs;

/// Run remove command
pub fn run(project: &Path, args: RemoveArgs) -> Result<bool> {
    let runtime = Runtime::from_env();
    let report = RemoveOperation::new(runtime.context(project)).execute(&args.key)?;
    for key in &report.removed {
        println!("removed {key}");
    }
    Ok(true)
}
