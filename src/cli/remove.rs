use clap::Parser;

/// Arguments for the remove command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Manifest key to remove; `owner/repo` includes collection members
    pub key: String,
}
