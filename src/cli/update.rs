use clap::Parser;

/// Arguments for the update command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Manifest key to update (default: everything); `owner/repo` includes collection members
    pub key: Option<String>,
}

/// Arguments for the outdated command
#[derive(Parser, Debug)]
pub struct OutdatedArgs {
    /// Manifest key to check (default: everything)
    pub key: Option<String>,
}
