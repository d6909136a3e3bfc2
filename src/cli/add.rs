use clap::Parser;

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install from GitHub:\n    agntc add owner/repo\n\n\
                  Install a tag:\n    agntc add owner/repo@v1.0.0\n\n\
                  Install one plugin from a collection:\n    \
                  agntc add https://github.com/owner/repo/tree/main/plugins/reviewer\n\n\
                  Install only for Claude:\n    agntc add owner/repo --agent claude")]
pub struct AddArgs {
    /// Bundle source: owner/repo[@ref], git URL, tree URL, or local directory
    pub source: String,

    /// Install only for these agents (default: agents detected in the project)
    #[arg(long = "agent", short = 'a', value_name = "AGENT")]
    pub agent: Vec<String>,

    /// Overwrite conflicting files instead of skipping the bundle
    #[arg(long, short = 'f')]
    pub force: bool,
}
