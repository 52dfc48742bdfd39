//! The `/nael` command: instant responses, no matching involved.

/// Name the command is registered under.
pub const COMMAND_NAME: &str = "nael";

/// Help text shown by the host's command list.
pub const HELP: &str = "toggle the plugin\n\
                        /nael test → print test quotes\n\
                        /nael cfg → open the configuration window";

/// What `/nael <args>` asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Flip `enabled` and persist it.
    Toggle,
    /// Open the settings editor.
    Config,
    /// Run every known quote through the pipeline.
    Test,
}

impl Command {
    /// Parse the argument string. Anything unrecognized toggles, like the
    /// bare command.
    pub fn parse(args: &str) -> Self {
        match args.trim().to_lowercase().as_str() {
            "cfg" => Self::Config,
            "test" => Self::Test,
            _ => Self::Toggle,
        }
    }
}
