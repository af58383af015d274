pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::Cli;
pub(crate) use commands::{AddArgs, Commands, EditArgs, ListArgs};
