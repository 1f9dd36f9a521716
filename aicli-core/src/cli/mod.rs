pub mod args;

pub use args::{BatchTarget, Cli, Commands, DataSource, ProcessDataArgs};
