//! Subcommands of the `jl` binary that do not scan input.
pub mod generate;
