//! Command-line arguments and the generate loop.

use std::io::{BufWriter, Write};

use anyhow::Result;
use clap::Parser;
use pulid::{active_generator, Pulid, UlidGenerator};
use tracing::debug;

use crate::error::CliError;

/// Generate prefixed, lexicographically sortable unique IDs.
#[derive(Debug, Parser)]
#[command(name = "pulid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Prefix to prepend to the ID (upper-cased).
    #[arg(value_name = "PREFIX")]
    prefix: String,

    /// Number of IDs to generate.
    #[arg(
        short = 'n',
        long = "count",
        env = "PULID_COUNT",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    count: u64,
}

impl Cli {
    /// The prefix as it will appear in the IDs.
    pub fn prefix(&self) -> String {
        self.prefix.to_uppercase()
    }

    /// Writes `count` IDs to `out` using the active generator.
    pub fn run<W: Write>(&self, out: W) -> Result<()> {
        self.run_with(out, &active_generator())
    }

    /// Writes `count` IDs to `out` using `generator`.
    pub fn run_with<W: Write>(&self, out: W, generator: &dyn UlidGenerator) -> Result<()> {
        let prefix = self.prefix();
        debug!(prefix = %prefix, count = self.count, "generating IDs");

        let mut out = BufWriter::new(out);
        for _ in 0..self.count {
            let id = Pulid::new_with(&prefix, generator).map_err(CliError::from)?;
            writeln!(out, "{id}").map_err(CliError::from)?;
        }
        out.flush().map_err(CliError::from)?;

        Ok(())
    }
}
