//! Completion scripts and man pages, generated from the clap definition.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::CommandFactory;

use crate::Cli;

pub(crate) fn handle_completions(
    shell: clap_complete::Shell,
) -> Result<(), Box<dyn std::error::Error>> {
    write_completions(shell, &mut io::stdout().lock());
    Ok(())
}

pub(crate) fn handle_man(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        // One page per subcommand, written into the directory.
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            clap_mangen::generate_to(Cli::command(), &dir)?;
            println!("Generated man pages in: {}", dir.display());
        }
        // Just the top-level page on stdout.
        None => write_man(&mut io::stdout().lock())?,
    }
    Ok(())
}

fn write_completions<W: Write>(shell: clap_complete::Shell, out: &mut W) {
    clap_complete::generate(shell, &mut Cli::command(), "octoview", out);
}

fn write_man<W: Write>(out: &mut W) -> io::Result<()> {
    clap_mangen::Man::new(Cli::command()).render(out)
}
