//! `generate` subcommand.
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Write a man page for `cmd` and, recursively, one per subcommand named
/// `<parent>-<sub>.1`, into `output_dir` or the current directory.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the output directory or a page could not
/// be written.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };
    std::fs::create_dir_all(&output_dir)
        .context("create output Man directories")?;

    render_page(cmd.clone(), &output_dir, cmd.get_name())
}

fn render_page(cmd: clap::Command, dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(format!("{name}.1"));
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    // clap_mangen takes the page title from the command name, which must be
    // 'static. Leaking is fine for a one-shot generator.
    let title: &'static str = Box::leak(name.to_owned().into_boxed_str());
    let page = cmd.clone().name(title).disable_help_subcommand(true);
    clap_mangen::Man::new(page).render(&mut file)?;
    info!("wrote man page {}", path.display());
    println!("Generated: {}", path.display());

    for sub in cmd.get_subcommands() {
        let sub_name = format!("{name}-{}", sub.get_name());
        render_page(sub.clone(), dir, &sub_name)?;
    }
    Ok(())
}
