//! Main application entry point.

use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = lettertrace_app::Args::parse();
    log::info!("Starting LetterTrace with glyph {:?}", args.glyph);

    lettertrace_app::run(&args)?;
    Ok(())
}
