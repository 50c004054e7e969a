use anyhow::Result;
use clap::Parser;
use std::path::Path;
use stock_icon_gen::icon_gen::{self, ICON_SIZES, OUTPUT_DIR};

#[derive(Debug, Parser)]
#[clap(
    name = "stock-icon-gen",
    version,
    about = "Render the stock chart badge icons into ./icons"
)]
struct Args {
    /// Don't print progress for each generated icon.
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(Path::new(OUTPUT_DIR), &ICON_SIZES, !args.quiet)?;
    Ok(())
}
