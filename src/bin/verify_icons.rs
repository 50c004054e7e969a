use anyhow::Result;
use std::path::PathBuf;
use stock_icon_gen::icon_gen::{check_icon, icon_file_name, ICON_SIZES, OUTPUT_DIR};

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(OUTPUT_DIR));

    println!("Checking icons in: {}", dir.display());

    let mut failures = 0;
    for size in ICON_SIZES {
        let path = dir.join(icon_file_name(size));
        let check = check_icon(&path, size)?;

        println!("\n{}:", path.display());
        println!("  Dimensions: {}x{}", check.width, check.height);
        println!(
            "  Corner RGBA: [{}, {}, {}, {}]",
            check.corner[0], check.corner[1], check.corner[2], check.corner[3]
        );
        println!(
            "  Center RGBA: [{}, {}, {}, {}]",
            check.center[0], check.center[1], check.center[2], check.center[3]
        );

        if check.has_transparent_corner() && check.has_badge_center() {
            println!("  ✓ Badge detected");
        } else {
            println!("  ⚠ Badge colors don't match");
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} icon(s) failed the color check");
    }
    Ok(())
}
