// Entrypoint for the tracker.
// - Keeps `main` small: set up logging, load config, open the tracker and
//   hand it to the menu loop.
// - A corrupt or unreadable snapshot stops the program before the menu is
//   shown; the file is left as is for the user to fix.

use anyhow::Context;
use uni_tracker::{config::TrackerConfig, ui::main_menu, Tracker};

fn main() -> anyhow::Result<()> {
    // Quiet by default so log lines don't interleave with the menu.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = TrackerConfig::from_env();
    log::debug!("using config {config:?}");

    let tracker = Tracker::from_config(&config).with_context(|| {
        format!(
            "Failed to open {}; fix or move the file and try again",
            config.data_file.display()
        )
    })?;

    // Blocks until the user picks Exit.
    main_menu(tracker)?;
    Ok(())
}
