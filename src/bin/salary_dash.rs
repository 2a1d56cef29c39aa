//! salary-dash - interactive terminal dashboard over the salary dataset.

use salary_dash::config::Config;
use salary_dash::dataset::Dataset;
use salary_dash::{logging, tui};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::discover()?;

    // The dashboard owns the terminal, so logs always go to a file.
    if config.logging.file.is_none() {
        let dir = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        config.logging.file = Some(dir.join("salary-dash.log"));
    }
    logging::init(&config.logging)?;

    let dataset = Dataset::load(&config.dataset)?;
    tui::run(&dataset, &config)?;

    Ok(())
}
