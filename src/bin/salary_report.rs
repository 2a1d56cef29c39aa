//! salary-report - render the full-selection dashboard as a static HTML page.

use salary_dash::config::Config;
use salary_dash::dataset::Dataset;
use salary_dash::filter::FilterSelection;
use salary_dash::logging;
use salary_dash::output::HtmlReport;
use salary_dash::pipeline;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::discover()?;
    logging::init(&config.logging)?;

    let dataset = Dataset::load(&config.dataset)?;
    let mut report = HtmlReport::new(&config.report, FilterSelection::all(&dataset));
    pipeline::run_pass(&mut report, &dataset, &config.charts)?;

    println!("{}", report.path().display());
    Ok(())
}
