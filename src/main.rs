mod app_dirs;
mod cli;
mod items;
mod logging;
mod runtime;
mod settings;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use log::LevelFilter;
use runtime::App;
use settings::ResolvedConfig;

fn main() -> Result<()> {
    let cli = parse_cli();

    if cli.list_themes {
        for descriptor in autosuggest_widget::style::theme::descriptors() {
            if descriptor.aliases.is_empty() {
                println!("{}", descriptor.name);
            } else {
                println!("{} ({})", descriptor.name, descriptor.aliases.join(", "));
            }
        }
        return Ok(());
    }

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    run_picker(cli.output, resolved)
}

/// Run the interactive picker and print its outcome in the chosen format.
fn run_picker(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
    logging::initialize(LevelFilter::Debug)?;

    let props = settings.props()?;
    let mut app = App::new(props, settings.log_pane);
    let outcome = app.run()?;

    match format {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
