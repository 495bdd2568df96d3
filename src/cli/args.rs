use std::fmt::Write;
use std::path::PathBuf;

use autosuggest_widget::Item;
use clap::{
    ArgAction, ColorChoice, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use crate::app_dirs;
use crate::items::parse_pair;

/// Produce the full version banner including the config directory.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("autosuggest {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "autosuggest",
    version,
    long_version = long_version(),
    about = "Pick an item from a fuzzy-filtered, spring-animated suggestion list",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `autosuggest` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "AUTOSUGGEST_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'i',
        long = "items",
        value_name = "FILE",
        help = "Read items from a JSON array, `key<TAB>value` lines or plain lines"
    )]
    pub(crate) items: Option<PathBuf>,
    #[arg(
        long = "item",
        value_name = "KEY=VALUE",
        value_parser = parse_pair,
        action = ArgAction::Append,
        help = "Add a single item; repeatable (a bare VALUE is also its key)"
    )]
    pub(crate) item: Vec<Item>,
    #[arg(
        short = 'd',
        long,
        value_name = "TEXT",
        help = "Initial text of the input (default: empty)"
    )]
    pub(crate) default_value: Option<String>,
    #[arg(
        short = 'p',
        long,
        value_name = "TEXT",
        help = "Text shown while the input is empty (default: none)"
    )]
    pub(crate) placeholder: Option<String>,
    #[arg(
        short = 'o',
        long,
        value_enum,
        help = "Side of the input the suggestions open toward (default: bottom)"
    )]
    pub(crate) origin: Option<OriginArg>,
    #[arg(
        long = "max-height",
        value_name = "ROWS",
        help = "Height the suggestion panel springs open to (default: 320)"
    )]
    pub(crate) max_height: Option<u16>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: library theme)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        long,
        value_enum,
        help = "Spring preset driving the panel (default: stiff)"
    )]
    pub(crate) spring: Option<SpringArg>,
    #[arg(
        short = 'f',
        long,
        value_enum,
        help = "Strategy used to match items (default: fuzzy)"
    )]
    pub(crate) filter: Option<FilterArg>,
    #[arg(long = "no-animation", help = "Open and close the panel without animating")]
    pub(crate) no_animation: bool,
    #[arg(long = "list-themes", help = "List the built-in themes and exit")]
    pub(crate) list_themes: bool,
    #[arg(
        long = "print-config",
        help = "Print the resolved configuration before starting"
    )]
    pub(crate) print_config: bool,
    #[arg(
        long = "log-pane",
        help = "Show the runtime log pane on start (toggle with Ctrl+L)"
    )]
    pub(crate) log_pane: bool,
    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Format used to print the outcome"
    )]
    pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Panel origins selectable from the CLI.
pub(crate) enum OriginArg {
    Top,
    Bottom,
}

impl OriginArg {
    /// Return the string representation consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            OriginArg::Top => "top",
            OriginArg::Bottom => "bottom",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Spring presets selectable from the CLI.
pub(crate) enum SpringArg {
    NoWobble,
    Gentle,
    Wobbly,
    Stiff,
}

impl SpringArg {
    /// Return the preset identifier consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SpringArg::NoWobble => "no-wobble",
            SpringArg::Gentle => "gentle",
            SpringArg::Wobbly => "wobbly",
            SpringArg::Stiff => "stiff",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Matching strategies selectable from the CLI.
pub(crate) enum FilterArg {
    Fuzzy,
    Substring,
    Prefix,
}

impl FilterArg {
    /// Return the filter name consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            FilterArg::Fuzzy => "fuzzy",
            FilterArg::Substring => "substring",
            FilterArg::Prefix => "prefix",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parse_cli_accepts_default_arguments() {
        let parsed = CliArgs::try_parse_from(["autosuggest"]).expect("parses");
        assert_eq!(parsed.output, OutputFormat::Plain);
        assert!(parsed.item.is_empty());
        assert!(parsed.origin.is_none());
        assert!(!parsed.no_animation);
    }

    #[test]
    fn repeated_items_and_enums_parse() {
        let parsed = CliArgs::try_parse_from([
            "autosuggest",
            "--item",
            "rs=Rust",
            "--item",
            "Go",
            "--origin",
            "top",
            "--spring",
            "no-wobble",
            "--output",
            "json",
        ])
        .expect("parses");
        assert_eq!(
            parsed.item,
            vec![Item::new("rs", "Rust"), Item::new("Go", "Go")]
        );
        assert_eq!(parsed.origin, Some(OriginArg::Top));
        assert_eq!(parsed.spring.map(SpringArg::as_str), Some("no-wobble"));
        assert_eq!(parsed.output, OutputFormat::Json);
    }

    #[test]
    fn unknown_origin_is_rejected() {
        assert!(CliArgs::try_parse_from(["autosuggest", "--origin", "left"]).is_err());
    }
}
