use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, ensure};
use autosuggest_widget::{AutocompleteConfig, AutocompleteProps, Item};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::app_dirs;
use crate::cli::CliArgs;
use crate::items;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    autocomplete: AutocompleteConfig,
    demo: DemoSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DemoSection {
    items_file: Option<PathBuf>,
    items: Option<Vec<String>>,
    log_pane: Option<bool>,
}

pub struct ResolvedConfig {
    pub autocomplete: AutocompleteConfig,
    pub items: Vec<Item>,
    pub items_file: Option<PathBuf>,
    pub log_pane: bool,
}

impl ResolvedConfig {
    /// Widget properties built from the resolved options and items.
    pub fn props(&self) -> Result<AutocompleteProps> {
        let props = AutocompleteProps::default().items(self.items.clone());
        Ok(self.autocomplete.apply(props)?)
    }

    pub fn print_summary(&self) {
        let options = &self.autocomplete;
        println!("Resolved configuration:");
        match &self.items_file {
            Some(path) => println!("  Items file: {}", path.display()),
            None => println!("  Items file: (none)"),
        }
        println!("  Items: {}", self.items.len());
        println!(
            "  Placeholder: {}",
            options.placeholder.as_deref().unwrap_or("(none)")
        );
        if let Some(value) = options.default_value.as_deref().filter(|v| !v.is_empty()) {
            println!("  Default value: {value}");
        }
        println!(
            "  Origin: {}",
            options.origin.as_deref().unwrap_or("bottom")
        );
        match options.max_suggestions_height {
            Some(rows) => println!("  Max suggestions height: {rows}"),
            None => println!("  Max suggestions height: (widget default)"),
        }
        println!(
            "  Theme: {}",
            options.theme.as_deref().unwrap_or("(use the library default)")
        );
        println!("  Spring: {}", options.spring.as_deref().unwrap_or("stiff"));
        println!("  Filter: {}", options.filter.as_deref().unwrap_or("fuzzy"));
        println!(
            "  Animation: {}",
            bool_to_word(options.animate.unwrap_or(true))
        );
        if let Some(max) = options.max_length {
            println!("  Max length: {max}");
        }
        println!("  Log pane: {}", bool_to_word(self.log_pane));
    }
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve(&cli.item)
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("autosuggest")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("demo.items"),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".autosuggest.toml"));
        files.push(current_dir.join("autosuggest.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        let options = &mut self.autocomplete;
        if let Some(value) = cli.placeholder.clone() {
            options.placeholder = Some(value);
        }
        if let Some(value) = cli.default_value.clone() {
            options.default_value = Some(value);
        }
        if let Some(origin) = cli.origin {
            options.origin = Some(origin.as_str().to_string());
        }
        if let Some(rows) = cli.max_height {
            options.max_suggestions_height = Some(rows);
        }
        if let Some(theme) = cli.theme.clone() {
            options.theme = Some(theme);
        }
        if let Some(spring) = cli.spring {
            options.spring = Some(spring.as_str().to_string());
        }
        if let Some(filter) = cli.filter {
            options.filter = Some(filter.as_str().to_string());
        }
        if cli.no_animation {
            options.animate = Some(false);
        }

        if let Some(path) = cli.items.clone() {
            self.demo.items_file = Some(path);
        }
        if cli.log_pane {
            self.demo.log_pane = Some(true);
        }
    }

    fn resolve(self, extra_items: &[Item]) -> Result<ResolvedConfig> {
        if let Some(rows) = self.autocomplete.max_suggestions_height {
            ensure!(rows > 0, "max suggestions height must be greater than zero");
        }
        self.autocomplete
            .apply(AutocompleteProps::default())
            .context("invalid autocomplete configuration")?;

        let items_file = match self.demo.items_file {
            Some(path) if path.is_relative() => Some(
                env::current_dir()
                    .context("failed to resolve current directory for items file")?
                    .join(path),
            ),
            other => other,
        };

        let mut items = match &items_file {
            Some(path) => items::load(path)?,
            None => Vec::new(),
        };
        for entry in self.demo.items.unwrap_or_default() {
            items.push(items::parse_pair(&entry).map_err(|err| anyhow!(err))?);
        }
        items.extend(extra_items.iter().cloned());
        ensure!(
            !items.is_empty(),
            "no items to suggest; pass --items FILE or --item KEY=VALUE"
        );

        Ok(ResolvedConfig {
            autocomplete: self.autocomplete,
            items,
            items_file,
            log_pane: self.demo.log_pane.unwrap_or(false),
        })
    }
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use autosuggest_widget::Origin;
    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    fn cli(args: &[&str]) -> CliArgs {
        let mut argv = vec!["autosuggest", "--no-config"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn config_file_sets_options_and_cli_overrides_them() {
        let dir = tempdir().expect("tempdir");
        let items_path = dir.path().join("items.txt");
        fs::write(&items_path, "rs\tRust\ngo\tGo\n").expect("write items");
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            format!(
                "[autocomplete]\nplaceholder = \"Language\"\norigin = \"top\"\nmax_suggestions_height = 6\n\n[demo]\nitems_file = {:?}\nitems = [\"zig=Zig\"]\n",
                items_path.display().to_string()
            ),
        )
        .expect("write config");
        let config_arg = config_path.display().to_string();

        let resolved = load(&cli(&["--config", &config_arg, "--max-height", "4"])).expect("loads");
        assert_eq!(resolved.items.len(), 3);
        assert_eq!(resolved.items[2], Item::new("zig", "Zig"));

        let props = resolved.props().expect("props");
        assert_eq!(props.placeholder, "Language");
        assert_eq!(props.origin, Origin::Top);
        assert_eq!(props.max_suggestions_height, 4);
    }

    #[test]
    fn command_line_items_are_appended() {
        let resolved = load(&cli(&["--item", "a=Alpha", "--no-animation"])).expect("loads");
        assert_eq!(resolved.items, vec![Item::new("a", "Alpha")]);
        assert!(!resolved.props().expect("props").animate);
    }

    #[test]
    fn missing_items_are_rejected() {
        let err = load(&cli(&[])).err().expect("no items");
        assert!(err.to_string().contains("no items"));
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(load(&cli(&["--item", "a", "--max-height", "0"])).is_err());
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(load(&cli(&["--item", "a", "--theme", "neon"])).is_err());
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("absent.toml").display().to_string();
        assert!(load(&cli(&["--item", "a", "--config", &missing])).is_err());
    }
}
