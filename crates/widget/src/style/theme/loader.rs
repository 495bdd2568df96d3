use std::borrow::Cow;

use anyhow::{Context, Result, bail};
use include_dir::{Dir, File};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use super::types::{Theme, ThemeRegistration};

pub(super) struct BuiltinThemes {
	pub(super) registrations: Vec<ThemeRegistration>,
	pub(super) default_theme: Theme,
}

#[derive(Debug, Deserialize)]
struct ThemeConfig {
	name: String,
	#[serde(default)]
	aliases: Vec<String>,
	#[serde(default)]
	default: bool,
	styles: ThemeStylesConfig,
}

impl ThemeConfig {
	fn into_document(self, context: &str) -> Result<ThemeDocument> {
		let theme = self.styles.into_theme(&format!("{context}.styles"))?;

		let registration = self
			.aliases
			.into_iter()
			.map(|alias| alias.trim().to_string())
			.filter(|alias| !alias.is_empty())
			.fold(ThemeRegistration::new(self.name, theme), |registration, alias| {
				registration.alias(alias)
			});

		Ok(ThemeDocument {
			registration,
			is_default: self.default,
		})
	}
}

#[derive(Debug, Deserialize)]
struct ThemeStylesConfig {
	input: StyleConfig,
	placeholder: StyleConfig,
	cursor: StyleConfig,
	panel: StyleConfig,
	suggestion: StyleConfig,
	selected: StyleConfig,
	matched: StyleConfig,
}

impl ThemeStylesConfig {
	fn into_theme(self, context: &str) -> Result<Theme> {
		Ok(Theme {
			input: self.input.to_style(&format!("{context}.input"))?,
			placeholder: self.placeholder.to_style(&format!("{context}.placeholder"))?,
			cursor: self.cursor.to_style(&format!("{context}.cursor"))?,
			panel: self.panel.to_style(&format!("{context}.panel"))?,
			suggestion: self.suggestion.to_style(&format!("{context}.suggestion"))?,
			selected: self.selected.to_style(&format!("{context}.selected"))?,
			matched: self.matched.to_style(&format!("{context}.matched"))?,
		})
	}
}

struct ThemeDocument {
	registration: ThemeRegistration,
	is_default: bool,
}

#[derive(Debug, Default, Deserialize)]
struct StyleConfig {
	#[serde(default)]
	fg: Option<String>,
	#[serde(default)]
	bg: Option<String>,
	#[serde(default)]
	modifiers: Vec<String>,
}

impl StyleConfig {
	fn to_style(&self, context: &str) -> Result<Style> {
		let mut style = Style::new();

		if let Some(fg) = &self.fg {
			let color = parse_color(fg)
				.with_context(|| format!("{context}: invalid foreground colour `{fg}`"))?;
			style = style.fg(color);
		}

		if let Some(bg) = &self.bg {
			let color = parse_color(bg)
				.with_context(|| format!("{context}: invalid background colour `{bg}`"))?;
			style = style.bg(color);
		}

		for modifier in &self.modifiers {
			let modifier_value = parse_modifier(modifier)
				.with_context(|| format!("{context}: invalid modifier `{modifier}`"))?;
			style = style.add_modifier(modifier_value);
		}

		Ok(style)
	}
}

pub(super) fn load_builtin_themes(dir: &Dir) -> Result<BuiltinThemes> {
	let mut files: Vec<_> = dir.files().collect();
	files.sort_by(|a, b| a.path().cmp(b.path()));

	let documents = files
		.into_iter()
		.map(parse_theme_document)
		.collect::<Result<Vec<_>>>()?;
	assemble(documents)
}

fn assemble(documents: Vec<ThemeDocument>) -> Result<BuiltinThemes> {
	let mut registrations = Vec::new();
	let mut default_theme: Option<(Theme, String)> = None;

	for document in documents {
		if document.is_default {
			if let Some((_, existing_name)) = &default_theme {
				bail!(
					"multiple built-in themes are marked as default (`{existing_name}` and `{}`)",
					document.registration.name
				);
			}
			default_theme = Some((document.registration.theme, document.registration.name.clone()));
		}

		registrations.push(document.registration);
	}

	let Some(first) = registrations.first() else {
		bail!("no built-in theme definitions were found");
	};
	let default_theme = default_theme.map_or(first.theme, |(theme, _)| theme);

	Ok(BuiltinThemes {
		registrations,
		default_theme,
	})
}

fn parse_theme_document(file: &File) -> Result<ThemeDocument> {
	let path = file.path();
	let contents = file
		.contents_utf8()
		.with_context(|| format!("{path:?} is not valid UTF-8"))?;
	parse_theme_str(contents, &format!("{path:?}"))
}

fn parse_theme_str(contents: &str, context: &str) -> Result<ThemeDocument> {
	let config: ThemeConfig = toml::from_str(contents)
		.with_context(|| format!("failed to parse built-in theme definition in {context}"))?;
	config.into_document(context)
}

fn parse_color(input: &str) -> Result<Color> {
	let value = input.trim();

	if let Some(hex) = value.strip_prefix('#') {
		return parse_hex_colour(hex);
	}

	if let Some(body) = value
		.strip_prefix("ansi(")
		.and_then(|s| s.strip_suffix(')'))
	{
		let index: u8 = body
			.trim()
			.parse()
			.with_context(|| format!("invalid ANSI colour index `{body}`"))?;
		return Ok(Color::Indexed(index));
	}

	match normalise_key(value).as_ref() {
		"reset" | "none" | "default" => Ok(Color::Reset),
		"black" => Ok(Color::Black),
		"red" => Ok(Color::Red),
		"green" => Ok(Color::Green),
		"yellow" => Ok(Color::Yellow),
		"blue" => Ok(Color::Blue),
		"magenta" => Ok(Color::Magenta),
		"cyan" => Ok(Color::Cyan),
		"gray" | "grey" => Ok(Color::Gray),
		"dark_gray" | "dark_grey" => Ok(Color::DarkGray),
		"light_red" => Ok(Color::LightRed),
		"light_green" => Ok(Color::LightGreen),
		"light_yellow" => Ok(Color::LightYellow),
		"light_blue" => Ok(Color::LightBlue),
		"light_magenta" => Ok(Color::LightMagenta),
		"light_cyan" => Ok(Color::LightCyan),
		"white" => Ok(Color::White),
		other => bail!("unknown colour `{other}`"),
	}
}

fn parse_hex_colour(hex: &str) -> Result<Color> {
	let expanded = match hex.len() {
		3 => Cow::Owned(hex.chars().flat_map(|ch| [ch, ch]).collect::<String>()),
		6 => Cow::Borrowed(hex),
		_ => bail!("hex colours must be 3 or 6 characters long"),
	};

	let component = |range: std::ops::Range<usize>, name: &str| {
		u8::from_str_radix(&expanded[range], 16)
			.with_context(|| format!("invalid {name} component `{hex}`"))
	};

	Ok(Color::Rgb(
		component(0..2, "red")?,
		component(2..4, "green")?,
		component(4..6, "blue")?,
	))
}

fn parse_modifier(input: &str) -> Result<Modifier> {
	match normalise_key(input).as_ref() {
		"bold" => Ok(Modifier::BOLD),
		"dim" => Ok(Modifier::DIM),
		"italic" => Ok(Modifier::ITALIC),
		"underline" | "underlined" => Ok(Modifier::UNDERLINED),
		"reversed" | "reverse" | "invert" | "inverted" => Ok(Modifier::REVERSED),
		"crossed_out" | "strikethrough" => Ok(Modifier::CROSSED_OUT),
		other => bail!("unknown modifier `{other}`"),
	}
}

fn normalise_key(value: &str) -> String {
	value
		.trim()
		.to_ascii_lowercase()
		.chars()
		.map(|ch| match ch {
			'-' | ' ' => '_',
			other => other,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINIMAL: &str = r##"
name = "mono"
aliases = [" plain ", ""]

[styles.input]
fg = "white"
[styles.placeholder]
fg = "dark-gray"
modifiers = ["italic"]
[styles.cursor]
modifiers = ["reversed"]
[styles.panel]
fg = "#abc"
[styles.suggestion]
[styles.selected]
bg = "ansi(236)"
[styles.matched]
fg = "#ff8800"
modifiers = ["bold"]
"##;

	#[test]
	fn parses_colours_and_modifiers() {
		let document = parse_theme_str(MINIMAL, "mono.toml").expect("theme parses");
		let theme = document.registration.theme;
		assert_eq!(theme.panel.fg, Some(Color::Rgb(0xaa, 0xbb, 0xcc)));
		assert_eq!(theme.selected.bg, Some(Color::Indexed(236)));
		assert_eq!(theme.matched.fg, Some(Color::Rgb(0xff, 0x88, 0x00)));
		assert!(theme.placeholder.add_modifier.contains(Modifier::ITALIC));
		assert_eq!(theme.placeholder.fg, Some(Color::DarkGray));
		assert_eq!(document.registration.aliases, vec!["plain".to_string()]);
		assert!(!document.is_default);
	}

	#[test]
	fn rejects_unknown_colours() {
		let broken = MINIMAL.replace("\"white\"", "\"ultraviolet\"");
		let error = parse_theme_str(&broken, "broken.toml")
			.err()
			.expect("theme should fail");
		assert!(format!("{error:#}").contains("ultraviolet"));
	}

	#[test]
	fn first_theme_is_default_when_none_is_marked() {
		let first = parse_theme_str(MINIMAL, "a").unwrap();
		let second = parse_theme_str(&MINIMAL.replace("mono", "other"), "b").unwrap();
		let expected = first.registration.theme;
		let builtins = assemble(vec![first, second]).unwrap();
		assert_eq!(builtins.default_theme, expected);
		assert_eq!(builtins.registrations.len(), 2);
	}

	#[test]
	fn two_defaults_are_rejected() {
		let marked = MINIMAL.replace("name = \"mono\"", "name = \"mono\"\ndefault = true");
		let first = parse_theme_str(&marked, "a").unwrap();
		let second = parse_theme_str(&marked, "b").unwrap();
		assert!(assemble(vec![first, second]).is_err());
	}
}
