//! Font picker demo
//!
//! Opens a window with one font picker and a paragraph rendered in the
//! active font. The paragraph and the picker stay in sync the same way an
//! embedding application would do it: listen for `Change`, then push the
//! value back with `set_active_font`.
//!
//! Settings come from `<config dir>/gpui-font-picker/settings.json` (or
//! `--config`); command line flags override individual values.

use anyhow::Context as _;
use clap::Parser;
use gpui::{
    actions, div, prelude::*, px, rgb, App, Application, Context, Entity, KeyBinding, Menu,
    MenuItem, Window, WindowOptions,
};
use gpui_font_picker::font::Category;
use gpui_font_picker::{Config, FontPicker, FontPickerEvent, SortOrder};
use std::path::PathBuf;

const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog.";

#[derive(Parser, Debug)]
#[command(version, about = "Font picker demo")]
struct Args {
    /// Google Fonts Developer API key
    #[arg(long, env = "GOOGLE_FONTS_API_KEY")]
    api_key: Option<String>,

    /// Font selected on startup
    #[arg(long)]
    active_font: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Picker name (letters and digits), appended to element ids
    #[arg(long)]
    name: Option<String>,

    /// Only list these families
    #[arg(long = "family")]
    families: Vec<String>,

    /// Only list fonts of these categories
    #[arg(long = "category", value_parser = parse_category)]
    categories: Vec<Category>,

    /// Variants every font must offer; the first is used for previews
    #[arg(long = "variant")]
    variants: Vec<String>,

    /// Maximum number of fonts in the list
    #[arg(long)]
    limit: Option<usize>,

    /// List order: alphabetical or popularity
    #[arg(long, value_parser = parse_sort)]
    sort: Option<SortOrder>,
}

fn parse_category(value: &str) -> Result<Category, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unknown category '{}'", value))
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unknown sort order '{}'", value))
}

impl Args {
    /// Settings file merged with the command line
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load(),
        };

        if self.api_key.is_some() {
            config.api_key = self.api_key;
        }
        if self.active_font.is_some() {
            config.active_font = self.active_font;
        }
        if self.name.is_some() {
            config.options.name = self.name;
        }
        if !self.families.is_empty() {
            config.options.families = self.families;
        }
        if !self.categories.is_empty() {
            config.options.categories = self.categories;
        }
        if !self.variants.is_empty() {
            config.options.variants = self.variants;
        }
        if let Some(limit) = self.limit {
            config.options.limit = limit;
        }
        if let Some(sort) = self.sort {
            config.options.sort = sort;
        }

        config.options.validate().context("Invalid picker options")?;
        Ok(config)
    }
}

struct DemoView {
    picker: Entity<FontPicker>,
    active_font: String,
}

impl DemoView {
    fn new(config: &Config, cx: &mut Context<Self>) -> Self {
        let active_font = config.active_font().to_string();
        let picker = cx.new(|cx| {
            FontPicker::new(
                config.api_key(),
                active_font.clone(),
                config.options.clone(),
                cx,
            )
        });

        // Two-way binding: take the user's choice and hand it back to the picker
        cx.subscribe(&picker, |this, picker, event: &FontPickerEvent, cx| {
            let FontPickerEvent::Change(font) = event;
            log::info!("Font changed to \"{}\"", font.family);
            this.active_font = font.family.clone();
            picker.update(cx, |picker, cx| picker.set_active_font(&font.family, cx));
            cx.notify();
        })
        .detach();

        Self {
            picker,
            active_font,
        }
    }
}

impl Render for DemoView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .size_full()
            .p_4()
            .gap_4()
            .bg(rgb(0xf5f5f5))
            .text_color(rgb(0x000000))
            .child(div().w(px(210.)).child(self.picker.clone()))
            .child(
                div()
                    .text_xl()
                    .font_family(self.active_font.clone())
                    .child(SAMPLE_TEXT),
            )
    }
}

actions!(font_picker_demo, [Quit]);

fn quit(_: &Quit, cx: &mut App) {
    log::info!("Quitting");
    cx.quit();
}

fn set_app_menus(cx: &mut App) {
    cx.set_menus(vec![Menu {
        name: "Font Picker".into(),
        items: vec![MenuItem::action("Quit", Quit)],
    }]);
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    if config.api_key().is_empty() {
        log::warn!("No Google Fonts API key given, the fallback font list will be used");
    }

    Application::new().run(move |cx: &mut App| {
        cx.activate(true);
        cx.on_action(quit);
        cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);
        set_app_menus(cx);

        let opened = cx.open_window(WindowOptions::default(), |_window, cx| {
            cx.new(|cx| DemoView::new(&config, cx))
        });
        if let Err(e) = opened {
            log::error!("Failed to open window: {:#}", e);
            cx.quit();
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_settings() {
        let path = std::env::temp_dir().join(format!(
            "gpui-font-picker-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{
                "active_font": "Lato",
                "options": { "name": "main", "limit": 50, "sort": "alphabetical" }
            }"#,
        )
        .unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let args = Args::parse_from([
            "font-picker-demo",
            "--config",
            &path_arg,
            "--limit",
            "12",
            "--sort",
            "popularity",
        ]);
        let config = args.into_config();
        std::fs::remove_file(&path).ok();
        let config = config.unwrap();

        assert_eq!(config.options.limit, 12);
        assert_eq!(config.options.sort, SortOrder::Popularity);
        // Values without a flag come from the file
        assert_eq!(config.active_font(), "Lato");
        assert_eq!(config.options.name.as_deref(), Some("main"));
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        let args = Args::parse_from([
            "font-picker-demo",
            "--config",
            "/nonexistent/settings.json",
        ]);
        assert!(args.into_config().is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from([
            "font-picker-demo",
            "--api-key",
            "key",
            "--name",
            "main",
            "--category",
            "serif",
            "--category",
            "sans-serif",
            "--sort",
            "popularity",
            "--limit",
            "12",
        ]);
        assert_eq!(args.api_key.as_deref(), Some("key"));
        assert_eq!(args.categories, vec![Category::Serif, Category::SansSerif]);
        assert_eq!(args.sort, Some(SortOrder::Popularity));
        assert_eq!(args.limit, Some(12));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(parse_sort("random").is_err());
        assert!(parse_category("fancy").is_err());
    }
}
