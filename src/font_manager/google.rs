//! Google Fonts manager
//!
//! Fetches the font list from the Google Fonts Developer API and downloads
//! font files on demand so list rows can be drawn in their own typeface.

use super::{position_of, FontManager};
use crate::error::{FontPickerError, FontPickerResult};
use crate::font::{Category, Font};
use crate::options::{PickerOptions, SortOrder};
use anyhow::{bail, Context as _};
use gpui::App;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

const WEBFONTS_URL: &str = "https://www.googleapis.com/webfonts/v1/webfonts";

const USER_AGENT: &str = concat!("gpui-font-picker/", env!("CARGO_PKG_VERSION"));

/// Response body of the webfonts endpoint
#[derive(Debug, Deserialize)]
pub struct WebFontList {
    #[serde(default)]
    pub items: Vec<WebFont>,
}

/// One family as described by the webfonts endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct WebFont {
    pub family: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub variants: Vec<String>,
    /// Variant name -> font file URL
    #[serde(default)]
    pub files: HashMap<String, String>,
}

impl WebFont {
    fn in_category(&self, categories: &[Category]) -> bool {
        categories
            .iter()
            .any(|category| category.as_str() == self.category)
    }

    fn has_variants(&self, variants: &[String]) -> bool {
        variants.iter().all(|variant| self.variants.contains(variant))
    }

    /// File URL for `variant`, falling back to "regular" and then to any file
    fn file_url(&self, variant: &str) -> Option<String> {
        self.files
            .get(variant)
            .or_else(|| self.files.get("regular"))
            .or_else(|| self.files.values().next())
            // The API still hands out plain http links
            .map(|url| url.replacen("http://", "https://", 1))
    }
}

/// Apply the picker options to a popularity-ordered font list
///
/// Family, category and variant filters run first, then the list is cut to
/// `limit` (dropping the least popular fonts) and finally re-sorted if
/// alphabetical order was requested.
pub fn select_fonts(items: Vec<WebFont>, options: &PickerOptions) -> Vec<WebFont> {
    let mut fonts: Vec<WebFont> = items
        .into_iter()
        .filter(|font| options.families.is_empty() || options.families.contains(&font.family))
        .filter(|font| options.categories.is_empty() || font.in_category(&options.categories))
        .filter(|font| font.has_variants(&options.variants))
        .take(options.limit)
        .collect();

    if options.sort == SortOrder::Alphabetical {
        fonts.sort_by(|a, b| a.family.cmp(&b.family));
    }
    fonts
}

/// Query parameters of the font list request; ureq percent-encodes them
fn font_list_query(api_key: &str) -> [(&'static str, &str); 2] {
    [("sort", "popularity"), ("key", api_key)]
}

fn fetch_font_list(api_key: &str) -> anyhow::Result<WebFontList> {
    let mut response = ureq::get(WEBFONTS_URL)
        .query_pairs(font_list_query(api_key))
        .header("User-Agent", USER_AGENT)
        .call()
        .context("Font list request failed")?;
    let body = response
        .body_mut()
        .read_to_string()
        .context("Failed to read font list response")?;
    serde_json::from_str(&body).context("Font list response is not valid JSON")
}

fn fetch_font_file(url: &str) -> anyhow::Result<Vec<u8>> {
    let mut response = ureq::get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .with_context(|| format!("Font file request failed: {}", url))?;
    response
        .body_mut()
        .read_to_vec()
        .with_context(|| format!("Failed to read font file: {}", url))
}

pub struct GoogleFontsManager {
    api_key: String,
    options: PickerOptions,
    initial_font: String,
    web_fonts: Vec<WebFont>,
    fonts: Vec<Font>,
    active: Option<usize>,
    /// Families with a download in flight or done; failed ones are removed again
    requested: Arc<Mutex<HashSet<String>>>,
}

/// Allow another download attempt for `family`
fn release_request(requested: &Mutex<HashSet<String>>, family: &str) {
    if let Ok(mut requested) = requested.lock() {
        requested.remove(family);
    }
}

impl GoogleFontsManager {
    pub fn new(api_key: impl Into<String>, active_font: impl Into<String>, options: PickerOptions) -> Self {
        Self {
            api_key: api_key.into(),
            options,
            initial_font: active_font.into(),
            web_fonts: Vec::new(),
            fonts: Vec::new(),
            active: None,
            requested: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Install an already fetched list
    fn install(&mut self, list: WebFontList) -> anyhow::Result<()> {
        let selected = select_fonts(list.items, &self.options);
        if selected.is_empty() {
            bail!("No fonts match the picker options");
        }

        self.fonts = selected.iter().map(|font| Font::new(font.family.clone())).collect();
        self.web_fonts = selected;
        self.active = position_of(&self.fonts, &self.initial_font);
        if self.active.is_none() {
            log::warn!(
                "Initial font \"{}\" is not in the font list",
                self.initial_font
            );
        }
        log::info!("Loaded {} fonts from Google Fonts", self.fonts.len());
        Ok(())
    }

    /// Fonts whose files still have to be requested for a preview batch of `count`
    fn pending_downloads(&mut self, count: usize) -> Vec<(String, String)> {
        let variant = self.options.default_variant().to_string();
        let end = count.min(self.web_fonts.len());
        let active = self.active.filter(|idx| *idx >= end);

        let Ok(mut requested) = self.requested.lock() else {
            return Vec::new();
        };

        let mut downloads = Vec::new();
        for idx in (0..end).chain(active) {
            let font = &self.web_fonts[idx];
            if !requested.insert(font.family.clone()) {
                continue;
            }
            match font.file_url(&variant) {
                Some(url) => downloads.push((font.family.clone(), url)),
                None => log::warn!("No font file listed for \"{}\"", font.family),
            }
        }
        downloads
    }
}

impl FontManager for GoogleFontsManager {
    fn init(&mut self) -> FontPickerResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(FontPickerError::initialization(
                "no Google Fonts API key configured",
            ));
        }
        fetch_font_list(&self.api_key)
            .and_then(|list| self.install(list))
            .map_err(|e| FontPickerError::initialization(format!("{:#}", e)))
    }

    fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    fn active_font(&self) -> Option<&Font> {
        self.active.and_then(|idx| self.fonts.get(idx))
    }

    fn set_active_font(&mut self, family: &str) -> FontPickerResult<usize> {
        match position_of(&self.fonts, family) {
            Some(idx) => {
                self.active = Some(idx);
                Ok(idx)
            }
            None => {
                let err = FontPickerError::font_not_in_list(family);
                log::error!("{}", err);
                Err(err)
            }
        }
    }

    fn download_previews(&mut self, count: usize, cx: &mut App) {
        for (family, url) in self.pending_downloads(count) {
            log::debug!("Downloading preview for \"{}\"", family);
            let requested = self.requested.clone();
            cx.spawn(async move |cx| {
                let bytes = cx
                    .background_executor()
                    .spawn(async move { fetch_font_file(&url) })
                    .await;

                match bytes {
                    Ok(bytes) => {
                        cx.update(|cx| {
                            if let Err(e) = cx.text_system().add_fonts(vec![Cow::Owned(bytes)]) {
                                log::error!("Failed to register font \"{}\": {}", family, e);
                            }
                            cx.refresh_windows();
                        })
                        .ok();
                    }
                    Err(e) => {
                        log::warn!("Preview download for \"{}\" failed: {:#}", family, e);
                        release_request(&requested, &family);
                    }
                }
            })
            .detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "kind": "webfonts#webfontList",
        "items": [
            {
                "family": "Roboto",
                "category": "sans-serif",
                "variants": ["regular", "italic", "700"],
                "files": {
                    "regular": "http://fonts.gstatic.com/s/roboto/Roboto-Regular.ttf",
                    "700": "http://fonts.gstatic.com/s/roboto/Roboto-Bold.ttf"
                }
            },
            {
                "family": "Open Sans",
                "category": "sans-serif",
                "variants": ["regular", "700"],
                "files": { "regular": "http://fonts.gstatic.com/s/opensans/OpenSans.ttf" }
            },
            {
                "family": "Lora",
                "category": "serif",
                "variants": ["regular", "italic"],
                "files": { "regular": "http://fonts.gstatic.com/s/lora/Lora.ttf" }
            },
            {
                "family": "Fira Code",
                "category": "monospace",
                "variants": ["regular"],
                "files": { "regular": "http://fonts.gstatic.com/s/firacode/FiraCode.ttf" }
            }
        ]
    }"#;

    fn sample() -> Vec<WebFont> {
        serde_json::from_str::<WebFontList>(SAMPLE).unwrap().items
    }

    fn names(fonts: &[WebFont]) -> Vec<&str> {
        fonts.iter().map(|f| f.family.as_str()).collect()
    }

    #[test]
    fn test_default_options_sort_alphabetically() {
        let fonts = select_fonts(sample(), &PickerOptions::default());
        assert_eq!(names(&fonts), vec!["Fira Code", "Lora", "Open Sans", "Roboto"]);
    }

    #[test]
    fn test_limit_drops_least_popular() {
        let options = PickerOptions {
            limit: 2,
            sort: SortOrder::Popularity,
            ..Default::default()
        };
        let fonts = select_fonts(sample(), &options);
        assert_eq!(names(&fonts), vec!["Roboto", "Open Sans"]);
    }

    #[test]
    fn test_category_and_variant_filters() {
        let options = PickerOptions {
            categories: vec![Category::SansSerif, Category::Serif],
            variants: vec!["regular".to_string(), "italic".to_string()],
            ..Default::default()
        };
        let fonts = select_fonts(sample(), &options);
        assert_eq!(names(&fonts), vec!["Lora", "Roboto"]);
    }

    #[test]
    fn test_family_filter() {
        let options = PickerOptions {
            families: vec!["Lora".to_string(), "Fira Code".to_string()],
            sort: SortOrder::Popularity,
            ..Default::default()
        };
        let fonts = select_fonts(sample(), &options);
        assert_eq!(names(&fonts), vec!["Lora", "Fira Code"]);
    }

    #[test]
    fn test_file_url_prefers_variant_and_upgrades_scheme() {
        let roboto = &sample()[0];
        assert_eq!(
            roboto.file_url("700").as_deref(),
            Some("https://fonts.gstatic.com/s/roboto/Roboto-Bold.ttf")
        );
        assert_eq!(
            roboto.file_url("900").as_deref(),
            Some("https://fonts.gstatic.com/s/roboto/Roboto-Regular.ttf")
        );
    }

    #[test]
    fn test_install_selects_initial_font() {
        let mut manager = GoogleFontsManager::new("key", "Lora", PickerOptions::default());
        manager.install(WebFontList { items: sample() }).unwrap();
        assert_eq!(manager.fonts().len(), 4);
        assert_eq!(manager.active_font(), Some(&Font::new("Lora")));
        assert_eq!(manager.set_active_font("Roboto"), Ok(3));
        assert!(manager.set_active_font("Comic Sans MS").is_err());
        assert_eq!(manager.active_font(), Some(&Font::new("Roboto")));
    }

    #[test]
    fn test_install_rejects_empty_selection() {
        let options = PickerOptions {
            families: vec!["Nope".to_string()],
            ..Default::default()
        };
        let mut manager = GoogleFontsManager::new("key", "Lora", options);
        assert!(manager.install(WebFontList { items: sample() }).is_err());
    }

    #[test]
    fn test_missing_api_key_fails_init() {
        let mut manager = GoogleFontsManager::new("  ", "Open Sans", PickerOptions::default());
        assert!(matches!(
            manager.init(),
            Err(FontPickerError::Initialization(_))
        ));
    }

    #[test]
    fn test_api_key_is_passed_as_query_value() {
        let query = font_list_query("a&b=c d");
        assert_eq!(query, [("sort", "popularity"), ("key", "a&b=c d")]);
    }

    #[test]
    fn test_pending_downloads_are_requested_once() {
        let mut manager = GoogleFontsManager::new("key", "Roboto", PickerOptions::default());
        manager.install(WebFontList { items: sample() }).unwrap();

        // Alphabetical: Fira Code, Lora, Open Sans, Roboto (active, outside the batch)
        let first = manager.pending_downloads(2);
        let families: Vec<&str> = first.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(families, vec!["Fira Code", "Lora", "Roboto"]);

        let second = manager.pending_downloads(10);
        let families: Vec<&str> = second.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(families, vec!["Open Sans"]);

        assert!(manager.pending_downloads(10).is_empty());
    }

    #[test]
    fn test_failed_download_is_requested_again() {
        let mut manager = GoogleFontsManager::new("key", "Fira Code", PickerOptions::default());
        manager.install(WebFontList { items: sample() }).unwrap();

        assert_eq!(manager.pending_downloads(2).len(), 2);
        release_request(&manager.requested, "Lora");

        let retry = manager.pending_downloads(2);
        let families: Vec<&str> = retry.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(families, vec!["Lora"]);
    }
}
