// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Demo page helpers: device sniffing, loading-panel toggling and styling of
//! settings-panel rows.
//!
//! Elements are passed in explicitly; nothing here searches a global
//! document.

/// Name of the settings entry that switches the demo to the `ResNet50` model.
pub const TRY_RESNET_BUTTON_NAME: &str = "tryResNetButton";
/// Label shown on that entry.
pub const TRY_RESNET_BUTTON_TEXT: &str = "[New] Try ResNet50";
const TRY_RESNET_BUTTON_TEXT_CSS: &str = "width:100%;text-decoration:underline;";
const TRY_RESNET_BUTTON_BACKGROUND_CSS: &str = "background:#e61d5f;";

/// Whether the user agent belongs to an Android device.
#[must_use]
pub fn is_android(user_agent: &str) -> bool {
    contains_ignore_case(user_agent, "android")
}

/// Whether the user agent belongs to an iPhone, iPad or iPod.
#[must_use]
pub fn is_ios(user_agent: &str) -> bool {
    ["iphone", "ipad", "ipod"]
        .iter()
        .any(|needle| contains_ignore_case(user_agent, needle))
}

/// Whether the user agent belongs to a phone or tablet.
#[must_use]
pub fn is_mobile(user_agent: &str) -> bool {
    is_android(user_agent) || is_ios(user_agent)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(needle)
}

/// CSS `display` values the helpers switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

/// A styled page element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub id: String,
    pub text: String,
    pub style: String,
    pub display: Display,
}

impl Element {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// One row of a settings panel: the row container and its label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyRow {
    pub row: Element,
    pub label: Element,
}

/// Show the loading panel and hide the main one, or the reverse.
pub fn toggle_loading_ui(show_loading: bool, loading: &mut Element, main: &mut Element) {
    let (loading_display, main_display) = if show_loading {
        (Display::Block, Display::None)
    } else {
        (Display::None, Display::Block)
    };
    loading.display = loading_display;
    main.display = main_display;
}

/// Apply `row_css` to every row whose label text equals `property_text`, and
/// `label_css` to its label when given.
///
/// Returns how many rows matched.
pub fn set_property_css(
    rows: &mut [PropertyRow],
    property_text: &str,
    row_css: &str,
    label_css: Option<&str>,
) -> usize {
    let mut matched = 0;
    for row in rows.iter_mut().filter(|r| r.label.text == property_text) {
        row.row.style = row_css.to_string();
        if let Some(css) = label_css.filter(|css| !css.is_empty()) {
            row.label.style = css.to_string();
        }
        matched += 1;
    }
    matched
}

/// Highlight the "Try `ResNet50`" row of the settings panel.
pub fn update_try_resnet_button_css(rows: &mut [PropertyRow]) -> usize {
    set_property_css(
        rows,
        TRY_RESNET_BUTTON_TEXT,
        TRY_RESNET_BUTTON_BACKGROUND_CSS,
        Some(TRY_RESNET_BUTTON_TEXT_CSS),
    )
}
