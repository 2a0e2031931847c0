//! Page behavior configuration.
//!
//! Every value has a default matching the site markup, so an empty JSON
//! object (or no config at all) yields the stock behavior.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::selector::Selector;

pub const DEFAULT_SCROLL_THRESHOLD: f64 = 50.0;
pub const DEFAULT_REQUIRED_ALERT: &str = "Veuillez remplir tous les champs obligatoires";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub selector: String,
    pub scrolled_class: String,
    /// Offsets strictly above this value mark the navbar as scrolled.
    pub scroll_threshold: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: ".navbar".to_string(),
            scrolled_class: "navbar-scrolled".to_string(),
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavLinkConfig {
    pub selector: String,
    pub enter_transform: String,
    pub leave_transform: String,
}

impl Default for NavLinkConfig {
    fn default() -> Self {
        Self {
            selector: ".nav-link".to_string(),
            enter_transform: "translateY(-2px)".to_string(),
            leave_transform: "translateY(0)".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuToggleConfig {
    pub selector: String,
    pub active_class: String,
}

impl Default for MenuToggleConfig {
    fn default() -> Self {
        Self {
            selector: ".navbar-toggler".to_string(),
            active_class: "active".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    pub selector: String,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            selector: r#"input[type="tel"]"#.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePreviewConfig {
    pub selector: String,
    /// Attribute on the file input holding the preview element id.
    pub target_attribute: String,
    pub visible_display: String,
}

impl Default for ImagePreviewConfig {
    fn default() -> Self {
        Self {
            selector: r#"input[type="file"][accept*="image"]"#.to_string(),
            target_attribute: "data-preview".to_string(),
            visible_display: "block".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub selector: String,
    pub required_selector: String,
    pub invalid_class: String,
    pub alert_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            selector: "form".to_string(),
            required_selector: "[required]".to_string(),
            invalid_class: "is-invalid".to_string(),
            alert_message: DEFAULT_REQUIRED_ALERT.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub navbar: NavbarConfig,
    pub nav_links: NavLinkConfig,
    pub menu_toggle: MenuToggleConfig,
    pub phone: PhoneConfig,
    pub image_preview: ImagePreviewConfig,
    pub forms: FormConfig,
}

/// Selectors of a validated [`PageConfig`], parsed once.
#[derive(Clone, Debug)]
pub struct PageSelectors {
    pub navbar: Selector,
    pub nav_links: Selector,
    pub menu_toggle: Selector,
    pub phone: Selector,
    pub image_inputs: Selector,
    pub forms: Selector,
    pub required_fields: Selector,
}

fn selector(field: &'static str, source: &str) -> Result<Selector> {
    Selector::parse(source).map_err(|source| ConfigError::Selector { field, source })
}

fn class_name(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::ClassName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.selectors()?;
        class_name("navbar.scrolled_class", &self.navbar.scrolled_class)?;
        class_name("menu_toggle.active_class", &self.menu_toggle.active_class)?;
        class_name("forms.invalid_class", &self.forms.invalid_class)?;
        let threshold = self.navbar.scroll_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::ScrollThreshold(threshold));
        }
        Ok(())
    }

    pub fn selectors(&self) -> Result<PageSelectors> {
        Ok(PageSelectors {
            navbar: selector("navbar.selector", &self.navbar.selector)?,
            nav_links: selector("nav_links.selector", &self.nav_links.selector)?,
            menu_toggle: selector("menu_toggle.selector", &self.menu_toggle.selector)?,
            phone: selector("phone.selector", &self.phone.selector)?,
            image_inputs: selector("image_preview.selector", &self.image_preview.selector)?,
            forms: selector("forms.selector", &self.forms.selector)?,
            required_fields: selector("forms.required_selector", &self.forms.required_selector)?,
        })
    }
}
