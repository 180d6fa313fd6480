//! Section payload shapes and editor-side validation.
//!
//! Each section editor owns exactly one key of a version's `template` map and
//! defines its own payload shape. The limits here (required fields, max
//! counts) are enforced at the API boundary only; the repository stores any
//! payload shape unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// The eight recognized template sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Navbar,
    Carousel,
    Products,
    Form,
    Content,
    Slidercontent,
    Footer,
    Theme,
}

impl SectionKind {
    /// The key this section occupies inside `template`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Navbar => "navbar",
            SectionKind::Carousel => "carousel",
            SectionKind::Products => "products",
            SectionKind::Form => "form",
            SectionKind::Content => "content",
            SectionKind::Slidercontent => "slidercontent",
            SectionKind::Footer => "footer",
            SectionKind::Theme => "theme",
        }
    }

    /// Parse a section name. `slider-content` is accepted as a legacy alias
    /// for `slidercontent`; older documents contain both spellings.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "navbar" => Some(SectionKind::Navbar),
            "carousel" => Some(SectionKind::Carousel),
            "products" => Some(SectionKind::Products),
            "form" => Some(SectionKind::Form),
            "content" => Some(SectionKind::Content),
            "slidercontent" | "slider-content" => Some(SectionKind::Slidercontent),
            "footer" => Some(SectionKind::Footer),
            "theme" => Some(SectionKind::Theme),
            _ => None,
        }
    }

    pub fn all() -> [SectionKind; 8] {
        [
            SectionKind::Navbar,
            SectionKind::Carousel,
            SectionKind::Products,
            SectionKind::Form,
            SectionKind::Content,
            SectionKind::Slidercontent,
            SectionKind::Footer,
            SectionKind::Theme,
        ]
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navbar section: brand logo, up to five menu items, optional call-to-action
/// button. Menu item values are either a plain link or a list of sub-links;
/// the renderer treats them opaquely, so they stay free-form here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavbarSection {
    pub brandlogo: String,
    #[serde(default)]
    pub menuitems: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<NavButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavButton {
    pub label: String,
    pub link: String,
}

pub const MAX_NAVBAR_MENU_ITEMS: usize = 5;

impl NavbarSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.brandlogo.trim().is_empty() {
            return Err(AppError::Validation(
                "Brand logo is required for the navbar".to_string(),
            ));
        }
        if self.menuitems.len() > MAX_NAVBAR_MENU_ITEMS {
            return Err(AppError::Validation(format!(
                "At most {} navbar menu items are allowed",
                MAX_NAVBAR_MENU_ITEMS
            )));
        }
        Ok(())
    }
}

/// Carousel section: an ordered list of uploaded slides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselSection {
    pub slides: Vec<CarouselSlide>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselSlide {
    pub id: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl CarouselSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.slides.is_empty() {
            return Err(AppError::Validation(
                "Add at least one slide to the carousel".to_string(),
            ));
        }
        Ok(())
    }
}

/// Products section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductsSection {
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ProductsSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.products.is_empty() {
            return Err(AppError::Validation(
                "Add at least one product".to_string(),
            ));
        }
        for product in &self.products {
            if product.image.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Product '{}' is missing an image",
                    product.name
                )));
            }
        }
        Ok(())
    }
}

/// Question types available in the customizable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "short-question")]
    ShortAnswer,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "dropdown")]
    Dropdown,
    #[serde(rename = "date")]
    Date,
}

impl QuestionKind {
    /// Whether the question presents a fixed set of options to pick from.
    pub fn has_options(&self) -> bool {
        match self {
            QuestionKind::MultipleChoice | QuestionKind::Checkbox | QuestionKind::Dropdown => true,
            QuestionKind::ShortAnswer | QuestionKind::Paragraph | QuestionKind::Date => false,
        }
    }
}

/// Form section: a titled list of questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    #[serde(rename = "formTitle")]
    pub form_title: String,
    pub questions: Vec<FormQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "questionText")]
    pub question_text: String,
    #[serde(rename = "isRequired", default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FormSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.questions.is_empty() {
            return Err(AppError::Validation(
                "Add some questions to the form".to_string(),
            ));
        }
        for question in &self.questions {
            if question.question_text.trim().is_empty() {
                return Err(AppError::Validation(
                    "Every question needs question text".to_string(),
                ));
            }
            if question.kind.has_options()
                && question.options.as_ref().map_or(true, |o| o.is_empty())
            {
                return Err(AppError::Validation(format!(
                    "Question '{}' needs at least one option",
                    question.question_text
                )));
            }
        }
        Ok(())
    }
}

/// Content section: titled grid of tiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(rename = "sectionTitle")]
    pub section_title: String,
    #[serde(default)]
    pub tiles: Vec<ContentTile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTile {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ContentSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.section_title.trim().is_empty() {
            return Err(AppError::Validation(
                "Content section title is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Slider content section: a strip of text or image tiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderContentSection {
    #[serde(rename = "sectionTitle")]
    pub section_title: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    pub tiles: Vec<SliderTile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderTile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl SliderContentSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.content_type != "text" && self.content_type != "image" {
            return Err(AppError::Validation(
                "Slider content type must be 'text' or 'image'".to_string(),
            ));
        }
        if self.tiles.is_empty() {
            return Err(AppError::Validation(
                "Add at least one slider tile".to_string(),
            ));
        }
        Ok(())
    }
}

/// Footer section. The brand logo itself is not stored here: the renderer
/// reads it from the sibling navbar section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterSection {
    pub platform: FooterPlatform,
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<FooterLink>>,
    #[serde(rename = "socialLinks", default)]
    pub social_links: BTreeMap<String, String>,
    #[serde(default)]
    pub contact: ContactDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterPlatform {
    pub name: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: String,
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(rename = "showCard", default)]
    pub show_card: bool,
}

pub const MAX_FOOTER_HEADERS: usize = 3;

impl FooterSection {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.headers.len() > MAX_FOOTER_HEADERS {
            return Err(AppError::Validation(format!(
                "At most {} footer headers are allowed",
                MAX_FOOTER_HEADERS
            )));
        }
        Ok(())
    }
}

/// Accent-color pairs offered by the theme drawer: primary -> secondary.
pub const THEME_PAIRS: [(&str, &str); 4] = [
    ("#5BE49B", "#C8FAD6"),
    ("#FF5630", "#FFE9D5"),
    ("#FFAB00", "#FFF5CC"),
    ("#00B8D9", "#CAFDF5"),
];

/// Look up the secondary color for a chosen primary.
pub fn theme_secondary(primary: &str) -> Option<&'static str> {
    THEME_PAIRS
        .iter()
        .find(|(p, _)| *p == primary)
        .map(|(_, s)| *s)
}

/// The theme is a single primitive value stored at `template.theme`.
pub fn validate_theme(value: &Value) -> Result<(), AppError> {
    match value.as_str() {
        Some(primary) if theme_secondary(primary).is_some() => Ok(()),
        Some(primary) => Err(AppError::Validation(format!(
            "Unknown theme color '{}'",
            primary
        ))),
        None => Err(AppError::Validation(
            "Theme payload must be a color string".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_kind_roundtrip() {
        for kind in SectionKind::all() {
            assert_eq!(SectionKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(
            SectionKind::from_str("slider-content"),
            Some(SectionKind::Slidercontent)
        );
        assert_eq!(SectionKind::from_str("article"), None);
    }

    #[test]
    fn test_question_kind_wire_names() {
        let q: FormQuestion = serde_json::from_value(json!({
            "id": "q1",
            "type": "multiple-choice",
            "questionText": "Pick one",
            "isRequired": true,
            "options": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(q.kind, QuestionKind::MultipleChoice);
        assert!(q.kind.has_options());
    }

    #[test]
    fn test_navbar_menu_item_limit() {
        let mut navbar = NavbarSection {
            brandlogo: "url".to_string(),
            ..Default::default()
        };
        for i in 0..MAX_NAVBAR_MENU_ITEMS {
            navbar
                .menuitems
                .insert(format!("Item{}", i), json!("/link"));
        }
        assert!(navbar.validate().is_ok());

        navbar.menuitems.insert("One too many".to_string(), json!("/x"));
        assert!(navbar.validate().is_err());
    }

    #[test]
    fn test_footer_header_limit() {
        let mut footer = FooterSection::default();
        for i in 0..MAX_FOOTER_HEADERS {
            footer.headers.insert(format!("Header{}", i), vec![]);
        }
        assert!(footer.validate().is_ok());

        footer.headers.insert("Extra".to_string(), vec![]);
        assert!(footer.validate().is_err());
    }

    #[test]
    fn test_form_choice_question_needs_options() {
        let form = FormSection {
            form_title: "Form".to_string(),
            questions: vec![FormQuestion {
                id: "q1".to_string(),
                kind: QuestionKind::Dropdown,
                question_text: "Pick".to_string(),
                is_required: false,
                options: None,
            }],
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_theme_pairs() {
        assert_eq!(theme_secondary("#5BE49B"), Some("#C8FAD6"));
        assert!(validate_theme(&json!("#FF5630")).is_ok());
        assert!(validate_theme(&json!("#123456")).is_err());
        assert!(validate_theme(&json!({"primary": "#FF5630"})).is_err());
    }
}
