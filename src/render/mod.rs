//! Page renderer.
//!
//! Turns a loaded template map into a structured render plan: a fixed layout
//! order of section nodes the frontend draws top to bottom. Rendering is a
//! pure function of the template; both the live path (active version) and the
//! preview path (explicit version) feed it the same way.
//!
//! A template with zero keys produces exactly one placeholder node. Sections
//! that are present but empty, or whose stored payload no longer parses, are
//! skipped with a warning; a bad section never fails the whole page.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::models::{
    theme_secondary, CarouselSection, ContentSection, FooterSection, FormSection, NavbarSection,
    ProductsSection, SectionKind, SliderContentSection, TemplateMap,
};

/// Resolved accent-color pair applied to the whole page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeColors {
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

/// One presentational unit in the page, in layout order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "camelCase")]
pub enum SectionNode {
    /// Shown alone when the template has no content yet.
    Placeholder { message: String, hint: String },
    Navbar(NavbarSection),
    Carousel(CarouselSection),
    /// Products and form side by side; either half may be absent.
    Columns {
        #[serde(skip_serializing_if = "Option::is_none")]
        products: Option<ProductsSection>,
        #[serde(skip_serializing_if = "Option::is_none")]
        form: Option<FormSection>,
    },
    Content(ContentSection),
    SliderContent(SliderContentSection),
    /// The footer borrows the brand logo from the sibling navbar section.
    Footer {
        footer: FooterSection,
        #[serde(skip_serializing_if = "Option::is_none")]
        brandlogo: Option<String>,
    },
}

/// The full render plan for one page.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeColors>,
    pub nodes: Vec<SectionNode>,
}

/// Build the render plan for a template.
pub fn render_template(template: &TemplateMap) -> RenderedPage {
    if template.is_empty() {
        return RenderedPage {
            theme: None,
            nodes: vec![SectionNode::Placeholder {
                message: "Preview unavailable!".to_string(),
                hint: "Add content to view".to_string(),
            }],
        };
    }

    let navbar: Option<NavbarSection> = parse_section(template, SectionKind::Navbar);
    let brandlogo = navbar.as_ref().map(|n| n.brandlogo.clone());

    let mut nodes = Vec::new();

    if let Some(navbar) = navbar {
        nodes.push(SectionNode::Navbar(navbar));
    }
    if let Some(carousel) = parse_section::<CarouselSection>(template, SectionKind::Carousel) {
        nodes.push(SectionNode::Carousel(carousel));
    }

    let products: Option<ProductsSection> = parse_section(template, SectionKind::Products);
    let form: Option<FormSection> = parse_section(template, SectionKind::Form);
    if products.is_some() || form.is_some() {
        nodes.push(SectionNode::Columns { products, form });
    }

    if let Some(content) = parse_section::<ContentSection>(template, SectionKind::Content) {
        nodes.push(SectionNode::Content(content));
    }
    if let Some(slider) =
        parse_section::<SliderContentSection>(template, SectionKind::Slidercontent)
    {
        nodes.push(SectionNode::SliderContent(slider));
    }
    if let Some(footer) = parse_section::<FooterSection>(template, SectionKind::Footer) {
        nodes.push(SectionNode::Footer { footer, brandlogo });
    }

    RenderedPage {
        theme: resolve_theme(template),
        nodes,
    }
}

/// A section key counts as renderable when it is present and non-empty.
fn section_value<'a>(template: &'a TemplateMap, kind: SectionKind) -> Option<&'a Value> {
    let value = template.get(kind.as_str())?;
    let non_empty = match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    };
    non_empty.then_some(value)
}

fn parse_section<T: DeserializeOwned>(template: &TemplateMap, kind: SectionKind) -> Option<T> {
    let value = section_value(template, kind)?;
    match serde_json::from_value(value.clone()) {
        Ok(section) => Some(section),
        Err(e) => {
            tracing::warn!("Skipping unrenderable section '{}': {}", kind, e);
            None
        }
    }
}

fn resolve_theme(template: &TemplateMap) -> Option<ThemeColors> {
    let value = section_value(template, SectionKind::Theme)?;
    let Some(primary) = value.as_str() else {
        tracing::warn!("Skipping non-string theme value");
        return None;
    };
    let secondary = theme_secondary(primary);
    if secondary.is_none() {
        tracing::warn!("Unknown theme color '{}'", primary);
    }
    Some(ThemeColors {
        primary: primary.to_string(),
        secondary: secondary.map(|s| s.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn template(entries: &[(&str, Value)]) -> TemplateMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_template_renders_single_placeholder() {
        let page = render_template(&BTreeMap::new());
        assert_eq!(page.nodes.len(), 1);
        assert!(matches!(&page.nodes[0], SectionNode::Placeholder { message, .. }
            if message == "Preview unavailable!"));
        assert!(page.theme.is_none());
    }

    #[test]
    fn test_carousel_and_footer_only() {
        let t = template(&[
            (
                "carousel",
                json!({"slides": [{"id": "s1", "image": "url"}]}),
            ),
            (
                "footer",
                json!({"platform": {"name": "acme", "logo": ""}, "headers": {}}),
            ),
        ]);

        let page = render_template(&t);
        assert_eq!(page.nodes.len(), 2);
        assert!(matches!(&page.nodes[0], SectionNode::Carousel(c) if c.slides.len() == 1));
        assert!(matches!(
            &page.nodes[1],
            SectionNode::Footer {
                brandlogo: None,
                ..
            }
        ));
    }

    #[test]
    fn test_footer_borrows_navbar_brandlogo() {
        let t = template(&[
            (
                "navbar",
                json!({"brandlogo": "https://cdn/logo.png", "menuitems": {"Home": "/"}}),
            ),
            (
                "footer",
                json!({"platform": {"name": "acme", "logo": ""}}),
            ),
        ]);

        let page = render_template(&t);
        let footer = page
            .nodes
            .iter()
            .find_map(|n| match n {
                SectionNode::Footer { brandlogo, .. } => Some(brandlogo.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(footer.as_deref(), Some("https://cdn/logo.png"));
    }

    #[test]
    fn test_layout_order_is_fixed() {
        let t = template(&[
            ("navbar", json!({"brandlogo": "logo"})),
            ("carousel", json!({"slides": [{"id": "s", "image": "u"}]})),
            ("products", json!({"products": [{"id": "p", "name": "n", "description": "d", "image": "i"}]})),
            ("form", json!({"formTitle": "Form", "questions": []})),
            ("content", json!({"sectionTitle": "About", "tiles": []})),
            ("slidercontent", json!({"sectionTitle": "S", "contentType": "text", "tiles": [{"id": "t"}]})),
            ("footer", json!({"platform": {"name": "acme", "logo": ""}})),
        ]);

        let page = render_template(&t);
        let kinds: Vec<&str> = page
            .nodes
            .iter()
            .map(|n| match n {
                SectionNode::Placeholder { .. } => "placeholder",
                SectionNode::Navbar(_) => "navbar",
                SectionNode::Carousel(_) => "carousel",
                SectionNode::Columns { .. } => "columns",
                SectionNode::Content(_) => "content",
                SectionNode::SliderContent(_) => "slidercontent",
                SectionNode::Footer { .. } => "footer",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "navbar",
                "carousel",
                "columns",
                "content",
                "slidercontent",
                "footer"
            ]
        );
    }

    #[test]
    fn test_empty_and_malformed_sections_are_skipped() {
        let t = template(&[
            ("carousel", json!({})),
            ("content", json!({"tiles": "not-a-list"})),
            ("theme", json!("#5BE49B")),
        ]);

        let page = render_template(&t);
        assert!(page.nodes.is_empty());
        assert_eq!(
            page.theme,
            Some(ThemeColors {
                primary: "#5BE49B".to_string(),
                secondary: Some("#C8FAD6".to_string()),
            })
        );
    }
}
