use odt_styler_model::Family;

use crate::xml::Element;

pub(crate) const STYLE_ELEMENT: &str = "style:style";
pub(crate) const STYLE_NAME: &str = "style:name";
pub(crate) const STYLE_DISPLAY_NAME: &str = "style:display-name";
pub(crate) const STYLE_FAMILY: &str = "style:family";

/// A named entry found in one of a document's style tables.
///
/// Lookup is lax: besides `style:style` it can return other named entries
/// (list styles, number styles) that carry no `style:family`. Use
/// [`Style::is_style`] before treating the entry as a paragraph/text style.
#[derive(Debug, Clone, Copy)]
pub struct Style<'a> {
    element: &'a Element,
    part_root: &'a Element,
}

impl<'a> Style<'a> {
    pub(crate) fn new(element: &'a Element, part_root: &'a Element) -> Self {
        Self { element, part_root }
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// Internal name (`style:name`), which is what references use.
    pub fn name(&self) -> &'a str {
        self.element.attribute(STYLE_NAME).unwrap_or_default()
    }

    pub fn display_name(&self) -> Option<&'a str> {
        self.element.attribute(STYLE_DISPLAY_NAME)
    }

    pub fn family(&self) -> Option<&'a str> {
        self.element.attribute(STYLE_FAMILY)
    }

    /// True for genuine `style:style` elements.
    pub fn is_style(&self) -> bool {
        self.element.name == STYLE_ELEMENT
    }

    /// Namespace declarations of the part the style was found in.
    pub(crate) fn namespace_declarations(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.part_root
            .attributes
            .iter()
            .filter(|(key, _)| key.starts_with("xmlns:"))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

pub(crate) fn family_matches(element: &Element, family: Family) -> bool {
    match element.attribute(STYLE_FAMILY) {
        Some(value) => value == family.as_str(),
        None => true,
    }
}

/// Find a style in `containers`, preferring internal-name matches over
/// display-name matches.
pub(crate) fn find_style<'a>(
    containers: &[(&'a Element, &'a Element)],
    family: Family,
    name: &str,
) -> Option<Style<'a>> {
    for attribute in [STYLE_NAME, STYLE_DISPLAY_NAME] {
        for &(container, root) in containers {
            let found = container.child_elements().find(|element| {
                element.attribute(attribute) == Some(name) && family_matches(element, family)
            });
            if let Some(element) = found {
                return Some(Style::new(element, root));
            }
        }
    }
    None
}
