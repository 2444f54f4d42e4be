// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Element`] over live DOM nodes.

use std::fmt;

use kurbo::Rect;
use vitrine_core::host::Element;
use wasm_bindgen::JsCast as _;
use web_sys::{
    HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList,
};

/// A handle to a DOM element.
///
/// Equality is node identity. DOM mutations that the browser rejects (an
/// invalid class token, a hierarchy error) are ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct DomElement(web_sys::Element);

impl fmt::Debug for DomElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.0.tag_name().to_lowercase())?;
        let id = self.0.id();
        if !id.is_empty() {
            write!(f, " #{id}")?;
        }
        let class = self.0.class_name();
        if !class.is_empty() {
            write!(f, " .{}", class.replace(' ', "."))?;
        }
        f.write_str(">")
    }
}

impl From<web_sys::Element> for DomElement {
    fn from(element: web_sys::Element) -> Self {
        Self(element)
    }
}

impl DomElement {
    /// The underlying element.
    #[must_use]
    pub fn inner(&self) -> &web_sys::Element {
        &self.0
    }

    /// Text content of the element and its descendants.
    #[must_use]
    pub fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }
}

/// Collects the elements of a `NodeList`, skipping non-element nodes.
pub(crate) fn collect(list: &NodeList) -> Vec<DomElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(DomElement)
        .collect()
}

impl Element for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn class_name(&self) -> String {
        self.0.class_name()
    }

    fn set_class_name(&self, value: &str) {
        self.0.set_class_name(value);
    }

    fn style(&self, property: &str) -> String {
        self.html()
            .and_then(|el| el.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(el) = self.html() else {
            return;
        };
        let style = el.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_disabled(&self, disabled: bool) {
        let _ = self.0.toggle_attribute_with_force("disabled", disabled);
    }

    fn reset_form(&self) {
        if let Some(form) = self.0.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn offset_top(&self) -> f64 {
        self.html().map_or(0.0, |el| f64::from(el.offset_top()))
    }

    fn offset_parent(&self) -> Option<Self> {
        self.html()?.offset_parent().map(Self)
    }

    fn client_height(&self) -> f64 {
        f64::from(self.0.client_height())
    }

    fn bounding_rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(Self)
    }

    fn query(&self, selector: &str) -> Option<Self> {
        self.0.query_selector(selector).ok().flatten().map(Self)
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        match self.0.query_selector_all(selector) {
            Ok(list) => collect(&list),
            Err(_) => {
                tracing::warn!(selector, "invalid selector");
                Vec::new()
            }
        }
    }

    fn append_child(&self, child: &Self) {
        let _ = self.0.append_child(&child.0);
    }

    fn remove(&self) {
        self.0.remove();
    }
}
