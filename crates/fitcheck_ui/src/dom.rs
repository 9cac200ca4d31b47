//! Browser implementation of [`View`] on top of web-sys.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::html;
use crate::notice::{Notice, NoticeId};
use crate::state::{ButtonState, PanelVisibility, Preview};
use crate::transcript::{ChatEntry, TypingId};
use crate::view::View;
use crate::ViewError;

/// Attribute carrying the notice id on a banner element.
pub const NOTICE_ID_ATTR: &str = "data-notice-id";

/// Ids (and one selector) of the elements the page must provide.
#[derive(Debug, Clone)]
pub struct ElementIds {
    pub image_upload: String,
    pub image_preview: String,
    pub analyze_button: String,
    pub results: String,
    pub chat_input: String,
    pub send_button: String,
    pub chat_messages: String,
    pub chat_toggle: String,
    /// CSS selector of the collapsible chat panel
    pub chat_panel_selector: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            image_upload: "imageUpload".to_string(),
            image_preview: "imagePreview".to_string(),
            analyze_button: "analyzeBtn".to_string(),
            results: "resultsSection".to_string(),
            chat_input: "chatInput".to_string(),
            send_button: "sendBtn".to_string(),
            chat_messages: "chatMessages".to_string(),
            chat_toggle: "chatbotToggle".to_string(),
            chat_panel_selector: ".chatbot-container".to_string(),
        }
    }
}

/// Handles to every element the controller needs, looked up once.
#[derive(Debug, Clone)]
pub struct PageElements {
    pub document: Document,
    pub body: HtmlElement,
    pub image_upload: HtmlInputElement,
    pub image_preview: Element,
    pub analyze_button: HtmlButtonElement,
    pub results: Element,
    pub chat_input: HtmlInputElement,
    pub send_button: Element,
    pub chat_messages: Element,
    pub chat_toggle: Element,
    pub chat_panel: HtmlElement,
}

impl PageElements {
    /// Look up all elements. Fails if any of them is missing or has the
    /// wrong type.
    pub fn from_document(document: &Document, ids: &ElementIds) -> Result<Self, ViewError> {
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| ViewError::MissingElement(id.to_string()))
        };
        let typed = |id: &str| -> Result<_, ViewError> { Ok((id.to_string(), by_id(id)?)) };

        let body = document.body().ok_or(ViewError::NoBody)?;
        let chat_panel = document
            .query_selector(&ids.chat_panel_selector)
            .ok()
            .flatten()
            .ok_or_else(|| ViewError::MissingElement(ids.chat_panel_selector.clone()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ViewError::WrongElementType(ids.chat_panel_selector.clone()))?;

        Ok(Self {
            document: document.clone(),
            body,
            image_upload: cast(typed(&ids.image_upload)?)?,
            image_preview: by_id(&ids.image_preview)?,
            analyze_button: cast(typed(&ids.analyze_button)?)?,
            results: by_id(&ids.results)?,
            chat_input: cast(typed(&ids.chat_input)?)?,
            send_button: by_id(&ids.send_button)?,
            chat_messages: by_id(&ids.chat_messages)?,
            chat_toggle: by_id(&ids.chat_toggle)?,
            chat_panel,
        })
    }
}

fn cast<T: JsCast>((id, element): (String, Element)) -> Result<T, ViewError> {
    element
        .dyn_into::<T>()
        .map_err(|_| ViewError::WrongElementType(id))
}

/// [`View`] that writes straight into the page.
pub struct DomView {
    elements: PageElements,
}

impl DomView {
    pub fn new(elements: PageElements) -> Self {
        Self { elements }
    }

    fn create_div(&self, class: &str, inner_html: &str) -> Option<Element> {
        match self.elements.document.create_element("div") {
            Ok(div) => {
                div.set_class_name(class);
                div.set_inner_html(inner_html);
                Some(div)
            }
            Err(e) => {
                log::error!("Failed to create element: {:?}", e);
                None
            }
        }
    }

    fn append_to_chat(&self, element: &Element) {
        let log = &self.elements.chat_messages;
        if let Err(e) = log.append_child(element) {
            log::error!("Failed to append chat entry: {:?}", e);
            return;
        }
        log.set_scroll_top(log.scroll_height());
    }
}

impl View for DomView {
    fn set_preview(&mut self, preview: &Preview) {
        self.elements
            .image_preview
            .set_inner_html(&html::preview(preview));
    }

    fn set_analyze_button(&mut self, button: &ButtonState) {
        let el = &self.elements.analyze_button;
        el.set_disabled(!button.enabled);
        el.set_inner_html(&html::button_label(&button.label, button.busy));
    }

    fn show_results(&mut self, markup: &str) {
        let results = &self.elements.results;
        if let Err(e) = results
            .class_list()
            .remove_1(crate::constants::HIDDEN_CLASS)
        {
            log::warn!("Failed to reveal results: {:?}", e);
        }
        results.set_inner_html(markup);
    }

    fn append_message(&mut self, entry: &ChatEntry) {
        if let Some(div) = self.create_div(&html::message_classes(entry), &html::message_body(entry))
        {
            self.append_to_chat(&div);
        }
    }

    fn show_typing(&mut self, id: TypingId) {
        if let Some(div) = self.create_div(html::TYPING_CLASSES, &html::typing_dots()) {
            div.set_id(&id.dom_id());
            self.append_to_chat(&div);
        }
    }

    fn remove_typing(&mut self, id: TypingId) {
        if let Some(el) = self.elements.document.get_element_by_id(&id.dom_id()) {
            el.remove();
        }
    }

    fn chat_input(&self) -> String {
        self.elements.chat_input.value()
    }

    fn clear_chat_input(&mut self) {
        self.elements.chat_input.set_value("");
    }

    fn show_notice(&mut self, notice: &Notice) {
        let Some(div) = self.create_div(&html::notice_classes(notice), &html::notice_body(notice))
        else {
            return;
        };
        if let Err(e) = div.set_attribute(NOTICE_ID_ATTR, &notice.id.0.to_string()) {
            log::warn!("Failed to tag notice: {:?}", e);
        }
        if let Err(e) = self.elements.body.append_child(&div) {
            log::error!("Failed to show notice: {:?}", e);
        }
    }

    fn remove_notice(&mut self, id: NoticeId) {
        let selector = format!("[{}=\"{}\"]", NOTICE_ID_ATTR, id.0);
        if let Ok(Some(el)) = self.elements.document.query_selector(&selector) {
            el.remove();
        }
    }

    fn panel_visibility(&self) -> PanelVisibility {
        let display = self
            .elements
            .chat_panel
            .style()
            .get_property_value("display")
            .unwrap_or_default();
        PanelVisibility::from_css_display(&display)
    }

    fn set_panel_visibility(&mut self, visibility: PanelVisibility) {
        if let Err(e) = self
            .elements
            .chat_panel
            .style()
            .set_property("display", visibility.css_display())
        {
            log::warn!("Failed to toggle chat panel: {:?}", e);
        }
    }
}

/// Notice id of the banner a click landed in, if any.
pub fn notice_id_of(target: &Element) -> Option<NoticeId> {
    if !target.class_list().contains("btn-close") {
        return None;
    }
    let banner = target
        .closest(&format!("[{}]", NOTICE_ID_ATTR))
        .ok()
        .flatten()?;
    banner
        .get_attribute(NOTICE_ID_ATTR)?
        .parse()
        .ok()
        .map(NoticeId)
}
