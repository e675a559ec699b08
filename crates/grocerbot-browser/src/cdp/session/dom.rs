//! DOM operations for CDP page session.
//!
//! Elements are addressed by Runtime remote object ids rather than DOM node
//! ids: node ids are invalidated every time the document is re-requested,
//! while a remote object keeps pointing at the same node until the page
//! detaches it.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::BoxModel;

use super::core::PageSession;

const QUERY_WITHIN: &str = "function(selector) { return this.querySelector(selector); }";
const COUNT_WITHIN: &str = "function(selector) { return this.querySelectorAll(selector).length; }";
const NTH_WITHIN: &str =
    "function(selector, index) { return this.querySelectorAll(selector)[index] || null; }";
const INNER_TEXT: &str = "function() { return this.innerText || this.textContent || ''; }";
const IS_CONNECTED: &str = "function() { return this.isConnected; }";
const ATTRIBUTE_WITHIN: &str = "function(selector, name) {
    const el = this.querySelector(selector);
    if (!el) return { found: false, value: null };
    return { found: true, value: el.getAttribute(name) };
}";

impl PageSession {
    /// First element matching `selector` in the document.
    pub async fn query_selector(&self, selector: &str) -> Result<Option<String>, CdpError> {
        let expression = format!("document.querySelector({})", Self::js_string(selector)?);
        self.evaluate_node(&expression).await
    }

    /// First element matching `selector` inside the element `object_id`.
    pub async fn query_selector_within(
        &self,
        object_id: &str,
        selector: &str,
    ) -> Result<Option<String>, CdpError> {
        self.call_on_for_node(object_id, QUERY_WITHIN, vec![json!(selector)])
            .await
    }

    /// All elements matching `selector` inside the element `object_id`.
    pub async fn query_selector_all_within(
        &self,
        object_id: &str,
        selector: &str,
    ) -> Result<Vec<String>, CdpError> {
        // Remote objects come back one per call, so count first and fetch by index.
        let count = self
            .call_on(object_id, COUNT_WITHIN, vec![json!(selector)])
            .await?
            .as_u64()
            .unwrap_or(0);

        let mut nodes = Vec::new();
        for index in 0..count {
            let node = self
                .call_on_for_node(object_id, NTH_WITHIN, vec![json!(selector), json!(index)])
                .await?;
            nodes.extend(node);
        }
        Ok(nodes)
    }

    /// Rendered text of an element.
    pub async fn inner_text(&self, object_id: &str) -> Result<String, CdpError> {
        let text = self.call_on(object_id, INNER_TEXT, vec![]).await?;
        Ok(text.as_str().unwrap_or_default().to_string())
    }

    /// Attribute of the first match of `selector` inside `object_id`.
    ///
    /// Outer `None` means the selector matched nothing; inner `None` means
    /// the attribute is absent.
    pub async fn attribute_within(
        &self,
        object_id: &str,
        selector: &str,
        name: &str,
    ) -> Result<Option<Option<String>>, CdpError> {
        let lookup = self
            .call_on(object_id, ATTRIBUTE_WITHIN, vec![json!(selector), json!(name)])
            .await?;
        Ok(Self::parse_attribute_lookup(&lookup))
    }

    pub(super) fn parse_attribute_lookup(value: &Value) -> Option<Option<String>> {
        if !value["found"].as_bool().unwrap_or(false) {
            return None;
        }
        Some(value["value"].as_str().map(|s| s.to_string()))
    }

    /// Whether the element is still attached to the document.
    pub async fn is_connected(&self, object_id: &str) -> Result<bool, CdpError> {
        let connected = self.call_on(object_id, IS_CONNECTED, vec![]).await?;
        Ok(connected.as_bool() == Some(true))
    }

    /// Layout box of an element, `None` when it is not rendered.
    pub async fn box_model(&self, object_id: &str) -> Result<Option<BoxModel>, CdpError> {
        match self
            .call("DOM.getBoxModel", Some(json!({"objectId": object_id})))
            .await
        {
            Ok(mut reply) => {
                let model = reply.get_mut("model").map(Value::take).unwrap_or_default();
                Ok(Some(serde_json::from_value(model)?))
            }
            Err(e) if e.is_missing_object() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn focus(&self, object_id: &str) -> Result<(), CdpError> {
        self.call("DOM.focus", Some(json!({"objectId": object_id})))
            .await?;
        Ok(())
    }

    /// Scroll the element into view and click its center.
    pub async fn click_element(&self, object_id: &str, click_count: u32) -> Result<(), CdpError> {
        if !self.is_connected(object_id).await? {
            return Err(CdpError::StaleElement("element was detached from the page".to_string()));
        }

        self.call(
            "DOM.scrollIntoViewIfNeeded",
            Some(json!({"objectId": object_id})),
        )
        .await?;

        let (x, y) = self
            .box_model(object_id)
            .await?
            .and_then(|model| model.center())
            .ok_or_else(|| CdpError::ElementNotFound("element is not rendered".to_string()))?;
        self.click(x, y, click_count).await
    }

    /// Set a `<select>`'s value and fire the events frameworks listen for.
    pub async fn select_value(&self, selector: &str, value: &str) -> Result<(), CdpError> {
        let expression = format!(
            "(function(selector, value) {{
                const el = document.querySelector(selector);
                if (!el || el.tagName !== 'SELECT') return 'missing-select';
                if (!Array.from(el.options).some(o => o.value === value)) return 'missing-option';
                el.value = value;
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return 'ok';
            }})({}, {})",
            Self::js_string(selector)?,
            Self::js_string(value)?
        );

        match self.evaluate(&expression).await?.as_str() {
            Some("ok") => Ok(()),
            Some("missing-option") => Err(CdpError::ElementNotFound(format!(
                "option '{}' in {}",
                value, selector
            ))),
            _ => Err(CdpError::ElementNotFound(selector.to_string())),
        }
    }

    /// Quote a string as a JavaScript literal.
    pub(super) fn js_string(s: &str) -> Result<String, CdpError> {
        Ok(serde_json::to_string(s)?)
    }
}
