//! DOM operations for CDP page session.
//!
//! Node ids are only valid until the next `DOM.getDocument`; callers that
//! need a fresh view of the page re-query from the document root.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{BoxModel, DomNode, RemoteObject};

use super::core::PageSession;

const INNER_TEXT_FN: &str =
    "function() { return this.innerText ?? this.textContent ?? ''; }";
const SCROLL_INTO_VIEW_FN: &str =
    "function() { this.scrollIntoView({block: 'center', inline: 'center'}); }";
const JS_CLICK_FN: &str = "function() { this.click(); }";

impl PageSession {
    /// Get document root node. Invalidates previously returned node ids.
    pub async fn get_document(&self) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.getDocument", Some(json!({"depth": 0})))
            .await?;

        let root: DomNode = serde_json::from_value(result["root"].clone())?;
        Ok(root)
    }

    /// All nodes in the current document matching `selector`, in document order.
    pub async fn query_selector_all(&self, selector: &str) -> Result<Vec<i64>, CdpError> {
        let doc = self.get_document().await?;
        if doc.child_node_count == 0 {
            return Ok(Vec::new());
        }
        self.query_selector_all_within(doc.node_id, selector).await
    }

    /// All descendants of `node_id` matching `selector`.
    pub async fn query_selector_all_within(
        &self,
        node_id: i64,
        selector: &str,
    ) -> Result<Vec<i64>, CdpError> {
        let result = self
            .call(
                "DOM.querySelectorAll",
                Some(json!({
                    "nodeId": node_id,
                    "selector": selector,
                })),
            )
            .await?;

        let node_ids: Vec<i64> = result["nodeIds"]
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default();

        Ok(node_ids)
    }

    /// First descendant of `node_id` matching `selector`.
    pub async fn query_selector_within(
        &self,
        node_id: i64,
        selector: &str,
    ) -> Result<Option<i64>, CdpError> {
        let result = self
            .call(
                "DOM.querySelector",
                Some(json!({
                    "nodeId": node_id,
                    "selector": selector,
                })),
            )
            .await?;

        Ok(match result["nodeId"].as_i64().unwrap_or(0) {
            0 => None,
            id => Some(id),
        })
    }

    /// Raw attribute value as written in markup.
    pub async fn get_attribute(&self, node_id: i64, name: &str) -> Result<Option<String>, CdpError> {
        let result = self
            .call("DOM.getAttributes", Some(json!({"nodeId": node_id})))
            .await?;

        let attrs: Vec<String> = serde_json::from_value(result["attributes"].clone())?;
        Ok(Self::find_attribute(&attrs, name))
    }

    /// Rendered text of a node.
    pub async fn inner_text(&self, node_id: i64) -> Result<String, CdpError> {
        let value = self.call_on_node(node_id, INNER_TEXT_FN, None).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Resolve node to runtime object.
    pub async fn resolve_node(&self, node_id: i64) -> Result<RemoteObject, CdpError> {
        let result = self
            .call("DOM.resolveNode", Some(json!({"nodeId": node_id})))
            .await?;

        let obj: RemoteObject = serde_json::from_value(result["object"].clone())?;
        Ok(obj)
    }

    /// Get box model for node. `None` when the node is not rendered.
    pub async fn get_box_model(&self, node_id: i64) -> Result<Option<BoxModel>, CdpError> {
        let result = self
            .call("DOM.getBoxModel", Some(json!({"nodeId": node_id})))
            .await;

        match result {
            Ok(r) => {
                let model: BoxModel = serde_json::from_value(r["model"].clone())?;
                Ok(Some(model))
            }
            Err(CdpError::Protocol { code: -32000, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Click a node: scroll it into view and dispatch a real mouse click at
    /// its center, falling back to `element.click()` when it has no box.
    pub async fn click_node(&self, node_id: i64) -> Result<(), CdpError> {
        self.call_on_node(node_id, SCROLL_INTO_VIEW_FN, None).await?;

        match self.get_box_model(node_id).await? {
            Some(model) if model.width > 0 && model.height > 0 => {
                let (x, y) = Self::quad_center(&model.content);
                self.click_at(x, y).await
            }
            _ => {
                self.call_on_node(node_id, JS_CLICK_FN, None).await?;
                Ok(())
            }
        }
    }

    /// Calculate center point of a quad.
    pub(super) fn quad_center(quad: &[f64]) -> (f64, f64) {
        if quad.len() >= 8 {
            let x = (quad[0] + quad[2] + quad[4] + quad[6]) / 4.0;
            let y = (quad[1] + quad[3] + quad[5] + quad[7]) / 4.0;
            (x, y)
        } else {
            (0.0, 0.0)
        }
    }

    /// Look up `name` in CDP's flat `[name, value, name, value, ...]` list.
    pub(super) fn find_attribute(attrs: &[String], name: &str) -> Option<String> {
        attrs
            .chunks_exact(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(name))
            .map(|pair| pair[1].clone())
    }
}
