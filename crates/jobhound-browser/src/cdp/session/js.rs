//! JavaScript execution operations for CDP page session.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::ExceptionDetails;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        Self::check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Call a function with `this` bound to a remote object.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: Option<Vec<Value>>,
    ) -> Result<Value, CdpError> {
        let mut params = json!({
            "objectId": object_id,
            "functionDeclaration": function,
            "returnByValue": true,
            "awaitPromise": true,
        });

        if let Some(a) = args {
            params["arguments"] =
                json!(a.into_iter().map(|v| json!({"value": v})).collect::<Vec<_>>());
        }

        let result = self.call("Runtime.callFunctionOn", Some(params)).await?;

        Self::check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Call a function with `this` bound to a DOM node.
    pub async fn call_on_node(
        &self,
        node_id: i64,
        function: &str,
        args: Option<Vec<Value>>,
    ) -> Result<Value, CdpError> {
        let object = self.resolve_node(node_id).await?;
        let object_id = object
            .object_id
            .ok_or(CdpError::NodeNotFound(node_id))?;
        let result = self.call_function_on(&object_id, function, args).await;

        // Release the handle so long scroll sessions don't accumulate objects.
        let _ = self
            .call("Runtime.releaseObject", Some(json!({"objectId": object_id})))
            .await;
        result
    }

    pub(super) fn check_exception(result: &Value) -> Result<(), CdpError> {
        match result.get("exceptionDetails") {
            Some(raw) => {
                let message = serde_json::from_value::<ExceptionDetails>(raw.clone())
                    .map(|d| d.message())
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(CdpError::JavaScript(message))
            }
            None => Ok(()),
        }
    }
}
