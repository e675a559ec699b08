//! Runtime domain: script evaluation and calls on remote objects.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::RemoteObject;

use super::core::PageSession;

impl PageSession {
    /// Evaluate an expression in the page and return its JSON value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let params = json!({
            "expression": expression,
            "returnByValue": true,
            "awaitPromise": true,
        });
        let object = self.run_script("Runtime.evaluate", params).await?;
        Ok(object.get("value").cloned().unwrap_or(Value::Null))
    }

    /// Evaluate an expression that yields a DOM node.
    pub async fn evaluate_node(&self, expression: &str) -> Result<Option<String>, CdpError> {
        let params = json!({"expression": expression, "returnByValue": false});
        let object = self.run_script("Runtime.evaluate", params).await?;
        Ok(serde_json::from_value::<RemoteObject>(object)?.into_node_id())
    }

    /// Call `function` with `this` bound to `object_id`, returning by value.
    pub async fn call_on(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, CdpError> {
        let params = Self::function_params(object_id, function, args, true);
        let object = self.run_script("Runtime.callFunctionOn", params).await?;
        Ok(object.get("value").cloned().unwrap_or(Value::Null))
    }

    /// Like [`call_on`](Self::call_on) for functions returning a node.
    pub async fn call_on_for_node(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Option<String>, CdpError> {
        let params = Self::function_params(object_id, function, args, false);
        let object = self.run_script("Runtime.callFunctionOn", params).await?;
        Ok(serde_json::from_value::<RemoteObject>(object)?.into_node_id())
    }

    pub(super) fn function_params(
        object_id: &str,
        function: &str,
        args: Vec<Value>,
        by_value: bool,
    ) -> Value {
        let arguments: Vec<Value> = args.into_iter().map(|value| json!({"value": value})).collect();
        json!({
            "objectId": object_id,
            "functionDeclaration": function,
            "arguments": arguments,
            "returnByValue": by_value,
            "awaitPromise": true,
        })
    }

    /// Issue a Runtime command and unwrap its `result` remote object.
    async fn run_script(&self, method: &str, params: Value) -> Result<Value, CdpError> {
        let mut reply = self.call(method, Some(params)).await?;
        if let Some(message) = Self::exception_message(&reply) {
            return Err(CdpError::Script(message));
        }
        Ok(reply
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    pub(super) fn exception_message(reply: &Value) -> Option<String> {
        let details = reply.get("exceptionDetails")?;
        let message = details["exception"]["description"]
            .as_str()
            .or_else(|| details["text"].as_str())
            .unwrap_or("uncaught exception");
        Some(message.to_string())
    }
}
