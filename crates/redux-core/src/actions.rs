use crate::action_types::ReservedAction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A plain action: a `type` string plus arbitrary payload fields.
///
/// Serializes as a flat map, e.g. `{"type": "counter/add", "amount": 5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl AnyAction {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Map::new(),
        }
    }

    /// Add a payload field
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn is(&self, action_type: &str) -> bool {
        self.action_type == action_type
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl From<ReservedAction> for AnyAction {
    fn from(action: ReservedAction) -> Self {
        Self::new(action.action_type())
    }
}

/// Reserved actions as JSON, for stores whose actions are raw `serde_json::Value`s
impl From<ReservedAction> for Value {
    fn from(action: ReservedAction) -> Self {
        serde_json::json!({ "type": action.action_type() })
    }
}
