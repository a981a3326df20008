use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The static view of a step sequence.
///
/// `Schematic` is extracted from a pipeline builder and lists its steps in
/// execution order. It is used for documentation and inspection; it has no
/// effect on execution.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Schematic {
    pub name: String,
    pub description: Option<String>,
    pub nodes: Vec<Node>,
}

impl Schematic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append a step node, returning its id.
    pub fn push(&mut self, label: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.nodes.push(Node {
            id,
            position: self.nodes.len(),
            label: label.into(),
        });
        id
    }

    pub fn labels(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.label.as_str()).collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    /// Zero-based cursor position of the step
    pub position: usize,
    pub label: String,
}
