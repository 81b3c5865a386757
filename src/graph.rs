//! Builds the widget graph from a raw board export document.
//!
//! The graph is a flat mapping from widget id to widget plus explicit ordered
//! child-id lists on container-capable widgets. Parent/child linkage is by
//! identifier, never by owning references, so the structure stays serializable
//! and free of cyclic-ownership hazards.

use indexmap::IndexMap;
use log::{debug, error, warn};
use serde_json::Value;
use std::path::Path;

use crate::errors::Result;
use crate::models::widget::coerce_id;
use crate::models::{Widget, WidgetBody};

/// The typed widget graph for one conversion job.
///
/// Built once from the raw export, read-only during rendering, discarded when
/// the job completes.
#[derive(Debug, Clone, Default)]
pub struct WidgetGraph {
    widgets: IndexMap<String, Widget>,
    roots: Vec<String>,
}

impl WidgetGraph {
    /// Reads and parses a board export document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<WidgetGraph> {
        let raw = std::fs::read_to_string(path)?;
        WidgetGraph::from_json_str(&raw)
    }

    /// Parses a board export document from a JSON string.
    pub fn from_json_str(raw: &str) -> Result<WidgetGraph> {
        let document: Value = serde_json::from_str(raw)?;
        Ok(WidgetGraph::from_document(&document))
    }

    /// Builds the graph from an already-decoded document.
    ///
    /// Best-effort by design: records without an id or kind are skipped, and a
    /// widget whose nested payload fails to decode gets an empty payload. Neither
    /// aborts the job; an export with no usable widgets simply yields an empty
    /// graph, which the renderer reports as a job-level failure.
    pub fn from_document(document: &Value) -> WidgetGraph {
        let mut widgets: IndexMap<String, Widget> = IndexMap::new();

        let records = document
            .get("content")
            .and_then(|content| content.get("widgets"))
            .and_then(Value::as_array);

        let Some(records) = records else {
            warn!("Board document has no content.widgets section");
            return WidgetGraph::default();
        };

        for record in records {
            let Some(id) = record.get("id").and_then(coerce_id) else {
                debug!("Skipping widget record without an id");
                continue;
            };
            let canvas = record.get("canvasedObjectData");
            let Some(kind_tag) = canvas
                .and_then(|data| data.get("type"))
                .and_then(Value::as_str)
            else {
                debug!("Skipping widget {id} without a kind tag");
                continue;
            };

            let payload = match canvas.and_then(|data| data.get("json")) {
                Some(Value::String(nested)) => match serde_json::from_str::<Value>(nested) {
                    Ok(value) => value,
                    Err(e) => {
                        error!("Error parsing nested JSON for widget {id}: {e}");
                        Value::Object(Default::default())
                    }
                },
                Some(value @ Value::Object(_)) => value.clone(),
                _ => Value::Object(Default::default()),
            };

            let widget = Widget::from_record(id.clone(), kind_tag, &payload, record.clone());
            widgets.insert(id, widget);
        }

        link_children(&mut widgets);

        // A widget whose parent id does not resolve is treated as a root.
        let roots = widgets
            .iter()
            .filter(|(_, widget)| match &widget.parent_id {
                Some(parent_id) => !widgets.contains_key(parent_id),
                None => true,
            })
            .map(|(id, _)| id.clone())
            .collect();

        WidgetGraph { widgets, roots }
    }

    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.get(id)
    }

    /// All widgets in document order, including unrendered kinds.
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.values()
    }

    /// Ids of widgets with no resolvable parent.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// All frames, sorted into slide order by their presentation-order key.
    /// The sort is a stable lexicographic string sort; an absent key sorts first.
    pub fn frames(&self) -> Vec<&Widget> {
        fn order_key(widget: &Widget) -> &str {
            widget
                .as_frame()
                .and_then(|frame| frame.presentation_order.as_deref())
                .unwrap_or("")
        }

        let mut frames: Vec<&Widget> = self
            .widgets
            .values()
            .filter(|widget| widget.as_frame().is_some())
            .collect();
        frames.sort_by(|a, b| order_key(a).cmp(order_key(b)));
        frames
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

/// Second pass: attach each widget to its parent's ordered child list, but only
/// when the parent exists and its kind can hold children. Everything else stays
/// in the index without entering the tree.
fn link_children(widgets: &mut IndexMap<String, Widget>) {
    let links: Vec<(String, String)> = widgets
        .iter()
        .filter_map(|(id, widget)| {
            widget
                .parent_id
                .clone()
                .map(|parent_id| (parent_id, id.clone()))
        })
        .collect();

    for (parent_id, child_id) in links {
        let Some(parent) = widgets.get_mut(&parent_id) else {
            continue;
        };
        if !parent.kind.holds_children() {
            debug!(
                "Widget {child_id} claims parent {parent_id}, which cannot hold children; dropped from tree"
            );
            continue;
        }
        match &mut parent.body {
            WidgetBody::Frame(frame) => frame.children.push(child_id),
            WidgetBody::Container(container) => container.children.push(child_id),
            _ => {}
        }
    }
}
