//! WebAssembly bindings for Flowsmith
//!
//! A browser-facing wrapper around [`FlowchartStore`]. Enum arguments use
//! their wire names (`"diamond"`, `"dashed"`, `"LR"`, ...). Structured values
//! go in and out as JSON strings.

use wasm_bindgen::prelude::*;

use crate::core::{
    ArrowType, CurveStyle, Direction, EdgePatch, EdgeStyle, Look, NodeShape, NodeStylePatch,
    Position, Theme,
};
use crate::flowchart::{FlowchartStore, LayeredLayout};

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn parse_arg<T: std::str::FromStr<Err = String>>(value: &str) -> Result<T, JsValue> {
    value.parse().map_err(|e: String| JsValue::from_str(&e))
}

fn parse_shape(shape: Option<String>) -> Result<Option<NodeShape>, JsValue> {
    shape.as_deref().map(parse_arg).transpose()
}

/// Browser handle on an editing session
#[wasm_bindgen]
pub struct WasmEditor {
    store: FlowchartStore,
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            store: FlowchartStore::new(),
        }
    }

    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, shape: Option<String>) -> Result<String, JsValue> {
        Ok(self.store.add_node(parse_shape(shape)?))
    }

    #[wasm_bindgen(js_name = addNodeAt)]
    pub fn add_node_at(&mut self, x: f64, y: f64, shape: Option<String>) -> Result<String, JsValue> {
        Ok(self.store.add_node_at(Position::new(x, y), parse_shape(shape)?))
    }

    #[wasm_bindgen(js_name = moveNode)]
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.store.move_node(id, Position::new(x, y))
    }

    #[wasm_bindgen(js_name = updateNodeLabel)]
    pub fn update_node_label(&mut self, id: &str, label: &str) -> bool {
        self.store.update_node_label(id, label)
    }

    #[wasm_bindgen(js_name = updateNodeShape)]
    pub fn update_node_shape(&mut self, id: &str, shape: &str) -> Result<bool, JsValue> {
        Ok(self.store.update_node_shape(id, parse_arg(shape)?))
    }

    /// Empty strings clear a channel, `undefined` keeps it
    #[wasm_bindgen(js_name = updateNodeStyle)]
    pub fn update_node_style(
        &mut self,
        id: &str,
        fill: Option<String>,
        stroke: Option<String>,
        text: Option<String>,
    ) -> bool {
        let channel = |value: Option<String>| value.map(|c| Some(c).filter(|c| !c.is_empty()));
        let patch = NodeStylePatch {
            fill_color: channel(fill),
            stroke_color: channel(stroke),
            text_color: channel(text),
        };
        self.store.update_node_style(id, &patch)
    }

    pub fn connect(&mut self, source: &str, target: &str) -> String {
        self.store.connect(source, target)
    }

    #[wasm_bindgen(js_name = updateEdgeLabel)]
    pub fn update_edge_label(&mut self, id: &str, label: &str) -> bool {
        self.store.update_edge_label(id, label)
    }

    #[wasm_bindgen(js_name = updateEdgeType)]
    pub fn update_edge_type(
        &mut self,
        id: &str,
        style: Option<String>,
        arrow: Option<String>,
        stroke: Option<String>,
    ) -> Result<bool, JsValue> {
        let patch = EdgePatch {
            edge_style: style.as_deref().map(parse_arg::<EdgeStyle>).transpose()?,
            arrow_type: arrow.as_deref().map(parse_arg::<ArrowType>).transpose()?,
            stroke_color: stroke.map(|c| Some(c).filter(|c| !c.is_empty())),
        };
        Ok(self.store.update_edge_type(id, &patch))
    }

    #[wasm_bindgen(js_name = selectNode)]
    pub fn select_node(&mut self, id: &str, selected: bool) -> bool {
        self.store.select_node(id, selected)
    }

    #[wasm_bindgen(js_name = selectEdge)]
    pub fn select_edge(&mut self, id: &str, selected: bool) -> bool {
        self.store.select_edge(id, selected)
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.store.clear_selection()
    }

    /// New node ids as a JSON array
    #[wasm_bindgen(js_name = duplicateSelection)]
    pub fn duplicate_selection(&mut self) -> Result<String, JsValue> {
        let ids = self.store.duplicate_selection();
        serde_json::to_string(&ids).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = deleteSelection)]
    pub fn delete_selection(&mut self) -> usize {
        self.store.delete_selection()
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    #[wasm_bindgen(js_name = autoLayout)]
    pub fn auto_layout(&mut self) -> Result<bool, JsValue> {
        self.store
            .auto_layout(&LayeredLayout::new())
            .map_err(|e| JsValue::from_str(&format!("Layout error: {}", e)))
    }

    /// Set the direction and re-run the layout, as the toolbar does
    #[wasm_bindgen(js_name = setDirection)]
    pub fn set_direction(&mut self, direction: &str) -> Result<bool, JsValue> {
        let direction: Direction = parse_arg(direction)?;
        self.store
            .set_direction_and_layout(direction, &LayeredLayout::new())
            .map_err(|e| JsValue::from_str(&format!("Layout error: {}", e)))
    }

    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        self.store.set_theme(parse_arg::<Theme>(theme)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = setLook)]
    pub fn set_look(&mut self, look: &str) -> Result<(), JsValue> {
        self.store.set_look(parse_arg::<Look>(look)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = setCurveStyle)]
    pub fn set_curve_style(&mut self, curve: &str) -> Result<(), JsValue> {
        self.store.set_curve_style(parse_arg::<CurveStyle>(curve)?);
        Ok(())
    }

    /// Mermaid text for the current diagram
    pub fn serialize(&self) -> String {
        self.store.serialize()
    }

    pub fn save(&self) -> Result<String, JsValue> {
        self.store
            .save_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn load(&mut self, json: &str) -> Result<(), JsValue> {
        self.store
            .load_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
