//! DOM renderer (wasm32 only)
//!
//! One absolutely positioned `<div>` per tile. Tiles carry their row, column
//! and generation as data attributes so event handlers can hit-test without
//! the engine ever seeing an element.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use super::{Renderer, TilePlacement, Transform};
use crate::ripple::{Generation, Tile};
use crate::settings::Settings;

const ATTR_ROW: &str = "data-row";
const ATTR_COL: &str = "data-col";
const ATTR_GENERATION: &str = "data-generation";

pub struct DomRenderer {
    document: Document,
    container: HtmlElement,
    class_name: &'static str,
    transition: String,
    tiles: Vec<HtmlElement>,
}

impl DomRenderer {
    pub fn new(document: Document, container: HtmlElement, settings: &Settings) -> Self {
        Self {
            document,
            container,
            class_name: settings.variant.css_class(),
            transition: format!("transform {}ms ease-in-out", settings.transition_ms),
            tiles: Vec::new(),
        }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    fn build_tile(&self, placement: &TilePlacement) -> Option<HtmlElement> {
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(e) => {
                log::error!("Failed to create tile {}: {:?}", placement.tile, e);
                return None;
            }
        };
        element.set_class_name(self.class_name);
        let _ = element.set_attribute(ATTR_ROW, &placement.tile.row.to_string());
        let _ = element.set_attribute(ATTR_COL, &placement.tile.col.to_string());
        let _ = element.set_attribute(ATTR_GENERATION, &placement.generation.0.to_string());

        let element: HtmlElement = element.dyn_into().ok()?;
        let style = element.style();
        let size = format!("{}px", placement.diameter);
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("left", &format!("{}px", placement.left));
        let _ = style.set_property("top", &format!("{}px", placement.top));
        let _ = style.set_property("width", &size);
        let _ = style.set_property("height", &size);
        let _ = style.set_property("transition", &self.transition);

        if let Err(e) = self.container.append_child(&element) {
            log::error!("Failed to attach tile {}: {:?}", placement.tile, e);
            return None;
        }
        Some(element)
    }
}

impl Renderer for DomRenderer {
    /// None when the element could not be created; directives to it are dropped
    type Handle = Option<HtmlElement>;

    fn create_tile(&mut self, placement: &TilePlacement) -> Self::Handle {
        let element = self.build_tile(placement)?;
        self.tiles.push(element.clone());
        Some(element)
    }

    fn remove_all_tiles(&mut self) {
        for tile in self.tiles.drain(..) {
            tile.remove();
        }
    }

    fn apply_transform(&mut self, handle: &Self::Handle, transform: &Transform) {
        let Some(element) = handle else { return };
        let css = transform.to_css();
        let style = element.style();
        let _ = style.set_property("transform", &css);
        let _ = style.set_property("-webkit-transform", &css);
    }

    fn apply_color(&mut self, handle: &Self::Handle, color: &str) {
        let Some(element) = handle else { return };
        let _ = element.style().set_property("background-color", color);
    }
}

/// Resolve an event's target to the tile element it came from
///
/// Returns None for anything that is not a tile.
pub fn tile_from_event(event: &Event) -> Option<(Generation, Tile)> {
    let element: Element = event.target()?.dyn_into().ok()?;
    let row = element.get_attribute(ATTR_ROW)?.parse().ok()?;
    let col = element.get_attribute(ATTR_COL)?.parse().ok()?;
    let generation = element.get_attribute(ATTR_GENERATION)?.parse().ok()?;
    Some((Generation(generation), Tile::new(row, col)))
}
