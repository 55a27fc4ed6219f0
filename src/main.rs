//! Rippler entry point
//!
//! On the web it drives tiles inside the `#rippler` container. Natively it
//! runs one ripple headlessly and prints the render directives as JSON lines.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlElement, MouseEvent, TransitionEvent};

    use rippler::renderer::dom::{DomRenderer, tile_from_event};
    use rippler::{Rippler, Settings};

    type App = Rc<RefCell<Rippler<DomRenderer>>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rippler starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let container: HtmlElement = document
            .get_element_by_id("rippler")
            .expect("no #rippler container")
            .dyn_into()
            .expect("container is not an HtmlElement");

        let settings = Settings::load();
        let rect = container.get_bounding_client_rect();
        let renderer = DomRenderer::new(document, container.clone(), &settings);

        let rippler = match Rippler::new(settings, renderer, rect.width(), rect.height()) {
            Ok(rippler) => rippler,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return;
            }
        };
        let app: App = Rc::new(RefCell::new(rippler));

        setup_click_handler(&container, app.clone());
        setup_transition_handler(&container, app.clone());
        setup_resize_handler(app);

        log::info!("Rippler running!");
    }

    fn setup_click_handler(container: &HtmlElement, app: App) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some((generation, tile)) = tile_from_event(&event) else {
                return;
            };
            event.prevent_default();
            event.stop_propagation();
            app.borrow_mut().on_user_activate(generation, tile);
        });
        let _ = container.add_event_listener_with_callback_and_bool(
            "click",
            closure.as_ref().unchecked_ref(),
            true,
        );
        closure.forget();
    }

    fn setup_transition_handler(container: &HtmlElement, app: App) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TransitionEvent| {
            // Only the transform transition drives the ripple
            if event.property_name() != "transform" {
                return;
            }
            let Some((generation, tile)) = tile_from_event(&event) else {
                return;
            };
            event.stop_propagation();
            app.borrow_mut().on_animation_complete(generation, tile);
        });
        let _ = container.add_event_listener_with_callback_and_bool(
            "transitionend",
            closure.as_ref().unchecked_ref(),
            true,
        );
        closure.forget();
    }

    fn setup_resize_handler(app: App) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut app = app.borrow_mut();
            let rect = app.renderer().container().get_bounding_client_rect();
            app.rebuild(rect.width(), rect.height());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rippler::headless::run_until_idle;
    use rippler::renderer::RecordingRenderer;
    use rippler::{Rippler, Settings, Tile, Variant};

    env_logger::init();
    log::info!("Rippler (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the interactive grid");

    let variant = std::env::args()
        .nth(1)
        .and_then(|arg| Variant::from_str(&arg))
        .unwrap_or_default();
    let settings = Settings::from_variant(variant);

    let mut rippler = match Rippler::new(settings, RecordingRenderer::new(), 256.0, 256.0) {
        Ok(rippler) => rippler,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let (wide, tall) = rippler.grid().dimensions();
    rippler.on_user_activate(rippler.generation(), Tile::new(tall / 2, wide / 2));
    let outcome = run_until_idle(&mut rippler, 100_000);

    for call in rippler.renderer().directives() {
        match serde_json::to_string(call) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to encode directive: {}", e),
        }
    }

    let stats = rippler.stats();
    log::info!(
        "{} variant: {} events, {} activations, {} relays, {} settles ({:?})",
        variant.as_str(),
        outcome.events(),
        stats.activations,
        stats.relays,
        stats.settles,
        outcome
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
