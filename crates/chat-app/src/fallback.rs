//! Top-level failure catch-all.
//!
//! There is no structured recovery from a rendering panic. The hook surfaces
//! the failure in a DOM overlay whose only offered action is a full page
//! reload.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub fn install_crash_overlay() {
    std::panic::set_hook(Box::new(|info| {
        let message = info.to_string();
        log::error!("fatal: {}", message);
        show_overlay(&message);
    }));
}

fn show_overlay(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };

    // A later panic while the overlay is already up changes nothing
    if document.get_element_by_id("crash_overlay").is_some() {
        return;
    }

    let Ok(overlay) = document.create_element("div") else {
        return;
    };
    overlay.set_id("crash_overlay");
    let _ = overlay.set_attribute(
        "style",
        "position:fixed;inset:0;background:rgba(12,13,18,0.94);color:#e5e6eb;\
         font-family:sans-serif;display:flex;flex-direction:column;\
         align-items:center;justify-content:center;gap:12px;z-index:9999;",
    );

    if let Ok(heading) = document.create_element("h2") {
        heading.set_text_content(Some("Something went wrong"));
        let _ = overlay.append_child(&heading);
    }

    if let Ok(detail) = document.create_element("pre") {
        detail.set_text_content(Some(message));
        let _ = detail.set_attribute(
            "style",
            "max-width:80%;white-space:pre-wrap;color:#9ea1b0;",
        );
        let _ = overlay.append_child(&detail);
    }

    if let Ok(button) = document.create_element("button") {
        button.set_text_content(Some("Reload"));
        let _ = button.set_attribute(
            "style",
            "padding:8px 24px;font-size:16px;cursor:pointer;",
        );
        let reload = Closure::<dyn FnMut()>::new(|| {
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        });
        let _ = button
            .add_event_listener_with_callback("click", reload.as_ref().unchecked_ref());
        reload.forget();
        let _ = overlay.append_child(&button);
    }

    let _ = body.append_child(&overlay);
}
