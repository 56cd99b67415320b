//! Browser entry points. A host page measures blocks in its own DOM
//! (see [`crate::render::HtmlRenderer::render_measurement_surface`]) and
//! passes the heights back in the request.

use wasm_bindgen::prelude::*;

fn to_js(e: crate::VitaeError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// Paginate a request JSON, returning the page partition as a JS object.
#[wasm_bindgen]
pub fn paginate(json: &str) -> Result<JsValue, JsValue> {
    let summary = crate::paginate_json(json).map_err(to_js)?;
    serde_wasm_bindgen::to_value(&summary).map_err(JsValue::from)
}

/// Paginate a request JSON and render the pages to an HTML document.
#[wasm_bindgen]
pub fn render_html(json: &str) -> Result<String, JsValue> {
    crate::render_html_json(json).map_err(to_js)
}

/// The hidden measurement mirror for the blocks of a request, as HTML.
#[wasm_bindgen]
pub fn measurement_surface(json: &str) -> Result<String, JsValue> {
    let request = crate::PaginationRequest::from_json(json).map_err(to_js)?;
    let theme = request.theme().map_err(to_js)?;
    let blocks = crate::theme::render_blocks(&request.document, theme, &request.labels);
    Ok(crate::render::HtmlRenderer::new(request.geometry).render_measurement_surface(&blocks))
}
