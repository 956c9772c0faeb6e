//! 遗留的静态执照列表页
//!
//! 读取同目录下的 `licenses.json`，渲染到 `#license-table`。与门户应用互不依赖。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement};

pub mod request;
pub mod table;

use request::{BrowserFetch, load_licenses};
use table::{LegacyLicense, NotifyButton};

pub const LICENSES_URL: &str = "licenses.json";
pub const TABLE_ID: &str = "license-table";

fn log_error(message: &str) {
    web_sys::console::error_1(&message.into());
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = render().await {
            log_error(&format!("Erro ao carregar licenças: {}", e));
        }
    });
}

async fn render() -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("sem document")?;
    let table = document
        .get_element_by_id(TABLE_ID)
        .ok_or_else(|| format!("#{} não encontrado", TABLE_ID))?;
    table.set_inner_html("");

    let rows = load_licenses(&BrowserFetch, LICENSES_URL)
        .await
        .map_err(|e| e.to_string())?;
    for license in &rows {
        let row = build_row(&document, license).map_err(|e| format!("{:?}", e))?;
        table.append_child(&row).map_err(|e| format!("{:?}", e))?;
    }
    Ok(())
}

fn cell(document: &Document, text: &str) -> Result<Element, JsValue> {
    let td = document.create_element("td")?;
    td.set_text_content(Some(text));
    Ok(td)
}

fn build_row(document: &Document, license: &LegacyLicense) -> Result<Element, JsValue> {
    let tr = document.create_element("tr")?;
    let id_cell = cell(document, &license.id.to_string())?;
    tr.append_child(&id_cell)?;
    let name_cell = cell(document, &license.name)?;
    tr.append_child(&name_cell)?;
    let status_cell = cell(document, license.status.as_str())?;
    tr.append_child(&status_cell)?;

    let mut state = NotifyButton::new(license.id);
    let button: HtmlButtonElement = document.create_element("button")?.dyn_into()?;
    button.set_text_content(Some(state.label()));

    let target = button.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || {
        if let Some(message) = state.notify() {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&message);
            }
            target.set_text_content(Some(state.label()));
            target.set_disabled(state.is_disabled());
        }
    });
    button.set_onclick(Some(on_click.as_ref().unchecked_ref()));
    // 行与页面同寿命
    on_click.forget();

    let td = document.create_element("td")?;
    td.append_child(&button)?;
    tr.append_child(&td)?;
    Ok(tr)
}
