//! Conversion of core errors into JavaScript exceptions.

use pixedit_core::editor::{Notice, Operation};
use pixedit_core::error::EditError;
use wasm_bindgen::prelude::*;

/// Turn any displayable error into a thrown `Error`.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Report a failed editor operation: log it to the console and build the
/// exception carrying the user-facing notice text.
pub(crate) fn notice_error(operation: Operation, err: EditError) -> JsValue {
    let notice = Notice::error(operation, &err);
    log_notice(&notice);
    js_sys::Error::new(&notice.message).into()
}

#[cfg(target_arch = "wasm32")]
fn log_notice(notice: &Notice) {
    use pixedit_core::editor::NoticeLevel;

    let text = JsValue::from_str(&format!("{}: {}", notice.title, notice.message));
    match notice.level {
        NoticeLevel::Info => web_sys::console::info_1(&text),
        NoticeLevel::Error => web_sys::console::warn_1(&text),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn log_notice(_notice: &Notice) {}
