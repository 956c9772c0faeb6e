//! 浏览器原生对话框

/// 阻塞式确认框；无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 浏览器当前时区相对 UTC 的偏移（东正，分钟）
pub fn local_offset_minutes() -> i32 {
    // getTimezoneOffset 以西为正
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}
