//! 定时器封装模块

use std::time::Duration;

use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval`。`Interval` 被 drop 时自动清除定时器。
pub struct Interval {
    handle: i32,
    // 定时器存活期间闭包必须保持有效
    _closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 无法获取 window 或注册失败时返回 `None`
    pub fn new<F>(period: Duration, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let window = web_sys::window()?;
        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            )
            .ok()?;

        Some(Self {
            handle,
            _closure: closure,
        })
    }

    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
