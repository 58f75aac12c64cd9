use gloo::timers::callback::Timeout;
use gloo::utils::window;
use jitterplot_common::TimerHost;

/// Browser event loop: `setTimeout` timers and the page's high-resolution clock.
#[derive(Debug, Default)]
pub struct BrowserHost;

impl TimerHost for BrowserHost {
    type Handle = Timeout;

    fn now_ms(&self) -> f64 {
        window()
            .performance()
            .map(|performance| performance.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}
