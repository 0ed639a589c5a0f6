// src/render/mod.rs
//! Response Renderer: pure functions from matched results to chat text or
//! chart series. Text is assembled as a list of lines joined once.

pub mod chart;
pub mod chat;
pub mod climate;

pub use chart::{render_chart, render_chart_top, ChartData, NO_MATCHING_CROPS};
pub use chat::{render_chat, render_chat_with, ChatLimits, NO_MATCHES_MESSAGE};
pub use climate::{render_climate, ClimateLimits};

/// Numbers as the UI has always shown them: whole values keep one decimal ("5.0").
pub(crate) fn fmt_num(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}
