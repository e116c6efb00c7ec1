//! Infrastructure adapters for Audentra application ports.

#![forbid(unsafe_code)]

mod console_report_renderer;

pub use console_report_renderer::ConsoleReportRenderer;
