pub mod html_report;

pub use html_report::HtmlReport;
