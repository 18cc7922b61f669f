mod categories;
mod report;

pub(crate) use categories::print_category_table;
pub(crate) use report::{output_report_json, render_report_text};
