use comfy_table::{
    Attribute, Cell, CellAlignment, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};
use std::time::Duration;

use crate::core::{Category, CategoryTree};
use crate::utils::format_short;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn reminder_cell(remind_every: Option<Duration>) -> Cell {
    let text = remind_every.map_or_else(|| "-".to_string(), format_short);
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    // single-line header separator
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
    table
}

fn add_category_rows(table: &mut Table, category: &Category) {
    table.add_row(vec![
        Cell::new(&category.name),
        Cell::new(""),
        reminder_cell(category.remind_every()),
    ]);
    for sub in category.subcategories() {
        table.add_row(vec![
            Cell::new(""),
            Cell::new(&sub.name),
            reminder_cell(sub.remind_every),
        ]);
    }
}

pub(crate) fn build_category_table(tree: &CategoryTree) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Subcategory"),
        header_cell("Reminder"),
    ]);
    for category in tree.categories() {
        add_category_rows(&mut table, category);
    }
    table
}

pub(crate) fn print_category_table(tree: &CategoryTree) {
    println!("{}", build_category_table(tree));
}
