//! Category CLI commands

use crate::display::format_category_list;
use crate::models::category;

/// Print the spending category catalog
pub fn handle_categories_command() {
    print!("{}", format_category_list(category::all()));
}
