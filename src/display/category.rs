//! Category display formatting

use crate::models::Category;

/// Format the catalog as a numbered list
pub fn format_category_list(categories: &[Category]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:>3}  {:16} {}\n", "ID", "Category", "Icon"));
    output.push_str(&"-".repeat(40));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{:>3}  {:16} {}\n",
            category.id, category.display_name, category.icon
        ));
    }

    output
}
