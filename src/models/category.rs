//! Category catalog
//!
//! The fixed list of spending categories offered by selection UIs. Entries are
//! static data; they are never persisted and never change at runtime.

use serde::Serialize;
use std::fmt;

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u32,
    pub display_name: &'static str,
    /// Icon name understood by the rendering layer
    pub icon: &'static str,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name)
    }
}

pub const CATEGORIES: [Category; 6] = [
    Category {
        id: 1,
        display_name: "Shopping",
        icon: "cart",
    },
    Category {
        id: 2,
        display_name: "Food",
        icon: "restaurant",
    },
    Category {
        id: 3,
        display_name: "Transportation",
        icon: "bus",
    },
    Category {
        id: 4,
        display_name: "Entertainment",
        icon: "game-controller",
    },
    Category {
        id: 5,
        display_name: "Bills",
        icon: "receipt",
    },
    Category {
        id: 6,
        display_name: "Others",
        icon: "ellipsis-horizontal",
    },
];

/// All catalog entries in display order
pub fn all() -> &'static [Category] {
    &CATEGORIES
}

pub fn find_by_id(id: u32) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Look up a category by name, ignoring case and surrounding whitespace
pub fn find_by_name(name: &str) -> Option<&'static Category> {
    let name = name.trim();
    CATEGORIES
        .iter()
        .find(|c| c.display_name.eq_ignore_ascii_case(name))
}
