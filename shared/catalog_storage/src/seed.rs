//! Sample catalog used to populate an empty collection

use crate::item::{Item, ItemStatus};

const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// The fixed sample items, in display order
#[must_use]
pub fn default_seed_items() -> Vec<Item> {
    [
        ("1", "Apple AirPods pro", ItemStatus::Have),
        ("2", "Apple Macbook Pro", ItemStatus::Have),
        ("3", "Le Labo hand pommade", ItemStatus::Have),
        ("4", "Samsung Serif TV", ItemStatus::Want),
        ("5", "Fujifilm X100V", ItemStatus::Want),
        ("6", "Claude Thinking cap", ItemStatus::Like),
    ]
    .into_iter()
    .map(|(id, title, status)| Item {
        id: id.to_string(),
        title: title.to_string(),
        status,
        image: Some(PLACEHOLDER_IMAGE.to_string()),
        description: None,
        link: None,
    })
    .collect()
}
