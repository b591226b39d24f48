//! Cart write payloads.

use littlelemon::ids::MenuItemId;

/// New Cart Line
///
/// `quantity` is validated by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub menuitem: MenuItemId,
    pub quantity: i64,
}
