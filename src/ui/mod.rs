/// View building blocks
///
/// - `card.rs` - one record in the gallery grid
/// - `popup.rs` - detail overlay for the selected record

pub mod card;
pub mod popup;
