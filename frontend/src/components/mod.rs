pub mod entity_tile;
pub mod image_input;
pub mod layout;
pub mod modal_sheet;
pub mod search_bar;
pub mod tag_input;
