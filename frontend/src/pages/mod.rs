pub mod entity_detail;
pub mod entity_form;
pub mod home;
pub mod tags;
