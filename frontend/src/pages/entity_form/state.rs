use yew::NodeRef;

use common::form::EntityForm;

use crate::helpers::set_window_dirty_flag;

pub struct EntityFormPage {
    /// `None` while the edit flow is still loading the entity.
    pub form: Option<EntityForm>,

    /// A create or update request is in flight.
    pub saving: bool,

    /// Attribute row whose URL is being picked in the media modal.
    pub image_modal: Option<usize>,

    pub image_modal_ref: NodeRef,
}

impl EntityFormPage {
    pub fn new(form: Option<EntityForm>) -> Self {
        Self {
            form,
            saving: false,
            image_modal: None,
            image_modal_ref: NodeRef::default(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.form.as_ref().is_some_and(EntityForm::is_dirty)
    }

    /// Removes attribute row `index`. Rows below it may shift, so an open
    /// media modal is dropped; returns `true` when that happened.
    pub fn remove_attribute(&mut self, index: usize) -> bool {
        let Some(form) = &mut self.form else {
            return false;
        };
        form.remove_attribute(index);
        self.image_modal.take().is_some()
    }

    /// Mirrors the dirty state to `window.app_dirty` for the unload guard.
    pub fn sync_dirty_flag(&self) {
        set_window_dirty_flag(self.is_dirty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::form::RemovalPolicy;
    use common::model::attribute::AttributeField;

    #[test]
    fn removing_a_row_closes_the_image_modal() {
        let mut form = EntityForm::create(RemovalPolicy::HardDelete);
        form.add_attribute();
        form.add_attribute();
        form.update_attribute(1, AttributeField::Key, "logo".to_string());
        let mut page = EntityFormPage::new(Some(form));
        page.image_modal = Some(1);

        assert!(page.remove_attribute(0));
        assert_eq!(page.image_modal, None);

        let form = page.form.as_ref().unwrap();
        assert_eq!(form.attributes.get(0).map(|record| record.key.as_str()), Some("logo"));
    }

    #[test]
    fn removing_without_an_open_modal_reports_nothing() {
        let mut form = EntityForm::create(RemovalPolicy::HardDelete);
        form.add_attribute();
        let mut page = EntityFormPage::new(Some(form));

        assert!(!page.remove_attribute(0));
    }
}
