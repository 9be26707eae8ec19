//! Signal-backed state for the signup form. The view binds inputs to these
//! signals and copies them into a [`SignupForm`] on submit.

use crate::features::auth::validation::{SignupForm, format_phone_number};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct SignupFields {
    pub email: RwSignal<String>,
    pub first_name: RwSignal<String>,
    pub last_name: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub address: RwSignal<String>,
    pub city: RwSignal<String>,
    pub zip_code: RwSignal<String>,
    pub accept_terms: RwSignal<bool>,
}

impl SignupFields {
    pub fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            city: RwSignal::new(String::new()),
            zip_code: RwSignal::new(String::new()),
            accept_terms: RwSignal::new(false),
        }
    }

    pub fn snapshot(&self) -> SignupForm {
        SignupForm {
            email: self.email.get_untracked(),
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            phone: self.phone.get_untracked(),
            address: self.address.get_untracked(),
            city: self.city.get_untracked(),
            zip_code: self.zip_code.get_untracked(),
            accept_terms: self.accept_terms.get_untracked(),
        }
    }

    /// Stores raw phone input reformatted as `(XXX) XXX-XXXX`.
    pub fn set_phone(&self, raw: &str) {
        self.phone.set(format_phone_number(raw));
    }

    /// Clears every field, terms flag included. A no-op once the view is gone.
    pub fn reset(&self) {
        self.fill(SignupForm::default());
    }

    fn fill(&self, form: SignupForm) {
        let SignupForm {
            email,
            first_name,
            last_name,
            phone,
            address,
            city,
            zip_code,
            accept_terms,
        } = form;
        let _ = self.email.try_set(email);
        let _ = self.first_name.try_set(first_name);
        let _ = self.last_name.try_set(last_name);
        let _ = self.phone.try_set(phone);
        let _ = self.address.try_set(address);
        let _ = self.city.try_set(city);
        let _ = self.zip_code.try_set(zip_code);
        let _ = self.accept_terms.try_set(accept_terms);
    }
}
