/// Contact form used by the admin API
use crate::constants::{MAX_CONTACT_NAME_LENGTH, MSG_INVALID_EMAIL, MSG_REQUIRED};
use crate::forms::errors::FormValidationError;
use crate::models::NewContact;
use crate::utils::validation::is_valid_email;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_chapel: bool,
    #[serde(default)]
    pub is_praise: bool,
}

impl ContactForm {
    pub fn clean(&self) -> Result<NewContact, FormValidationError> {
        let mut errors = FormValidationError::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", MSG_REQUIRED);
        } else if name.chars().count() > MAX_CONTACT_NAME_LENGTH {
            errors.add(
                "name",
                format!(
                    "Ensure this value has at most {} characters (it has {}).",
                    MAX_CONTACT_NAME_LENGTH,
                    name.chars().count()
                ),
            );
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", MSG_REQUIRED);
        } else if !is_valid_email(email) {
            errors.add("email", MSG_INVALID_EMAIL);
        }

        errors.into_result(NewContact {
            name: name.to_string(),
            email: email.to_string(),
            is_chapel: self.is_chapel,
            is_praise: self.is_praise,
        })
    }
}
