//! Customer checkout form and its presence validation.

use serde::{Deserialize, Serialize};

/// Errors produced when a [`CustomerForm`] is missing required fields.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required fields: {}", .missing.join(", "))]
pub struct CustomerValidationError {
    /// Wire names of the fields that were absent or empty.
    pub missing: Vec<&'static str>,
}

/// Customer details as submitted by the checkout form.
///
/// Field names on the wire are `FirstName`, `LastName`, `MobileNumber`,
/// `PinCode`, `Address` and `EmailId`. Every field may be absent; only
/// [`CustomerForm::validate`] decides which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

/// A customer that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: Option<String>,
    pub mobile_number: String,
    pub pin_code: Option<String>,
    pub address: String,
    pub email: Option<String>,
}

impl CustomerForm {
    /// Return a copy with every field trimmed; fields that trim to nothing
    /// become absent.
    ///
    /// The cart client trims form input before submitting. The intake service
    /// does not, so a whitespace-only value still counts as present there.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        fn trim(value: Option<&String>) -> Option<String> {
            value
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
        }

        Self {
            first_name: trim(self.first_name.as_ref()),
            last_name: trim(self.last_name.as_ref()),
            mobile_number: trim(self.mobile_number.as_ref()),
            pin_code: trim(self.pin_code.as_ref()),
            address: trim(self.address.as_ref()),
            email_id: trim(self.email_id.as_ref()),
        }
    }

    /// Wire names of required fields that are absent or empty.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("FirstName", &self.first_name),
            ("MobileNumber", &self.mobile_number),
            ("Address", &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }

    /// Check that first name, mobile number and address are present.
    ///
    /// Nothing else is validated: email and mobile number formats and the
    /// postal code are stored exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerValidationError`] listing every missing required field.
    pub fn validate(self) -> Result<NewCustomer, CustomerValidationError> {
        let missing = self.missing_required();
        match (self.first_name, self.mobile_number, self.address) {
            (Some(first_name), Some(mobile_number), Some(address)) if missing.is_empty() => {
                Ok(NewCustomer {
                    first_name,
                    last_name: self.last_name,
                    mobile_number,
                    pin_code: self.pin_code,
                    address,
                    email: self.email_id,
                })
            }
            _ => Err(CustomerValidationError { missing }),
        }
    }
}
