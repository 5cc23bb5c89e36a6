use serde::{Deserialize, Serialize};

/// An account holder and whether the account may receive phone numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub id: i32,
    #[serde(default, alias = "accountHolderName")]
    pub holder_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// Payload accepted when creating an account.
///
/// Any `id` sent by the client is ignored; the gateway assigns identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(default, alias = "accountHolderName")]
    pub holder_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl NewAccount {
    pub fn into_account(self, id: i32) -> Account {
        Account {
            id,
            holder_name: self.holder_name,
            is_active: self.is_active,
        }
    }
}

/// A dialable number, optionally assigned to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub account_id: Option<i32>,
}

/// Payload accepted when adding a phone number to storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhoneNumber {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub account_id: Option<i32>,
}

impl NewPhoneNumber {
    pub fn into_phone_number(self, id: i32) -> PhoneNumber {
        PhoneNumber {
            id,
            number: self.number,
            account_id: self.account_id,
        }
    }
}

/// Renders an optional id the way failure messages expect: the number, or nothing.
pub(crate) fn display_id(id: Option<i32>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn account_uses_camel_case_fields() {
        let account = Account {
            id: 1,
            holder_name: Some("Test Name".to_string()),
            is_active: true,
        };

        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(
            value,
            json!({ "id": 1, "holderName": "Test Name", "isActive": true })
        );
    }

    #[test]
    fn new_account_accepts_legacy_holder_field_and_ignores_id() {
        let payload: NewAccount = serde_json::from_value(json!({
            "id": 99,
            "accountHolderName": "Legacy",
            "isActive": true
        }))
        .unwrap();

        assert_eq!(payload.holder_name.as_deref(), Some("Legacy"));
        assert_eq!(payload.into_account(3).id, 3);
    }

    #[test]
    fn missing_account_flag_defaults_to_inactive() {
        let payload: NewAccount = serde_json::from_value(json!({ "holderName": "x" })).unwrap();
        assert!(!payload.is_active);
    }

    #[test]
    fn unassigned_phone_number_has_no_account() {
        let phone: PhoneNumber =
            serde_json::from_value(json!({ "id": 4, "number": "555-0000" })).unwrap();
        assert_eq!(phone.account_id, None);
        assert_eq!(display_id(phone.account_id), "");
    }
}
