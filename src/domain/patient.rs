use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::PatientId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Prepaid balance ("abonos") available to the patient.
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Payload for registering a patient. The server assigns the identifier.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl NewPatient {
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        document_number: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        birth_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            document_number: document_number
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            birth_date,
        }
    }
}

/// Partial update; only the fields that are set are sent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

/// Aggregates shown on the patient detail page.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientDetailStatistics {
    pub total_appointments: u32,
    pub total_sales: u32,
    pub total_spent: f64,
    pub balance: f64,
    pub last_visit: Option<DateTime<Utc>>,
}

/// Credit (positive) or debit (negative) applied to a patient's balance.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdate {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_patient_normalizes_optional_fields() {
        let patient = NewPatient::new(
            " Ana ".to_string(),
            "Lopez".to_string(),
            Some("  ".to_string()),
            Some(" 555-1234 ".to_string()),
            Some(" ANA@Example.com ".to_string()),
            None,
        );

        assert_eq!(patient.first_name, "Ana");
        assert_eq!(patient.document_number, None);
        assert_eq!(patient.phone.as_deref(), Some("555-1234"));
        assert_eq!(patient.email.as_deref(), Some("ana@example.com"));
        assert!(patient.validate().is_ok());
    }

    #[test]
    fn new_patient_rejects_invalid_email() {
        let patient = NewPatient::new(
            "Ana".to_string(),
            "Lopez".to_string(),
            None,
            None,
            Some("not-an-email".to_string()),
            None,
        );

        assert!(patient.validate().is_err());
    }

    #[test]
    fn update_patient_serializes_only_set_fields() {
        let update = UpdatePatient {
            phone: Some("555".to_string()),
            ..UpdatePatient::default()
        };

        assert_eq!(serde_json::to_value(&update).expect("serializes"), json!({"phone": "555"}));
    }

    #[test]
    fn patient_deserializes_with_missing_optional_fields() {
        let patient: Patient = serde_json::from_value(json!({
            "id": 3,
            "firstName": "Maria",
            "lastName": "Perez",
            "birthDate": "1990-04-12",
            "createdAt": "2024-01-05T10:00:00.000Z"
        }))
        .expect("valid patient");

        assert_eq!(patient.id.get(), 3);
        assert_eq!(patient.full_name(), "Maria Perez");
        assert_eq!(patient.balance, 0.0);
        assert!(patient.created_at.is_some());
    }
}
