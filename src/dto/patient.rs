//! DTOs shaped for the patient detail page.

use crate::domain::patient::{Patient, PatientDetailStatistics};

/// Aggregated data required to render the patient details page.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientPageData {
    pub patient: Patient,
    pub statistics: PatientDetailStatistics,
}
