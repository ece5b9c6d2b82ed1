use crate::utils::error::Result;
use crate::utils::validation::{
    collect_errors, validate_email, validate_key, validate_non_empty_string, validate_phone,
    validate_range, validate_time_of_day, Validate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_CHILD_AGE: u32 = 17;

/// Meeting request a parent sends to a nanny.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub nanny_id: String,
    pub address: String,
    pub phone: String,
    pub child_age: String,
    pub time: String,
    pub email: String,
    pub parent_name: String,
    pub comment: String,
}

impl Validate for AppointmentRequest {
    fn validate(&self) -> Result<()> {
        let child_age = match self.child_age.trim().parse::<u32>() {
            Ok(age) => validate_range("child_age", age, 0, MAX_CHILD_AGE),
            Err(_) => Err(crate::utils::error::DirectoryError::InvalidConfigValueError {
                field: "child_age".to_string(),
                value: self.child_age.clone(),
                reason: "Child's age must be a whole number".to_string(),
            }),
        };

        collect_errors(vec![
            validate_key("nanny_id", &self.nanny_id),
            validate_non_empty_string("address", &self.address),
            validate_phone("phone", &self.phone),
            child_age,
            validate_time_of_day("time", &self.time),
            validate_email("email", &self.email),
            validate_non_empty_string("parent_name", &self.parent_name),
            validate_non_empty_string("comment", &self.comment),
        ])
    }
}

/// What gets written once a request passes validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAppointment {
    pub nanny_name: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub request: AppointmentRequest,
}

impl SubmittedAppointment {
    /// Relative to the output directory. The id is a validated key, so the
    /// file always lands inside `appointments/`.
    pub fn file_name(&self) -> String {
        format!(
            "appointments/{}-{}.json",
            self.request.nanny_id,
            self.submitted_at.format("%Y%m%dT%H%M%S")
        )
    }
}
