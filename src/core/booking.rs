use crate::domain::appointment::{AppointmentRequest, SubmittedAppointment};
use crate::domain::ports::{NannySource, Storage};
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};

/// Validates the request, checks the nanny exists and stores the request.
/// Returns the stored record and the path it was written to.
pub async fn submit_appointment<S: Storage>(
    source: &dyn NannySource,
    storage: &S,
    request: AppointmentRequest,
    now: DateTime<Utc>,
) -> Result<(SubmittedAppointment, String)> {
    request.validate()?;

    let nannies = source.fetch_nannies().await?;
    let nanny = nannies
        .iter()
        .find(|n| n.id == request.nanny_id)
        .ok_or_else(|| DirectoryError::NannyNotFound {
            id: request.nanny_id.clone(),
        })?;

    let submitted = SubmittedAppointment {
        nanny_name: nanny.name.clone(),
        submitted_at: now,
        request,
    };

    let path = submitted.file_name();
    let body = serde_json::to_vec_pretty(&submitted)?;
    storage.write_file(&path, &body).await?;

    tracing::info!(
        "Appointment request for {} saved to {}",
        submitted.nanny_name,
        path
    );
    Ok((submitted, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use crate::domain::model::{collection_from_snapshot, Nanny};
    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::TempDir;

    struct Fixed(Vec<Nanny>);

    #[async_trait]
    impl NannySource for Fixed {
        async fn fetch_nannies(&self) -> Result<Vec<Nanny>> {
            Ok(self.0.clone())
        }
    }

    fn source() -> Fixed {
        Fixed(collection_from_snapshot(&json!({"n1": {"name": "Anna"}})))
    }

    fn request(nanny_id: &str) -> AppointmentRequest {
        AppointmentRequest {
            nanny_id: nanny_id.into(),
            address: "Lviv, Rynok 5".into(),
            phone: "+380671112233".into(),
            child_age: "3".into(),
            time: "18:30".into(),
            email: "dad@example.com".into(),
            parent_name: "Taras".into(),
            comment: "Weekends".into(),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn test_submit_writes_request() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        let (submitted, path) = submit_appointment(&source(), &storage, request("n1"), now())
            .await
            .unwrap();

        assert_eq!(submitted.nanny_name, "Anna");
        assert_eq!(path, "appointments/n1-20240501T080000.json");

        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join(&path)).unwrap()).unwrap();
        assert_eq!(written["nanny_name"], "Anna");
        assert_eq!(written["phone"], "+380671112233");
    }

    #[tokio::test]
    async fn test_unknown_nanny() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        let err = submit_appointment(&source(), &storage, request("ghost"), now())
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::NannyNotFound { .. }));
    }

    #[tokio::test]
    async fn test_invalid_request_is_not_written() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let mut bad = request("n1");
        bad.email = "nope".into();

        let err = submit_appointment(&source(), &storage, bad, now())
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::ValidationError { .. }));
        assert!(!dir.path().join("appointments").exists());
    }
}
