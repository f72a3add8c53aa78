use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::AppError;

/// JSON body whose rejections surface as [`AppError::Validation`].
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Meal ids in paths must be UUIDs in hyphenated form. Simple, braced and
/// URN spellings are rejected.
pub fn parse_meal_id(raw: &str) -> Result<Uuid, AppError> {
    let invalid = || AppError::Validation(format!("Invalid meal id: {}", raw));

    let id = Uuid::parse_str(raw).map_err(|_| invalid())?;
    if !id.hyphenated().to_string().eq_ignore_ascii_case(raw) {
        return Err(invalid());
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meal_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_meal_id(&id.to_string()).unwrap(), id);

        let upper = id.hyphenated().to_string().to_uppercase();
        assert_eq!(parse_meal_id(&upper).unwrap(), id);

        let err = parse_meal_id("42").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_parse_meal_id_rejects_other_uuid_forms() {
        let id = Uuid::new_v4();

        for raw in [
            id.simple().to_string(),
            id.braced().to_string(),
            id.urn().to_string(),
        ] {
            let err = parse_meal_id(&raw).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{}", raw);
        }
    }
}
