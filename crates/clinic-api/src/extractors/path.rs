//! Typed path parameter helpers.

use std::str::FromStr;

use clinic_core::error::AppError;

/// Parse an id from a path segment, naming the parameter on failure.
pub fn parse_id<T: FromStr>(raw: &str, name: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("{name} must be a UUID, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::types::RoleId;

    #[test]
    fn test_parse_id() {
        let id = RoleId::new();
        let parsed: RoleId = parse_id(&id.to_string(), "roleId").expect("valid");
        assert_eq!(parsed, id);
        assert!(parse_id::<RoleId>("nope", "roleId").is_err());
    }
}
