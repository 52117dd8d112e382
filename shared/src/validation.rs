use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static LOTTERY_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+[0-9]{4}$").unwrap());

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(ValidationError::new("invalid_email_format"));
    }
    Ok(())
}

/// Lottery ids look like `spring2021`: a season name and a year.
pub fn validate_lottery_id(id: &str) -> Result<(), ValidationError> {
    if !LOTTERY_ID.is_match(id) {
        return Err(ValidationError::new("invalid_lottery_id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@school.edu").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("ada.school.edu").is_err());
        assert!(validate_email("@school.edu").is_err());
    }

    #[test]
    fn test_validate_lottery_id() {
        assert!(validate_lottery_id("spring2021").is_ok());
        assert!(validate_lottery_id("Spring2021").is_err());
        assert!(validate_lottery_id("spring21").is_err());
        assert!(validate_lottery_id("../etc").is_err());
    }
}
