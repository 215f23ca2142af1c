//! Tests for access token validity.

use giotto_models::AccessToken;
use std::time::Duration;

const MARGIN: Duration = Duration::from_secs(300);

#[test]
fn test_token_valid_inside_safety_margin() {
    let token = AccessToken::new("abc", Duration::from_secs(3600));
    let acquired = *token.acquired_at();

    // Valid up to acquired + 3300s with the 5-minute margin.
    assert!(token.is_valid_at(acquired, MARGIN));
    assert!(token.is_valid_at(acquired + Duration::from_secs(3299), MARGIN));
}

#[test]
fn test_token_invalid_from_margin_boundary() {
    let token = AccessToken::new("abc", Duration::from_secs(3600));
    let acquired = *token.acquired_at();

    assert!(!token.is_valid_at(acquired + Duration::from_secs(3300), MARGIN));
    assert!(!token.is_valid_at(acquired + Duration::from_secs(3301), MARGIN));
    assert!(!token.is_valid_at(acquired + Duration::from_secs(7200), MARGIN));
}

#[test]
fn test_zero_margin_uses_full_lifetime() {
    let token = AccessToken::new("abc", Duration::from_secs(3600));
    let acquired = *token.acquired_at();

    assert!(token.is_valid_at(acquired + Duration::from_secs(3599), Duration::ZERO));
    assert!(!token.is_valid_at(acquired + Duration::from_secs(3600), Duration::ZERO));
}

#[test]
fn test_short_lived_token_with_large_margin_is_never_valid() {
    let token = AccessToken::new("abc", Duration::from_secs(60));
    let acquired = *token.acquired_at();

    assert!(!token.is_valid_at(acquired, MARGIN));
}

#[test]
fn test_token_accessors() {
    let token = AccessToken::new("bearer-value", Duration::from_secs(3600));
    assert_eq!(token.value(), "bearer-value");
    assert_eq!(*token.expires_in(), Duration::from_secs(3600));
}
