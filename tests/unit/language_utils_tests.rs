/*!
 * Tests for language code utilities
 */

use doctran::language_utils::{get_language_name, validate_language_code, AUTO_LANGUAGE};

#[test]
fn test_validate_language_code_withValidCodes_shouldSucceed() {
    assert!(validate_language_code("es").is_ok());
    assert!(validate_language_code("EN").is_ok());
    assert!(validate_language_code(AUTO_LANGUAGE).is_ok());
}

#[test]
fn test_validate_language_code_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("spanish").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_get_language_name_withKnownCode_shouldReturnEnglishName() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
}

#[test]
fn test_get_language_name_withAuto_shouldReturnAutoDetected() {
    assert_eq!(get_language_name("auto").unwrap(), "auto-detected");
}

#[test]
fn test_get_language_name_withUnknownCode_shouldFail() {
    assert!(get_language_name("xx").is_err());
}
