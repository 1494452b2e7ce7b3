/// Replaces every character that cannot appear in a C identifier with `_`.
/// Spaces are the common case ("Error Code"), but registry names also use
/// `-`, `/` and `.`.
fn identifier_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
}

/// `Error Code` -> `ERROR_CODE`, used for macro names.
pub fn def_format(s: &str) -> String {
    identifier_chars(s).map(|c| c.to_ascii_uppercase()).collect()
}

/// `Error Code` -> `error_code`, used for variables, functions and the file name.
pub fn name_format(s: &str) -> String {
    identifier_chars(s).map(|c| c.to_ascii_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_format() {
        assert_eq!(def_format("Test Object"), "TEST_OBJECT");
        assert_eq!(def_format("Bootstrap-Server Account Timeout"), "BOOTSTRAP_SERVER_ACCOUNT_TIMEOUT");
    }

    #[test]
    fn test_name_format() {
        assert_eq!(name_format("Test Object"), "test_object");
        assert_eq!(name_format("On/Off"), "on_off");
        assert_eq!(name_format(" Device "), "device");
    }
}
