//! Input validation for identifiers that end up in rendered device lines
//!
//! Rendered lines are tab separated and newline terminated, so any field
//! carrying a tab or newline would shift columns for downstream tooling.
//! Everything here rejects control characters for that reason.

/// Longest identifier accepted for group ids, list labels and interfaces.
pub const MAX_IDENTIFIER_LEN: usize = 64;

fn check_text(input: &str, what: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err(format!("{what} cannot be empty"));
    }

    if input.len() > MAX_IDENTIFIER_LEN {
        return Err(format!("{what} too long (max {MAX_IDENTIFIER_LEN} characters)"));
    }

    if input.chars().any(char::is_control) {
        return Err(format!("{what} contains control characters"));
    }

    Ok(())
}

/// Validates an access group id.
///
/// Accepts numbered (`101`) and named (`EDGE_IN`) groups. Numbers outside
/// the usual numbered access-list ranges (1-199, 1300-2699) are accepted with
/// a warning.
///
/// # Errors
///
/// Returns `Err` if the id is empty, longer than 64 characters, or contains
/// anything but ASCII alphanumerics, `-` and `_`.
pub fn validate_group_id(input: &str) -> Result<Option<String>, String> {
    check_text(input, "Group id")?;

    if !input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err("Group id contains invalid characters (use only a-z, 0-9, _, -)".to_string());
    }

    if let Ok(number) = input.parse::<u32>()
        && !matches!(number, 1..=199 | 1300..=2699)
    {
        return Ok(Some(format!(
            "Group {number} is outside the numbered access-list ranges (1-199, 1300-2699)"
        )));
    }

    Ok(None)
}

/// Validates the list directive written in the first column of rule lines.
///
/// # Errors
///
/// Returns `Err` if the label is empty, too long, contains whitespace or
/// control characters.
pub fn validate_list_label(input: &str) -> Result<String, String> {
    check_text(input, "List label")?;

    if input.chars().any(char::is_whitespace) {
        return Err("List label cannot contain whitespace".to_string());
    }

    Ok(input.to_string())
}

/// Validates a device interface identifier.
///
/// Device names such as `GigabitEthernet0/0.100` or `Serial0/0/0:1` are
/// accepted; spaces are allowed but leading/trailing ones are trimmed.
///
/// # Errors
///
/// Returns `Err` if the identifier is empty, too long, or contains control
/// characters (tabs, newlines).
pub fn validate_interface_id(input: &str) -> Result<String, String> {
    let trimmed = input.trim_matches(' ');
    check_text(trimmed, "Interface id")?;
    Ok(trimmed.to_string())
}

/// Validates a pass-through field (flow type, direction, protocol, port).
///
/// # Errors
///
/// Returns `Err` if the value is empty, too long, or contains control
/// characters.
pub fn validate_field(input: &str, what: &str) -> Result<String, String> {
    check_text(input, what)?;
    Ok(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_group_id_numbered() {
        assert_eq!(validate_group_id("1"), Ok(None));
        assert_eq!(validate_group_id("101"), Ok(None));
        assert_eq!(validate_group_id("1999"), Ok(None));
    }

    #[test]
    fn test_validate_group_id_named() {
        assert_eq!(validate_group_id("EDGE_IN"), Ok(None));
        assert_eq!(validate_group_id("dmz-out"), Ok(None));
    }

    #[test]
    fn test_validate_group_id_warning() {
        let warning = validate_group_id("0").unwrap().unwrap();
        assert!(warning.contains("outside"));
        assert!(validate_group_id("5000").unwrap().is_some());
    }

    #[test]
    fn test_validate_group_id_invalid() {
        assert!(validate_group_id("").is_err());
        assert!(validate_group_id("10 1").is_err());
        assert!(validate_group_id("101\t").is_err());
        assert!(validate_group_id("a;b").is_err());
        assert!(validate_group_id(&"1".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_list_label() {
        assert_eq!(validate_list_label("access-list").unwrap(), "access-list");
        assert!(validate_list_label("access list").is_err());
        assert!(validate_list_label("").is_err());
    }

    #[test]
    fn test_validate_interface_id() {
        assert_eq!(
            validate_interface_id("GigabitEthernet0/0.100").unwrap(),
            "GigabitEthernet0/0.100"
        );
        assert_eq!(validate_interface_id(" Serial0/0/0:1 ").unwrap(), "Serial0/0/0:1");
        assert!(validate_interface_id("eth0\n").is_err());
        assert!(validate_interface_id("   ").is_err());
    }

    #[test]
    fn test_validate_field() {
        assert_eq!(validate_field("in", "Flow direction").unwrap(), "in");
        let err = validate_field("", "Flow direction").unwrap_err();
        assert!(err.starts_with("Flow direction"));
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_accepted_fields_never_contain_control_chars(input in "\\PC*") {
            if let Ok(value) = validate_interface_id(&input) {
                prop_assert!(!value.chars().any(char::is_control));
                prop_assert!(value.len() <= MAX_IDENTIFIER_LEN);
            }
        }

        #[test]
        fn test_tab_always_rejected(prefix in "[a-z0-9]{0,10}", suffix in "[a-z0-9]{0,10}") {
            let input = format!("{prefix}\t{suffix}");
            prop_assert!(validate_group_id(&input).is_err());
            prop_assert!(validate_list_label(&input).is_err());
            prop_assert!(validate_interface_id(&input).is_err());
        }

        #[test]
        fn test_numbered_groups_in_range_have_no_warning(n in 1u32..=199) {
            prop_assert_eq!(validate_group_id(&n.to_string()), Ok(None));
        }
    }
}
