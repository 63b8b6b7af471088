/// Removes every space character. Other whitespace and punctuation are kept.
pub fn compact_phone(value: &str) -> String {
    value.chars().filter(|ch| *ch != ' ').collect()
}

#[cfg(test)]
mod tests {
    use super::compact_phone;

    #[test]
    fn compact_phone_strips_interior_spaces() {
        assert_eq!(compact_phone("00229 12 34 56 78"), "0022912345678");
    }

    #[test]
    fn compact_phone_keeps_other_formatting() {
        assert_eq!(compact_phone("(415) 555-1212"), "(415)555-1212");
        assert_eq!(compact_phone("12\t34"), "12\t34");
    }

    #[test]
    fn compact_phone_handles_empty() {
        assert_eq!(compact_phone("   "), "");
    }
}
