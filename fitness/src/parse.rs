// fitness/src/parse.rs

/// Parses a command-line or query number. Only finite values count.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_trimmed_numbers() {
        assert_eq!(parse_number(" 180 "), Some(180.0));
        assert_eq!(parse_number("4.5"), Some(4.5));
    }

    #[test]
    fn should_refuse_non_finite_numbers() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("tall"), None);
    }
}
