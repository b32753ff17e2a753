/// Keeps only ASCII decimal digits, dropping mask punctuation and anything
/// else the user may have typed.
pub fn strip_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::strip_digits;

    #[test]
    fn strip_digits_drops_punctuation_and_letters() {
        assert_eq!(strip_digits("111.444.777-35"), "11144477735");
        assert_eq!(strip_digits(" (11) 98765-4321 "), "11987654321");
        assert_eq!(strip_digits("abc"), "");
    }
}
