use crate::domain::digits::strip_digits;

pub const CPF_LEN: usize = 11;

/// Checks the two CPF verification digits over the stripped input.
///
/// Rejects anything that does not strip to exactly 11 digits and the
/// degenerate all-same-digit sequences ("00000000000" and friends), which
/// satisfy the checksum but are not issued.
pub fn is_valid_cpf(raw: &str) -> bool {
    let stripped = strip_digits(raw);
    if stripped.len() != CPF_LEN {
        return false;
    }
    let digits: Vec<u32> = stripped
        .chars()
        .filter_map(|ch| ch.to_digit(10))
        .collect();
    if digits.iter().all(|&digit| digit == digits[0]) {
        return false;
    }
    check_digit(&digits[..9], 10) == digits[9] && check_digit(&digits[..10], 11) == digits[10]
}

// Weighted sum with weights descending from `first_weight` to 2, then
// remainder = (sum * 10) mod 11, with 10 collapsing to 0.
fn check_digit(prefix: &[u32], first_weight: u32) -> u32 {
    let sum: u32 = prefix
        .iter()
        .zip((2..=first_weight).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let remainder = (sum * 10) % 11;
    if remainder >= 10 {
        0
    } else {
        remainder
    }
}

/// Formats the digit content of `raw` as `DDD.DDD.DDD-DD`, truncating past
/// 11 digits. Partial input gets a partial mask, so the formatter can run
/// on every keystroke.
pub fn mask_cpf(raw: &str) -> String {
    let stripped = strip_digits(raw);
    let mut out = String::new();
    for (index, ch) in stripped.chars().take(CPF_LEN).enumerate() {
        match index {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{is_valid_cpf, mask_cpf};

    #[test]
    fn valid_cpf_accepts_known_reference_value() {
        assert!(is_valid_cpf("11144477735"));
        assert!(is_valid_cpf("111.444.777-35"));
    }

    #[test]
    fn valid_cpf_rejects_single_digit_alterations() {
        let reference = "11144477735";
        for position in 0..reference.len() {
            let mut altered: Vec<u8> = reference.bytes().collect();
            altered[position] = if altered[position] == b'9' {
                b'0'
            } else {
                altered[position] + 1
            };
            let altered = String::from_utf8(altered).expect("ascii digits");
            assert!(!is_valid_cpf(&altered), "accepted {}", altered);
        }
    }

    #[test]
    fn valid_cpf_rejects_wrong_length() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("1114447773"));
        assert!(!is_valid_cpf("111444777350"));
    }

    #[test]
    fn valid_cpf_rejects_repeated_digit_sequences() {
        assert!(!is_valid_cpf("00000000000"));
        assert!(!is_valid_cpf("11111111111"));
        assert!(!is_valid_cpf("99999999999"));
    }

    #[test]
    fn mask_cpf_formats_full_value() {
        assert_eq!(mask_cpf("11144477735"), "111.444.777-35");
    }

    #[test]
    fn mask_cpf_tolerates_partial_input() {
        assert_eq!(mask_cpf(""), "");
        assert_eq!(mask_cpf("111"), "111");
        assert_eq!(mask_cpf("1114"), "111.4");
        assert_eq!(mask_cpf("111444777"), "111.444.777");
    }

    #[test]
    fn mask_cpf_truncates_extra_digits() {
        assert_eq!(mask_cpf("111444777359999"), "111.444.777-35");
    }

    #[test]
    fn mask_cpf_is_idempotent() {
        for raw in ["", "1", "111444", "11144477735", "111.444.777-35"] {
            let once = mask_cpf(raw);
            assert_eq!(mask_cpf(&once), once);
        }
    }
}
