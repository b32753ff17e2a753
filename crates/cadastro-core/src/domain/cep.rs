use crate::domain::digits::strip_digits;

pub const CEP_LEN: usize = 8;

/// Formats the digit content of `raw` as `DDDDD-DDD`, truncating past
/// 8 digits. Partial input gets a partial mask.
pub fn mask_cep(raw: &str) -> String {
    let stripped = strip_digits(raw);
    let mut out = String::new();
    for (index, ch) in stripped.chars().take(CEP_LEN).enumerate() {
        if index == 5 {
            out.push('-');
        }
        out.push(ch);
    }
    out
}
