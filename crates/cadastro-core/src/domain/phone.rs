use crate::domain::digits::strip_digits;

const AREA_LEN: usize = 2;
const MOBILE_LEN: usize = 11;
const LANDLINE_LEN: usize = 10;

/// Formats a Brazilian phone number for display: `(DD) DDDDD-DDDD` once an
/// 11th digit shows up (mobile), `(DD) DDDD-DDDD` otherwise. Extra digits
/// beyond 11 are dropped.
///
/// Short input gets as much of the mask as its digits fill, so the
/// formatter is safe to call mid-typing and is idempotent over its own
/// output.
pub fn mask_phone(raw: &str) -> String {
    let stripped: String = strip_digits(raw).chars().take(MOBILE_LEN).collect();
    if stripped.is_empty() {
        return String::new();
    }

    let split = stripped.len().min(AREA_LEN);
    let (area, local) = stripped.split_at(split);
    let mut out = String::from("(");
    out.push_str(area);
    if local.is_empty() {
        return out;
    }
    out.push_str(") ");

    let hyphen_at = if stripped.len() > LANDLINE_LEN { 5 } else { 4 };
    for (index, ch) in local.chars().enumerate() {
        if index == hyphen_at {
            out.push('-');
        }
        out.push(ch);
    }
    out
}
