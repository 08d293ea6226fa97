//! Key casing between manifests (lowerCamel) and HCL identifiers (lower_snake).
//!
//! The two functions are not inverses of each other. Runs of capitals and
//! dashes are lost on the way to snake case:
//!
//! ```rust
//! use ktf::case::{to_lower_camel, to_lower_snake};
//!
//! assert_eq!(to_lower_snake("EverY-ThinG"), "ever_y_thin_g");
//! assert_eq!(to_lower_camel(&to_lower_snake("EverY-ThinG")), "everYThinG");
//! ```

/// Converts a string to lower_snake case.
///
/// - an `_` is inserted before any transition from lower to upper case,
///   unless the previous character was already a `-` or `_`
/// - every `-` becomes `_`
/// - every letter is lowercased
///
/// A leading `-` therefore becomes a leading `_`.
#[must_use]
pub fn to_lower_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;
    let mut prev_upper = true;

    for ch in input.chars() {
        let upper = ch.is_uppercase();
        if ch == '-' {
            out.push('_');
        } else {
            if !prev_upper && upper && !matches!(prev, Some('-') | Some('_')) {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        }
        prev_upper = upper;
        prev = Some(ch);
    }
    out
}

/// Converts a lower_snake string to lowerCamel case.
///
/// The first segment is kept as is; every later segment gets an upper-case
/// first letter and lower-case rest. Strings without `_` are unchanged.
#[must_use]
pub fn to_lower_camel(input: &str) -> String {
    if !input.contains('_') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    for (i, piece) in input.split('_').enumerate() {
        if i == 0 {
            out.push_str(piece);
            continue;
        }
        let mut chars = piece.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}
