/// Turns free text (or a slug with stray quoting) into a URL-safe slug.
///
/// Lowercases, keeps alphanumerics (accented letters included) and joins
/// every other run of characters into a single `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == '`').chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Percent-encodes the non-ASCII bytes of a slug for use in a URL path.
pub fn encode_path_segment(slug: &str) -> String {
    let mut encoded = String::with_capacity(slug.len());
    for byte in slug.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

/// Display name for a slug: dashes become spaces, words are capitalised.
pub fn unslugify(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_normalises_model_output() {
        assert_eq!(slugify("andrew-huberman"), "andrew-huberman");
        assert_eq!(slugify("\"Andrew Huberman\"\n"), "andrew-huberman");
        assert_eq!(slugify("Dr. Peter  Attia"), "dr-peter-attia");
        assert_eq!(slugify("--"), "");
    }

    #[test]
    fn slugify_keeps_accented_letters() {
        assert_eq!(slugify("José Díaz"), "josé-díaz");
        assert_eq!(slugify("josé-díaz"), "josé-díaz");
        assert_eq!(unslugify(&slugify("josé-díaz")), "José Díaz");
    }

    #[test]
    fn path_segment_escapes_only_non_ascii() {
        assert_eq!(encode_path_segment("andrew-huberman"), "andrew-huberman");
        assert_eq!(encode_path_segment("josé"), "jos%C3%A9");
    }

    #[test]
    fn unslugify_capitalises_words() {
        assert_eq!(unslugify("andrew-huberman"), "Andrew Huberman");
        assert_eq!(unslugify("rhonda-patrick-phd"), "Rhonda Patrick Phd");
    }
}
