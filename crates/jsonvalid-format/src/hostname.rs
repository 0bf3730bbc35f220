//! Hostname formats (RFC 1034 labels, RFC 5890 internationalised names).

use std::sync::OnceLock;

use regex::Regex;

use crate::FormatError;

const MAX_HOSTNAME_LENGTH: usize = 255;

/// Code points that invalidate an internationalised hostname outright,
/// regardless of label structure: space, hyphen, currency signs, joiners and
/// a curated list of presentation/contextual-rule violations.
const DISALLOWED_IDN_CHARS: &[char] = &[
    '\u{0020}', '\u{002D}', '\u{00A2}', '\u{00A3}', '\u{00A4}', '\u{00A5}', '\u{034F}',
    '\u{0640}', '\u{07FA}', '\u{180B}', '\u{180C}', '\u{180D}', '\u{200B}', '\u{2060}',
    '\u{2104}', '\u{2108}', '\u{2114}', '\u{2117}', '\u{2118}', '\u{211E}', '\u{211F}',
    '\u{2123}', '\u{2125}', '\u{2282}', '\u{2283}', '\u{2284}', '\u{2285}', '\u{2286}',
    '\u{2287}', '\u{2288}', '\u{2616}', '\u{2617}', '\u{2619}', '\u{262F}', '\u{2638}',
    '\u{266C}', '\u{266D}', '\u{266F}', '\u{2752}', '\u{2756}', '\u{2758}', '\u{275E}',
    '\u{2761}', '\u{2775}', '\u{2794}', '\u{2798}', '\u{27AF}', '\u{27B1}', '\u{27BE}',
    '\u{3004}', '\u{3012}', '\u{3013}', '\u{3020}', '\u{302E}', '\u{302F}', '\u{3031}',
    '\u{3032}', '\u{3035}', '\u{303B}', '\u{3164}', '\u{FFA0}',
];

fn hostname_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]{0,61}[A-Za-z0-9])(\.([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]{0,61}[A-Za-z0-9]))*$",
        )
        .expect("hostname pattern must compile")
    })
}

/// RFC 1034 §3.1: dot-joined labels of at most 63 alphanumeric-or-hyphen
/// characters, not starting or ending with a hyphen, 255 characters total.
pub fn is_valid_hostname(hostname: &str) -> Result<(), FormatError> {
    if hostname.len() > MAX_HOSTNAME_LENGTH {
        return Err(FormatError::new(
            "hostname is too long (more than 255 characters)",
        ));
    }
    if !hostname_regex().is_match(hostname) {
        return Err(FormatError::new(format!("{hostname} is not a valid hostname")));
    }
    Ok(())
}

/// RFC 5890 §2.3.2.3: length-bounded, and free of the fixed disallowed set.
pub fn is_valid_idn_hostname(idn_hostname: &str) -> Result<(), FormatError> {
    if idn_hostname.len() > MAX_HOSTNAME_LENGTH {
        return Err(FormatError::new(
            "hostname is too long (more than 255 characters)",
        ));
    }
    for c in idn_hostname.chars() {
        if DISALLOWED_IDN_CHARS.contains(&c) {
            return Err(FormatError::new(format!(
                "invalid hostname: contains illegal character U+{:04X}",
                c as u32
            )));
        }
    }
    Ok(())
}
