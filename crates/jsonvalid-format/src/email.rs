//! RFC 5322 address syntax (`email`, `idn-email`).
//!
//! Accepts a bare addr-spec or a display name followed by an
//! angle-bracketed addr-spec, with a dot-atom or quoted-string local part
//! and a dot-atom or domain-literal domain.
//! Non-ASCII code points are treated as atext, which is what makes
//! `idn-email` the same predicate.

use crate::FormatError;

pub fn is_valid_email(email: &str) -> Result<(), FormatError> {
    parse_address(email)
}

pub fn is_valid_idn_email(idn_email: &str) -> Result<(), FormatError> {
    parse_address(idn_email)
}

fn parse_address(input: &str) -> Result<(), FormatError> {
    if input.is_empty() {
        return Err(FormatError::new("empty address"));
    }

    let addr = if input.ends_with('>') {
        match input.find('<') {
            Some(open) => &input[open + 1..input.len() - 1],
            None => return Err(FormatError::new("unmatched '>' in address")),
        }
    } else if input.contains('<') {
        return Err(FormatError::new("unmatched '<' in address"));
    } else {
        input
    };

    addr_spec(addr)
}

fn addr_spec(addr: &str) -> Result<(), FormatError> {
    let (local, domain) = split_local_domain(addr)?;

    if local.is_empty() {
        return Err(FormatError::new("missing local part"));
    }
    if domain.is_empty() {
        return Err(FormatError::new("missing domain"));
    }

    if local.starts_with('"') {
        quoted_string(local)?;
    } else {
        dot_atom(local)?;
    }

    if let Some(literal) = domain.strip_prefix('[') {
        match literal.strip_suffix(']') {
            Some(inner) if !inner.is_empty() => Ok(()),
            _ => Err(FormatError::new("malformed domain literal")),
        }
    } else {
        dot_atom(domain)
    }
}

/// Splits `local@domain`. A quoted local part may itself contain `@`, so the
/// quoted form is scanned for its closing quote first.
fn split_local_domain(addr: &str) -> Result<(&str, &str), FormatError> {
    if addr.starts_with('"') {
        let mut escaped = false;
        for (i, c) in addr.char_indices().skip(1) {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                let rest = &addr[i + c.len_utf8()..];
                return match rest.strip_prefix('@') {
                    Some(domain) => Ok((&addr[..=i], domain)),
                    None => Err(FormatError::new("expected '@' after quoted local part")),
                };
            }
        }
        return Err(FormatError::new("unterminated quoted local part"));
    }

    addr.rsplit_once('@')
        .ok_or_else(|| FormatError::new("address must contain '@'"))
}

fn quoted_string(s: &str) -> Result<(), FormatError> {
    let inner = &s[1..s.len() - 1];
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' || (c.is_ascii_control() && c != '\t') {
            return Err(FormatError::new("illegal character in quoted local part"));
        }
    }
    if escaped {
        return Err(FormatError::new("dangling escape in quoted local part"));
    }
    Ok(())
}

fn dot_atom(s: &str) -> Result<(), FormatError> {
    if s.starts_with('.') || s.ends_with('.') || s.contains("..") {
        return Err(FormatError::new("malformed dot-atom"));
    }
    for c in s.chars() {
        if c != '.' && !is_atext(c) {
            return Err(FormatError::new(format!("illegal character {c:?} in address")));
        }
    }
    Ok(())
}

/// RFC 5322 atext, extended with every non-ASCII scalar per RFC 6531.
fn is_atext(c: char) -> bool {
    match c {
        'a'..='z' | 'A'..='Z' | '0'..='9' => true,
        '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '/' | '=' | '?' | '^' | '_'
        | '`' | '{' | '|' | '}' | '~' => true,
        _ => !c.is_ascii(),
    }
}
