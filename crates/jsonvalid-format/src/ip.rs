//! IP address formats.
//!
//! Both checkers parse with the general address parser and then require the
//! family's separator, so that `"::1"` is not an ipv4 and a bare integer is
//! not an address at all.

use std::net::IpAddr;

use crate::FormatError;

pub fn is_valid_ipv4(ipv4: &str) -> Result<(), FormatError> {
    if ipv4.parse::<IpAddr>().is_err() || !ipv4.contains('.') {
        return Err(FormatError::new(format!("invalid ipv4 address {ipv4}")));
    }
    Ok(())
}

pub fn is_valid_ipv6(ipv6: &str) -> Result<(), FormatError> {
    if ipv6.parse::<IpAddr>().is_err() || !ipv6.contains(':') {
        return Err(FormatError::new(format!("invalid ipv6 address {ipv6}")));
    }
    Ok(())
}
