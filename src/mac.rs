use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("MAC address cannot be empty")]
    Empty,
    #[error("MAC address contains invalid characters {0:?}, only : or - are allowed as separators")]
    InvalidCharacters(String),
    #[error("MAC address must contain at least 12 hex digits, found {0}")]
    TooShort(usize),
}

/// A six-octet hardware address, stored in transmission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> MacAddress {
        MacAddress(octets)
    }

    /// Parses a MAC address from any of the common surface formats.
    ///
    /// Separators (`:` or `-`) are discarded wherever they appear, so
    /// `aa:bb:cc:dd:ee:ff`, `aaaa-bbbb-ccdd`, bare `a1b2c3d4e5f6` and
    /// mixed-separator strings are all accepted. The character set is
    /// checked before any digits are counted, so a string containing
    /// anything but hex digits and the two separators is rejected even
    /// when it holds enough digits. Digits past the twelfth are ignored.
    pub fn normalize(raw: &str) -> Result<MacAddress, ParseError> {
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }
        let invalid: String = raw
            .chars()
            .filter(|c| !c.is_ascii_hexdigit() && *c != ':' && *c != '-')
            .collect();
        if !invalid.is_empty() {
            return Err(ParseError::InvalidCharacters(invalid));
        }
        let digits: Vec<u8> = raw
            .chars()
            .filter_map(|c| c.to_digit(16).map(|d| d as u8))
            .collect();
        if digits.len() < 12 {
            return Err(ParseError::TooShort(digits.len()));
        }
        let mut octets = [0u8; 6];
        for (octet, pair) in octets.iter_mut().zip(digits[..12].chunks_exact(2)) {
            *octet = pair[0] << 4 | pair[1];
        }
        Ok(MacAddress(octets))
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// The canonical form: 12 lowercase hex digits, no separators.
    pub fn hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for MacAddress {
    /// Human-readable 4-4-4 grouping, e.g. `aabb-ccdd-eeff`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}",
            a, b, c, d, e, g
        )
    }
}
