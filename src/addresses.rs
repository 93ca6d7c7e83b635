use crate::errors::TgnError;
use core::fmt::{
    Display,
    Formatter,
    Result as FmtResult,
};
use core::str::FromStr;

const MAC_OCTETS: usize = 6;

/// `MacAddress` is a parsed MAC address. It accepts the standard (`11:22:33:44:55:66`), hyphened
/// (`11-22-33-44-55-66`), dotted (`1122.3344.5566`) and bare (`112233445566`) forms; leading
/// zeros may be omitted in the standard and hyphened forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MacAddress {
    octets: [u8; MAC_OCTETS],
}

fn malformed(
    address: &str,
    details: &str,
) -> TgnError {
    TgnError::MalformedAddress {
        address: address.to_owned(),
        details: details.to_owned(),
    }
}

fn split_pairs(hex: &str) -> Vec<String> {
    hex.as_bytes()
        .chunks(2)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect()
}

impl MacAddress {
    /// Returns a new `MacAddress` parsed from `address`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedAddress` if `address` does not hold exactly six hex literals in one of the
    /// accepted forms.
    pub fn new(address: &str) -> Result<Self, TgnError> {
        if !address.is_ascii() {
            return Err(malformed(address, "MAC should only hold ascii characters"));
        }

        let literals = if address.contains('.') {
            let groups: Vec<&str> = address.split('.').collect();

            if groups.len() != 3 || groups.iter().any(|g| g.len() != 4) {
                return Err(malformed(address, "dotted MAC should be xxxx.yyyy.zzzz"));
            }

            split_pairs(&groups.concat())
        } else if address.contains('-') {
            address.split('-').map(str::to_owned).collect()
        } else if address.contains(':') {
            address.split(':').map(str::to_owned).collect()
        } else {
            if address.len() != MAC_OCTETS * 2 {
                return Err(malformed(address, "MAC should have exactly six literals"));
            }

            split_pairs(address)
        };

        if literals.len() != MAC_OCTETS {
            return Err(malformed(address, "MAC should have exactly six literals"));
        }

        let mut octets = [0; MAC_OCTETS];

        for (octet, literal) in octets.iter_mut().zip(literals) {
            if literal.is_empty()
                || literal.len() > 2
                || !literal.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(malformed(address, &format!("invalid literal '{literal}'")));
            }

            *octet = u8::from_str_radix(&literal, 16)
                .map_err(|err| malformed(address, &format!("invalid literal '{literal}', {err}")))?;
        }

        Ok(Self { octets })
    }

    /// Returns the raw octets.
    #[must_use]
    pub const fn octets(&self) -> [u8; MAC_OCTETS] {
        self.octets
    }

    fn joined(
        &self,
        delimiter: &str,
    ) -> String {
        self.octets
            .iter()
            .map(|o| format!("{o:02x}"))
            .collect::<Vec<String>>()
            .join(delimiter)
    }

    /// Returns the MAC address in standard, colon, format with leading zeros.
    #[must_use]
    pub fn standard(&self) -> String {
        self.joined(":")
    }

    /// Returns the MAC address in standard, colon, format without leading zeros.
    #[must_use]
    pub fn no_leading_zeros(&self) -> String {
        self.octets
            .iter()
            .map(|o| format!("{o:x}"))
            .collect::<Vec<String>>()
            .join(":")
    }

    /// Returns the MAC address in hyphen format.
    #[must_use]
    pub fn hyphened(&self) -> String {
        self.joined("-")
    }

    /// Returns the MAC address in dot format (xxxx.yyyy.zzzz).
    #[must_use]
    pub fn dotted(&self) -> String {
        split_pairs(&self.no_delimiter())
            .chunks(2)
            .map(<[String]>::concat)
            .collect::<Vec<String>>()
            .join(".")
    }

    /// Returns the MAC address without any delimiter (xxxxyyyyzzzz).
    #[must_use]
    pub fn no_delimiter(&self) -> String {
        self.joined("")
    }
}

impl FromStr for MacAddress {
    type Err = TgnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for MacAddress {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> FmtResult {
        write!(f, "{}", self.dotted())
    }
}
