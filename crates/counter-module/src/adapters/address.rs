use crate::domain::{AddressError, CanonicalAddress};
use crate::ports::AddressCodec;

/// Prefixed hex addresses, e.g. `0x` followed by 20 bytes of hex.
///
/// Decoding accepts either letter case; encoding always emits lowercase,
/// so two spellings of the same address share one canonical key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexAddressCodec {
    prefix: String,
    length: usize,
}

impl Default for HexAddressCodec {
    fn default() -> Self {
        Self::new("0x", 20)
    }
}

impl HexAddressCodec {
    pub fn new(prefix: impl Into<String>, length: usize) -> Self {
        Self {
            prefix: prefix.into(),
            length,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Address length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl AddressCodec for HexAddressCodec {
    fn string_to_bytes(&self, text: &str) -> Result<CanonicalAddress, AddressError> {
        if text.trim().is_empty() {
            return Err(AddressError::Empty);
        }

        let digits = text
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| AddressError::MissingPrefix {
                expected: self.prefix.clone(),
            })?;

        let bytes = hex::decode(digits).map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
        if bytes.len() != self.length {
            return Err(AddressError::InvalidLength {
                expected: self.length,
                actual: bytes.len(),
            });
        }

        Ok(CanonicalAddress::new(bytes))
    }

    fn bytes_to_string(&self, bytes: &[u8]) -> Result<String, AddressError> {
        if bytes.len() != self.length {
            return Err(AddressError::InvalidLength {
                expected: self.length,
                actual: bytes.len(),
            });
        }
        Ok(format!("{}{}", self.prefix, hex::encode(bytes)))
    }
}
