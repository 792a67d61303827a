//! Strong type definitions for Volt.
//!
//! All identifiers are newtypes to prevent misuse at compile time: a
//! `RoleId` can never be passed where a `UserId` is expected.
//!
//! Identifiers issued by the platform are ULIDs (26 characters of Crockford
//! base32). [`UserId::parse`] and friends check that shape; [`UserId::new`]
//! accepts anything, which is what decoding from the wire does.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Length of a ULID in its canonical text form.
pub const ULID_LEN: usize = 26;

fn is_crockford(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'A'..=b'H' | b'J' | b'K' | b'M' | b'N' | b'P'..=b'T' | b'V'..=b'Z')
}

fn validate_ulid(kind: &'static str, value: &str) -> Result<()> {
    let invalid = |reason| CoreError::InvalidId {
        kind,
        value: value.to_string(),
        reason,
    };

    if value.len() != ULID_LEN {
        return Err(invalid("expected 26 characters"));
    }
    if !value.bytes().all(is_crockford) {
        return Err(invalid("not Crockford base32"));
    }
    // The first character carries the top bits of a 48-bit timestamp.
    if value.as_bytes()[0] > b'7' {
        return Err(invalid("timestamp overflow"));
    }
    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier without validating it.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse an identifier, checking that it is a well-formed ULID.
            pub fn parse(id: &str) -> Result<Self> {
                validate_ulid($kind, id)?;
                Ok(Self(id.to_string()))
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a user (or bot) account.
    UserId,
    "user"
);

string_id!(
    /// Identifier of a server.
    ServerId,
    "server"
);

string_id!(
    /// Identifier of a channel of any kind.
    ChannelId,
    "channel"
);

string_id!(
    /// Identifier of a role within a server.
    ///
    /// Role ids are only unique within their server. Ordering is byte-wise,
    /// which is what the resolver uses to break rank ties.
    RoleId,
    "role"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_ulid() {
        let id = UserId::parse("01FD58YK5W7QRV5H3D64KTQYX3").unwrap();
        assert_eq!(id.as_str(), "01FD58YK5W7QRV5H3D64KTQYX3");
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        let err = ServerId::parse("01FD58").unwrap_err();
        assert!(matches!(err, CoreError::InvalidId { kind: "server", .. }));
    }

    #[test]
    fn test_parse_rejects_excluded_letters() {
        // I, L, O and U are not part of Crockford base32.
        assert!(RoleId::parse("01FD58YK5W7QRV5H3D64KTQYXU").is_err());
        assert!(RoleId::parse("01FD58YK5W7QRV5H3D64KTQYXO").is_err());
    }

    #[test]
    fn test_parse_rejects_timestamp_overflow() {
        assert!(ChannelId::parse("81FD58YK5W7QRV5H3D64KTQYX3").is_err());
    }

    #[test]
    fn test_debug_and_display() {
        let id = RoleId::new("01FD58YK5W7QRV5H3D64KTQYX3");
        assert_eq!(format!("{}", id), "01FD58YK5W7QRV5H3D64KTQYX3");
        assert_eq!(format!("{:?}", id), "RoleId(01FD58YK5W7QRV5H3D64KTQYX3)");
    }

    #[test]
    fn test_role_id_ordering_is_bytewise() {
        let a = RoleId::new("01A");
        let b = RoleId::new("01B");
        assert!(a < b);
    }
}
