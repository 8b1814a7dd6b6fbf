//! Type-safe integer identifiers for transit entities.
//!
//! Route and stop ids share the same numeric domain in the source tables, so
//! each gets its own newtype to keep lookups from mixing them up.

use std::fmt;
use std::str::FromStr;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self::new(raw)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

impl_identifier!(RouteId);
impl_identifier!(StopId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_ordering() {
        let mut ids = vec![RouteId::new(131), RouteId::new(-2), RouteId::new(7)];
        ids.sort();
        assert_eq!(ids, vec![RouteId::new(-2), RouteId::new(7), RouteId::new(131)]);
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(StopId::new(500_250), 42);

        assert_eq!(map.get(&StopId::from(500_250)), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(format!("{}", RouteId::new(131)), "131");
    }

    #[test]
    fn test_identifier_parse() {
        assert_eq!(" 42 ".parse::<StopId>().unwrap(), StopId::new(42));
        assert!("4x2".parse::<StopId>().is_err());
    }
}
