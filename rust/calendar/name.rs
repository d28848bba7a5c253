// SPDX-License-Identifier: LicenseRef-Rateslib-Dual
//
// Copyright (c) 2026 Siffrorna Technology Limited
// This code cannot be used or copied externally
//
// Dual-licensed: Free Educational Licence or Paid Commercial Licence (commercial/professional use)
// Source-available, not open source.
//
// See LICENSE and https://rateslib.com/py/en/latest/i_licence.html for details,
// and/or contact info (at) rateslib (dot) com
////////////////////////////////////////////////////////////////////////////////////////////////////

use internment::Intern;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier for a variable, counter, celebration, rank or saint class.
///
/// Names are interned so that equality and hashing are pointer cheap; a calendar definition
/// refers to the same handful of names thousands of times while a year is resolved.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name {
    pub(crate) name: Intern<String>,
}

impl Name {
    /// Constructs a new `Name`. Names are case sensitive, e.g. *"firstSundayOfAdvent"*.
    pub fn new(name: &str) -> Self {
        Name {
            name: Intern::new(name.to_string()),
        }
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &'static str {
        self.name.as_ref().as_str()
    }
}

impl From<&str> for Name {
    fn from(item: &str) -> Self {
        Name::new(item)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_interning() {
        let a = Name::new("easter");
        let b = Name::from("easter");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "easter");
        assert_ne!(a, Name::new("Easter"))
    }

    #[test]
    fn name_json() {
        let a = Name::new("weekOfAdvent");
        let js = serde_json::to_string(&a).unwrap();
        assert_eq!(js, "\"weekOfAdvent\"");
        let b: Name = serde_json::from_str(&js).unwrap();
        assert_eq!(a, b);
    }
}
