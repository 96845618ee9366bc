/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::Error;

/// A hierarchical numeric path identifying a manageable value on a
/// network device. Ordering follows the lexicographic order of the
/// sub-identifier sequence, matching the order in which an agent
/// returns rows.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
#[serde(transparent)]
pub struct Oid(Vec<u32>);

impl Oid {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the given oid lies within the subtree rooted at self.
    pub fn contains(&self, other: &Oid) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    /// The path with one more sub-identifier appended.
    pub fn child(&self, sub: u32) -> Oid {
        let mut parts = self.0.clone();
        parts.push(sub);
        Oid(parts)
    }

    /// The path with the final sub-identifier removed.
    pub fn parent(&self) -> Option<Oid> {
        match self.0.split_last() {
            Some((_, parts)) => Some(Oid(parts.to_vec())),
            None => None,
        }
    }

    /// The final sub-identifier; the row index for table columns.
    pub fn last(&self) -> Option<u32> {
        self.0.last().copied()
    }
}

impl From<&[u32]> for Oid {
    fn from(parts: &[u32]) -> Self {
        Self(parts.to_vec())
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.0.iter();
        if let Some(part) = parts.next() {
            write!(f, "{}", part)?;
        }
        for part in parts {
            write!(f, ".{}", part)?;
        }
        Ok(())
    }
}

impl FromStr for Oid {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        s.trim_start_matches('.')
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<u32>, _>>()
            .map(Oid)
            .map_err(|_| Error::InvalidOid(s.to_string()))
    }
}

#[cfg(test)]
mod tests {

    use super::Oid;

    #[test]
    fn parse_and_display() {
        let oid: Oid = "1.3.6.1.2.1".parse().unwrap();
        assert_eq!(oid.to_string(), "1.3.6.1.2.1");
        let dotted: Oid = ".1.3.6".parse().unwrap();
        assert_eq!(dotted.to_string(), "1.3.6");
        assert!("1.3.x".parse::<Oid>().is_err());
        assert!("".parse::<Oid>().is_err());
    }

    #[test]
    fn subtree_membership() {
        let table: Oid = "1.3.6.1.4.1".parse().unwrap();
        let row: Oid = "1.3.6.1.4.1.7".parse().unwrap();
        let other: Oid = "1.3.6.1.5.1.7".parse().unwrap();
        assert!(table.contains(&row));
        assert!(table.contains(&table));
        assert!(!table.contains(&other));
        assert!(!row.contains(&table));
    }

    #[test]
    fn parent_and_last() {
        let row: Oid = "1.3.6.9.42".parse().unwrap();
        assert_eq!(row.last(), Some(42));
        assert_eq!(row.parent().unwrap().to_string(), "1.3.6.9");
        assert_eq!(Oid::from(&[][..]).parent(), None);
    }

    #[test]
    fn child_appends() {
        let table = Oid::from(&[1, 3, 6][..]);
        assert_eq!(table.child(19).to_string(), "1.3.6.19");
    }
}
