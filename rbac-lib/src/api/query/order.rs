//! Ordering types for list queries.

use std::str::FromStr;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the wire form (`asc` / `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("invalid sort direction '{}'", other)),
        }
    }
}

/// A single `(column, direction)` ordering.
///
/// # Example
///
/// ```
/// use rbac_lib::api::query::{Direction, SortKey};
///
/// let key = SortKey::desc("created_at");
/// assert_eq!(key.direction, Direction::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey {
    /// Key of the column being sorted.
    pub column: String,
    /// Sort direction.
    pub direction: Direction,
}

impl SortKey {
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Creates an ascending order on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Asc)
    }

    /// Creates a descending order on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Desc)
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Parses `column` or `column:direction`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((column, dir)) if !column.is_empty() => Ok(Self::new(column, dir.parse()?)),
            Some(_) => Err(format!("invalid sort key '{}'", s)),
            None if !s.is_empty() => Ok(Self::asc(s)),
            None => Err("empty sort key".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!("ASC".parse::<Direction>(), Ok(Direction::Asc));
        assert_eq!("desc".parse::<Direction>(), Ok(Direction::Desc));
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("name".parse::<SortKey>(), Ok(SortKey::asc("name")));
        assert_eq!("email:desc".parse::<SortKey>(), Ok(SortKey::desc("email")));
        assert!(":desc".parse::<SortKey>().is_err());
        assert!("".parse::<SortKey>().is_err());
    }
}
