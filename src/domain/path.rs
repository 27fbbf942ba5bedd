//! Validated taxonomic paths.

use std::fmt;

use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::rank::Rank;

/// Ordered names from Class down to Species, one per [`Rank`].
///
/// Construction guarantees exactly [`Rank::LEVELS`] non-empty, trimmed segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonPath {
    segments: [String; Rank::LEVELS],
}

impl TaxonPath {
    /// Build a path from any sequence of names.
    ///
    /// Fails with [`DomainError::Validation`] when the number of segments is not
    /// [`Rank::LEVELS`] or when a segment is empty after trimming.
    pub fn new<I, S>(segments: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .collect();

        if segments.len() != Rank::LEVELS {
            return Err(DomainError::Validation(format!(
                "a taxonomic path needs exactly {} names ({}), got {}",
                Rank::LEVELS,
                Rank::ALL.iter().join(", "),
                segments.len()
            )));
        }
        if let Some(pos) = segments.iter().position(|s| s.is_empty()) {
            return Err(DomainError::Validation(format!(
                "{} name cannot be empty",
                Rank::ALL[pos]
            )));
        }

        let segments: [String; Rank::LEVELS] = segments
            .try_into()
            .map_err(|_| DomainError::Validation("malformed taxonomic path".to_string()))?;
        Ok(Self { segments })
    }

    pub fn segment(&self, rank: Rank) -> &str {
        &self.segments[rank.depth()]
    }

    pub fn class(&self) -> &str {
        self.segment(Rank::Class)
    }

    pub fn species(&self) -> &str {
        self.segment(Rank::Species)
    }

    /// Segments paired with their rank, root first.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, &str)> {
        Rank::ALL
            .iter()
            .copied()
            .zip(self.segments.iter().map(String::as_str))
    }
}

impl fmt::Display for TaxonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join(" > "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_five_names_when_building_then_trims_and_keeps_order() {
        let path = TaxonPath::new([" Mammalia", "Carnivora ", "Felidae", "Panthera", "leo"]).unwrap();
        assert_eq!(path.class(), "Mammalia");
        assert_eq!(path.segment(Rank::Order), "Carnivora");
        assert_eq!(path.species(), "leo");
        assert_eq!(path.to_string(), "Mammalia > Carnivora > Felidae > Panthera > leo");
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec!["Mammalia", "Carnivora", "Felidae", "Panthera"])]
    #[case(vec!["Mammalia", "Carnivora", "Felidae", "Panthera", "leo", "persica"])]
    fn given_wrong_length_when_building_then_validation_error(#[case] segments: Vec<&str>) {
        let err = TaxonPath::new(segments).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn given_blank_segment_when_building_then_names_the_rank() {
        let err = TaxonPath::new(["Mammalia", "Carnivora", "  ", "Panthera", "leo"]).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("Family name cannot be empty".to_string())
        );
    }
}
