//! Bucketized likelihood values.

use serde::{Deserialize, Deserializer};

/// Coarse confidence bucket used for face and safe-search attributes.
///
/// Bucketized rather than a raw probability so results stay stable across
/// model upgrades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Likelihood {
    #[default]
    Unknown,
    VeryUnlikely,
    Unlikely,
    Possible,
    Likely,
    VeryLikely,
}

impl Likelihood {
    /// Map a wire string to a bucket. Unknown strings are absorbed as
    /// [`Likelihood::Unknown`] with a warning; this never fails.
    pub fn from_name(name: &str) -> Self {
        match name {
            "UNKNOWN" => Self::Unknown,
            "VERY_UNLIKELY" => Self::VeryUnlikely,
            "UNLIKELY" => Self::Unlikely,
            "POSSIBLE" => Self::Possible,
            "LIKELY" => Self::Likely,
            "VERY_LIKELY" => Self::VeryLikely,
            other => {
                tracing::warn!("Unknown likelihood: {}", other);
                Self::Unknown
            }
        }
    }

    /// The wire name of this bucket.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::VeryUnlikely => "VERY_UNLIKELY",
            Self::Unlikely => "UNLIKELY",
            Self::Possible => "POSSIBLE",
            Self::Likely => "LIKELY",
            Self::VeryLikely => "VERY_LIKELY",
        }
    }

    /// Normalized value of this bucket, in [0, 1].
    pub fn value(&self) -> f32 {
        match self {
            Self::Unknown | Self::VeryUnlikely => 0.0,
            Self::Unlikely => 0.25,
            Self::Possible => 0.5,
            Self::Likely => 0.75,
            Self::VeryLikely => 1.0,
        }
    }
}

impl<'de> Deserialize<'de> for Likelihood {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Likelihood::from_name(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_mapping() {
        assert_eq!(Likelihood::from_name("UNKNOWN").value(), 0.0);
        assert_eq!(Likelihood::from_name("VERY_UNLIKELY").value(), 0.0);
        assert_eq!(Likelihood::from_name("UNLIKELY").value(), 0.25);
        assert_eq!(Likelihood::from_name("POSSIBLE").value(), 0.5);
        assert_eq!(Likelihood::from_name("LIKELY").value(), 0.75);
        assert_eq!(Likelihood::from_name("VERY_LIKELY").value(), 1.0);
    }

    #[test]
    fn test_unknown_string_maps_to_unknown() {
        let likelihood = Likelihood::from_name("bogus");
        assert_eq!(likelihood, Likelihood::Unknown);
        assert_eq!(likelihood.value(), 0.0);
    }

    #[test]
    fn test_name_round_trip() {
        for likelihood in [
            Likelihood::Unknown,
            Likelihood::VeryUnlikely,
            Likelihood::Unlikely,
            Likelihood::Possible,
            Likelihood::Likely,
            Likelihood::VeryLikely,
        ] {
            assert_eq!(Likelihood::from_name(likelihood.name()), likelihood);
        }
    }

    #[test]
    fn test_deserialize_from_wire_string() {
        let likelihood: Likelihood = serde_json::from_str("\"LIKELY\"").unwrap();
        assert_eq!(likelihood, Likelihood::Likely);

        let fallback: Likelihood = serde_json::from_str("\"NOT_A_BUCKET\"").unwrap();
        assert_eq!(fallback, Likelihood::Unknown);
    }
}
