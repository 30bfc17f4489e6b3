//! Encoding a group into distance-matrix query parameters.

use std::fmt;

use crate::grouper::Group;
use crate::keys::ApiKey;

/// Travel modes accepted by the distance-matrix API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TravelMode {
    #[default]
    Walking,
    Driving,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for one distance-matrix call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRequest {
    pub origins: String,
    pub destinations: String,
    pub mode: TravelMode,
    pub key: ApiKey,
}

impl MatrixRequest {
    /// Parameters in the order the API documents them.
    pub fn query_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("units", "imperial"),
            ("origins", self.origins.as_str()),
            ("destinations", self.destinations.as_str()),
            ("mode", self.mode.as_str()),
            ("key", self.key.as_str()),
        ]
    }
}

/// Joins identifiers with `|`, removing all whitespace inside each one.
pub fn join_locations(locations: &[String]) -> String {
    locations
        .iter()
        .map(|l| l.split_whitespace().collect::<String>())
        .collect::<Vec<_>>()
        .join("|")
}

/// Builds the request for `group`. Pure in its inputs.
pub fn encode_request(group: &Group, mode: TravelMode, key: &ApiKey) -> MatrixRequest {
    MatrixRequest {
        origins: join_locations(&group.origins),
        destinations: join_locations(&group.destinations),
        mode,
        key: key.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group {
            origins: vec!["SW1A 1AA".into(), "51.5, -0.12".into()],
            destinations: vec!["EC1A 1BB".into()],
        }
    }

    #[test]
    fn test_join_strips_internal_whitespace() {
        let joined = join_locations(&[
            "SW1A 1AA".to_string(),
            "N1  9GU".to_string(),
            "E1\t6AN".to_string(),
        ]);
        assert_eq!(joined, "SW1A1AA|N19GU|E16AN");
    }

    #[test]
    fn test_encode_request() {
        let key = ApiKey::new("k").unwrap();
        let req = encode_request(&group(), TravelMode::Transit, &key);

        assert_eq!(req.origins, "SW1A1AA|51.5,-0.12");
        assert_eq!(req.destinations, "EC1A1BB");
        assert_eq!(
            req.query_pairs(),
            [
                ("units", "imperial"),
                ("origins", "SW1A1AA|51.5,-0.12"),
                ("destinations", "EC1A1BB"),
                ("mode", "transit"),
                ("key", "k"),
            ]
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let key = ApiKey::new("k").unwrap();
        assert_eq!(
            encode_request(&group(), TravelMode::Walking, &key),
            encode_request(&group(), TravelMode::Walking, &key)
        );
    }

    #[test]
    fn test_mode_display_matches_cli_value() {
        use clap::ValueEnum;

        for mode in TravelMode::value_variants() {
            assert_eq!(TravelMode::from_str(&mode.to_string(), false).unwrap(), *mode);
        }
        assert!(TravelMode::from_str("flying", false).is_err());
    }
}
