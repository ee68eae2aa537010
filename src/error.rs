use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("unsupported projection '{0}'")]
    UnsupportedProjection(String),

    #[error(
        "invalid bound: lat {min_lat}..{max_lat}, long {min_long}..{max_long} \
         (need finite values with min < max)"
    )]
    InvalidBound {
        min_lat: f64,
        max_lat: f64,
        min_long: f64,
        max_long: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let e = ProjectionError::UnsupportedProjection("robinson".into());
        assert_eq!(e.to_string(), "unsupported projection 'robinson'");

        let e = ProjectionError::InvalidBound {
            min_lat: 10.0,
            max_lat: -10.0,
            min_long: -180.0,
            max_long: 180.0,
        };
        assert!(e.to_string().contains("lat 10..-10"));
    }
}
