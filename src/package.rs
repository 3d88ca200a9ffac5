//! Sensor package input format
//!
//! A sensor package is a workout code plus the flat list of readings a
//! tracker sends for one session. Packages arrive either as objects
//! (`{"workout_type": "RUN", "data": [15000, 1, 75]}`) or in the compact
//! tuple form (`["RUN", [15000, 1, 75]]`), one per line (NDJSON) or as a
//! JSON array.

use serde::{Deserialize, Serialize};

use crate::dispatch::read_package;
use crate::error::ComputeError;
use crate::types::Workout;

/// One tracker reading: workout code and ordered numeric parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PackageRepr")]
pub struct SensorPackage {
    /// Workout code (`SWM`, `RUN`, `WLK`)
    pub workout_type: String,
    /// Readings in the order the workout type expects
    pub data: Vec<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PackageRepr {
    Object { workout_type: String, data: Vec<f64> },
    Tuple(String, Vec<f64>),
}

impl From<PackageRepr> for SensorPackage {
    fn from(repr: PackageRepr) -> Self {
        match repr {
            PackageRepr::Object { workout_type, data } | PackageRepr::Tuple(workout_type, data) => {
                Self { workout_type, data }
            }
        }
    }
}

impl SensorPackage {
    pub fn new(workout_type: impl Into<String>, data: impl Into<Vec<f64>>) -> Self {
        Self {
            workout_type: workout_type.into(),
            data: data.into(),
        }
    }

    /// Dispatch this package to its reader
    pub fn to_workout(&self) -> Result<Workout, ComputeError> {
        read_package(&self.workout_type, &self.data)
    }
}

/// The sample session list the calculator ships with
pub fn sample_packages() -> Vec<SensorPackage> {
    vec![
        SensorPackage::new("SWM", [720.0, 1.0, 80.0, 25.0, 40.0]),
        SensorPackage::new("RUN", [15000.0, 1.0, 75.0]),
        SensorPackage::new("WLK", [9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// A package that failed validation, with its position in the batch
#[derive(Debug)]
pub struct PackageValidation {
    pub index: usize,
    pub workout_type: String,
    pub error: ComputeError,
}

/// Parser for sensor package streams
pub struct PackageParser;

impl PackageParser {
    /// Parse a JSON string containing an array of packages
    pub fn parse_array(json: &str) -> Result<Vec<SensorPackage>, ComputeError> {
        let packages: Vec<SensorPackage> = serde_json::from_str(json)?;
        Ok(packages)
    }

    /// Parse NDJSON (newline-delimited JSON) containing packages
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<SensorPackage>, ComputeError> {
        let mut packages = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<SensorPackage>(trimmed) {
                Ok(package) => packages.push(package),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(packages)
    }

    /// Validate packages, returning only the failures
    pub fn validate_packages(packages: &[SensorPackage]) -> Vec<PackageValidation> {
        packages
            .iter()
            .enumerate()
            .filter_map(|(index, package)| {
                package.to_workout().err().map(|error| PackageValidation {
                    index,
                    workout_type: package.workout_type.clone(),
                    error,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_object_and_tuple_forms() {
        let ndjson = r#"
{"workout_type": "RUN", "data": [15000, 1, 75]}

["SWM", [720, 1, 80, 25, 40]]
"#;
        let packages = PackageParser::parse_ndjson(ndjson).unwrap();

        assert_eq!(
            packages,
            vec![
                SensorPackage::new("RUN", [15000.0, 1.0, 75.0]),
                SensorPackage::new("SWM", [720.0, 1.0, 80.0, 25.0, 40.0]),
            ]
        );
    }

    #[test]
    fn test_parse_ndjson_reports_line_number() {
        let ndjson = "[\"RUN\", [15000, 1, 75]]\nnot json\n";
        let err = PackageParser::parse_ndjson(ndjson).unwrap_err();

        match err {
            ComputeError::ParseError(msg) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_array() {
        let json = r#"[["WLK", [9000, 1, 75, 180]], {"workout_type": "RUN", "data": [1, 1, 1]}]"#;
        let packages = PackageParser::parse_array(json).unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].workout_type, "WLK");
        assert_eq!(packages[1].data, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_serializes_as_object() {
        let json = serde_json::to_string(&SensorPackage::new("RUN", [1.0, 2.0, 3.0])).unwrap();
        assert_eq!(json, r#"{"workout_type":"RUN","data":[1.0,2.0,3.0]}"#);
    }

    #[test]
    fn test_sample_packages_are_valid() {
        let packages = sample_packages();
        assert_eq!(packages.len(), 3);
        assert!(PackageParser::validate_packages(&packages).is_empty());
    }

    #[test]
    fn test_validate_packages_lists_failures() {
        let packages = vec![
            SensorPackage::new("RUN", [15000.0, 1.0, 75.0]),
            SensorPackage::new("XYZ", [1.0, 1.0, 1.0]),
            SensorPackage::new("WLK", [9000.0, 0.0, 75.0, 180.0]),
        ];

        let failures = PackageParser::validate_packages(&packages);
        let indices: Vec<usize> = failures.iter().map(|f| f.index).collect();

        assert_eq!(indices, vec![1, 2]);
        assert_eq!(failures[0].workout_type, "XYZ");
        assert!(matches!(
            failures[0].error,
            ComputeError::InvalidWorkoutType(_)
        ));
        assert!(matches!(
            failures[1].error,
            ComputeError::InvalidParameterValue {
                name: "duration_hours",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_packages_empty_for_valid_batch() {
        assert!(PackageParser::validate_packages(&sample_packages()).is_empty());
    }
}
