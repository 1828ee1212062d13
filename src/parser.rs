//! Decoder for the pathfinding executable's textual output.
//!
//! Two output grammars exist in the wild and both are valid. The
//! single-path form:
//!
//! ```text
//! Path: A -> B -> C
//! Distance: 5.2 km
//! Total Time: 9.1 minutes
//! ```
//!
//! and the multi-path form used when several optimal routes tie:
//!
//! ```text
//! Fastest evacuation time: 9.1 minutes
//! Shortest distance: 5.2 km
//! All optimal paths:
//! A -> B -> C
//! A -> D -> C
//! ```
//!
//! Either form may carry a `Nearest Hospital:` line. Label matching is
//! ASCII-case-insensitive and whitespace-tolerant; unmatched lines are
//! ignored. A failed route is signalled by a sentinel substring, not a
//! status code, and when present nothing else in the output is trusted.

use serde::Serialize;

/// Substrings the backend emits when no route exists.
pub const NO_PATH_SENTINELS: [&str; 2] = ["No valid path found.", "No hospital path found."];

/// Structured form of one backend response.
///
/// Numeric fields default to 0 when absent or unparsable; the raw text is
/// shown alongside in the UI, so silent defaulting is the documented
/// policy rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvacuationResult {
    /// One entry per reported path; several when the backend lists tied
    /// optima, in listed order.
    pub paths: Vec<Vec<String>>,
    /// Aggregate route distance in kilometers.
    pub distance_km: f64,
    /// Aggregate evacuation time in minutes.
    pub time_minutes: f64,
    /// Nearest hospital id, verbatim (trimmed) from the backend.
    pub hospital: Option<String>,
    /// No-path condition. When set, no other field is meaningful.
    pub error: Option<String>,
}

impl EvacuationResult {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Decodes the backend's raw stdout into an [`EvacuationResult`].
pub fn parse_output(output: &str) -> EvacuationResult {
    let mut result = EvacuationResult::default();

    if NO_PATH_SENTINELS.iter().any(|s| output.contains(s)) {
        result.error = Some("No valid path found.".to_string());
        return result;
    }

    let lines: Vec<&str> = output.lines().collect();
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index].trim();

        if let Some(value) = labeled_value(line, "fastest evacuation time") {
            if let Some(minutes) = parse_unit_float(value, "minutes") {
                result.time_minutes = minutes;
            }
        } else if let Some(value) = labeled_value(line, "total time") {
            if let Some(minutes) = parse_unit_float(value, "minutes") {
                result.time_minutes = minutes;
            }
        } else if let Some(value) = labeled_value(line, "shortest distance") {
            if let Some(km) = parse_unit_float(value, "km") {
                result.distance_km = km;
            }
        } else if let Some(value) = labeled_value(line, "nearest hospital") {
            if !value.is_empty() {
                result.hospital = Some(value.to_string());
            }
        } else if labeled_value(line, "all optimal paths").is_some() {
            // Variable-length block: one `->` path per line until blank.
            let mut paths = Vec::new();
            index += 1;
            while index < lines.len() {
                let path_line = lines[index].trim();
                if path_line.is_empty() {
                    break;
                }
                paths.push(split_path(path_line));
                index += 1;
            }
            if !paths.is_empty() {
                result.paths = paths;
            }
            continue;
        } else if let Some(value) = labeled_value(line, "path") {
            if !value.is_empty() {
                result.paths = vec![split_path(value)];
            }
        } else if let Some(value) = labeled_value(line, "distance") {
            if let Some(km) = parse_unit_float(value, "km") {
                result.distance_km = km;
            }
        }

        index += 1;
    }

    result
}

/// Matches `<label> : <value>` with ASCII-case-insensitive label and
/// arbitrary whitespace around the colon; returns the trimmed value.
fn labeled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let rest = strip_prefix_ignore_ascii_case(line, label)?;
    let rest = rest.trim_start().strip_prefix(':')?;
    Some(rest.trim())
}

fn strip_prefix_ignore_ascii_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let n = prefix.len();
    if line.len() >= n && line.as_bytes()[..n].eq_ignore_ascii_case(prefix.as_bytes()) {
        Some(&line[n..])
    } else {
        None
    }
}

fn strip_suffix_ignore_ascii_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let n = suffix.len();
    if value.len() >= n && value.as_bytes()[value.len() - n..].eq_ignore_ascii_case(suffix.as_bytes())
    {
        Some(&value[..value.len() - n])
    } else {
        None
    }
}

/// Parses a float with an optional trailing unit token. Malformed numbers
/// yield `None` and the caller keeps the zero default.
fn parse_unit_float(value: &str, unit: &str) -> Option<f64> {
    let trimmed = value.trim();
    let trimmed = strip_suffix_ignore_ascii_case(trimmed, unit)
        .map(str::trim_end)
        .unwrap_or(trimmed);
    trimmed.parse().ok()
}

fn split_path(value: &str) -> Vec<String> {
    value
        .split("->")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_path_round_trip() {
        let output = "Path: A -> B -> C\nDistance: 5.2 km\nTotal Time: 9.1 minutes";
        let result = parse_output(output);
        assert_eq!(result.paths, vec![vec!["A", "B", "C"]]);
        assert_eq!(result.distance_km, 5.2);
        assert_eq!(result.time_minutes, 9.1);
        assert_eq!(result.hospital, None);
        assert_eq!(result.error, None);
    }

    #[test]
    fn no_path_sentinel_invalidates_everything() {
        let output = "Path: \nNo valid path found.\n";
        let result = parse_output(output);
        assert!(result.is_error());
        assert!(result.paths.is_empty());
        assert_eq!(result.distance_km, 0.0);
        assert_eq!(result.time_minutes, 0.0);
        assert_eq!(result.hospital, None);
    }

    #[test]
    fn hospital_sentinel_also_sets_error() {
        let result = parse_output("Path: \nNo hospital path found.\n");
        assert!(result.is_error());
    }

    #[test]
    fn multi_path_block_keeps_listed_order() {
        let output = "\
Fastest evacuation time: 12.5 minutes
Shortest distance: 8.3 km
All optimal paths:
A -> B -> C
A -> D -> C
";
        let result = parse_output(output);
        assert_eq!(
            result.paths,
            vec![vec!["A", "B", "C"], vec!["A", "D", "C"]]
        );
        assert_eq!(result.time_minutes, 12.5);
        assert_eq!(result.distance_km, 8.3);
    }

    #[test]
    fn multi_path_block_ends_at_blank_line() {
        let output = "All optimal paths:\nA -> B\n\nC -> D\n";
        let result = parse_output(output);
        assert_eq!(result.paths, vec![vec!["A", "B"]]);
    }

    #[test]
    fn nearest_hospital_is_verbatim_trimmed() {
        let output = "Nearest Hospital:   St. Mary's General  \nPath: A -> B";
        let result = parse_output(output);
        assert_eq!(result.hospital.as_deref(), Some("St. Mary's General"));
        assert_eq!(result.paths, vec![vec!["A", "B"]]);
    }

    #[test]
    fn labels_match_case_insensitively() {
        let output = "PATH: A -> B\nDISTANCE: 3 KM\nTOTAL TIME: 4 MINUTES";
        let result = parse_output(output);
        assert_eq!(result.paths, vec![vec!["A", "B"]]);
        assert_eq!(result.distance_km, 3.0);
        assert_eq!(result.time_minutes, 4.0);
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let output = "  Path :  A  ->  B  \n  Distance :  2.5  km  ";
        let result = parse_output(output);
        assert_eq!(result.paths, vec![vec!["A", "B"]]);
        assert_eq!(result.distance_km, 2.5);
    }

    #[test]
    fn unit_token_is_optional() {
        // The direct-route backend prints bare numbers.
        let result = parse_output("Path: A -> B\nDistance: 5.2\nTotal Time: 9.1");
        assert_eq!(result.distance_km, 5.2);
        assert_eq!(result.time_minutes, 9.1);
    }

    #[test]
    fn malformed_numbers_keep_zero_defaults() {
        let output = "Path: A -> B\nDistance: lots km\nTotal Time: soon minutes";
        let result = parse_output(output);
        assert_eq!(result.paths, vec![vec!["A", "B"]]);
        assert_eq!(result.distance_km, 0.0);
        assert_eq!(result.time_minutes, 0.0);
        assert!(!result.is_error());
    }

    #[test]
    fn empty_output_yields_defaults() {
        let result = parse_output("");
        assert_eq!(result, EvacuationResult::default());
    }

    #[test]
    fn unmatched_lines_are_ignored() {
        let output = "Computing...\nPath: A -> B\nDone in 3ms";
        let result = parse_output(output);
        assert_eq!(result.paths, vec![vec!["A", "B"]]);
    }

    #[test]
    fn empty_path_value_contributes_no_path() {
        let result = parse_output("Path: \nDistance: 1.0 km");
        assert!(result.paths.is_empty());
        assert_eq!(result.distance_km, 1.0);
    }

    #[test]
    fn later_multi_path_block_replaces_single_path() {
        let output = "Path: A -> B\nAll optimal paths:\nC -> D\nE -> F\n";
        let result = parse_output(output);
        assert_eq!(result.paths, vec![vec!["C", "D"], vec!["E", "F"]]);
    }

    #[test]
    fn single_node_path_line_in_block() {
        let result = parse_output("All optimal paths:\nA\n");
        assert_eq!(result.paths, vec![vec!["A"]]);
    }

    #[test]
    fn nearest_hospital_mode_full_output() {
        let output = "\
Nearest Hospital: Clinic
Path: A -> B -> Clinic
Distance: 4.7
Total Time: 11.2 minutes
";
        let result = parse_output(output);
        assert_eq!(result.hospital.as_deref(), Some("Clinic"));
        assert_eq!(result.paths, vec![vec!["A", "B", "Clinic"]]);
        assert_eq!(result.distance_km, 4.7);
        assert_eq!(result.time_minutes, 11.2);
    }
}
