//! Decoding of the executable's stdout protocol.
//!
//! A line is a measurement iff it contains the `RESULT` marker. Such a
//! line carries six whitespace-delimited `Key=value` tokens, in any order:
//!
//! ```text
//! RESULT Vector=RLE Benchmark=zipf ConstructionTime=12.3 SpaceBitsPerElement=2.1 \
//!        RandomAccessTimePerElement=5.0 SequentialAccessTimePerElement=1.2
//! ```
//!
//! Decoding is two-phase: a tokenizer folds the `Key=value` tokens into a
//! map, then typed conversion pulls out the six required keys. A missing
//! key and a malformed number are reported as distinct errors naming the
//! token, and the first bad line aborts the run.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::schema::BenchmarkRecord;

/// Marker token identifying a measurement line.
pub const RESULT_MARKER: &str = "RESULT";

pub const KEY_VECTOR: &str = "Vector";
pub const KEY_BENCHMARK: &str = "Benchmark";
pub const KEY_CONSTRUCTION_TIME: &str = "ConstructionTime";
pub const KEY_SPACE: &str = "SpaceBitsPerElement";
pub const KEY_RANDOM_ACCESS: &str = "RandomAccessTimePerElement";
pub const KEY_SEQUENTIAL_ACCESS: &str = "SequentialAccessTimePerElement";

/// Select every measurement line from captured output, preserving order
/// and full line content.
pub fn extract_result_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| line.contains(RESULT_MARKER))
        .collect()
}

/// Fold the whitespace-delimited `Key=value` tokens of a line into a map.
/// On a duplicate key the first occurrence wins.
fn tokenize(line: &str) -> HashMap<&str, &str> {
    let mut tokens = HashMap::new();
    for token in line.split_whitespace() {
        if let Some((key, value)) = token.split_once('=') {
            tokens.entry(key).or_insert(value);
        }
    }
    tokens
}

fn text_value<'a>(
    tokens: &HashMap<&str, &'a str>,
    key: &'static str,
    line: &str,
) -> Result<&'a str, ParseError> {
    tokens.get(key).copied().ok_or_else(|| ParseError::MissingKey {
        key,
        line: line.to_string(),
    })
}

fn numeric_value(
    tokens: &HashMap<&str, &str>,
    key: &'static str,
    line: &str,
) -> Result<f64, ParseError> {
    let value = text_value(tokens, key, line)?;
    value.parse().map_err(|source| ParseError::MalformedNumber {
        key,
        value: value.to_string(),
        source,
    })
}

/// Decode one measurement line into a [`BenchmarkRecord`].
pub fn parse_record(line: &str) -> Result<BenchmarkRecord, ParseError> {
    let tokens = tokenize(line);

    Ok(BenchmarkRecord {
        vector: text_value(&tokens, KEY_VECTOR, line)?.to_string(),
        benchmark: text_value(&tokens, KEY_BENCHMARK, line)?.to_string(),
        construction_time: numeric_value(&tokens, KEY_CONSTRUCTION_TIME, line)?,
        space_bits_per_element: numeric_value(&tokens, KEY_SPACE, line)?,
        random_access_time_per_element: numeric_value(&tokens, KEY_RANDOM_ACCESS, line)?,
        sequential_access_time_per_element: numeric_value(&tokens, KEY_SEQUENTIAL_ACCESS, line)?,
    })
}

/// Decode all measurement lines of one run's captured output, in order.
/// Output without any protocol line yields an empty vec.
pub fn parse_output(text: &str) -> Result<Vec<BenchmarkRecord>, ParseError> {
    extract_result_lines(text)
        .into_iter()
        .map(parse_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "RESULT Vector=RLE Benchmark=zipf ConstructionTime=12.3 \
        SpaceBitsPerElement=2.1 RandomAccessTimePerElement=5.0 \
        SequentialAccessTimePerElement=1.2";

    #[test]
    fn parses_the_canonical_line() {
        let record = parse_record(LINE).unwrap();
        assert_eq!(record.vector, "RLE");
        assert_eq!(record.benchmark, "zipf");
        assert_eq!(record.construction_time, 12.3);
        assert_eq!(record.space_bits_per_element, 2.1);
        assert_eq!(record.random_access_time_per_element, 5.0);
        assert_eq!(record.sequential_access_time_per_element, 1.2);
    }

    #[test]
    fn key_order_does_not_matter() {
        let shuffled = "noise RESULT SequentialAccessTimePerElement=1.2 Vector=RLE \
            RandomAccessTimePerElement=5.0 Benchmark=zipf SpaceBitsPerElement=2.1 \
            ConstructionTime=12.3";
        assert_eq!(parse_record(shuffled).unwrap(), parse_record(LINE).unwrap());
    }

    #[test]
    fn missing_key_is_named() {
        let line = "RESULT Vector=RLE Benchmark=zipf ConstructionTime=12.3 \
            SpaceBitsPerElement=2.1 RandomAccessTimePerElement=5.0";
        match parse_record(line) {
            Err(crate::error::ParseError::MissingKey { key, .. }) => {
                assert_eq!(key, KEY_SEQUENTIAL_ACCESS);
            }
            other => panic!("expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn malformed_number_is_named() {
        let line = LINE.replace("ConstructionTime=12.3", "ConstructionTime=slow");
        match parse_record(&line) {
            Err(crate::error::ParseError::MalformedNumber { key, value, .. }) => {
                assert_eq!(key, KEY_CONSTRUCTION_TIME);
                assert_eq!(value, "slow");
            }
            other => panic!("expected MalformedNumber, got {:?}", other),
        }
    }

    #[test]
    fn non_result_lines_are_ignored() {
        let text = format!("loading input...\n{LINE}\ndone\n");
        let lines = extract_result_lines(&text);
        assert_eq!(lines, [LINE]);
        assert_eq!(parse_output(&text).unwrap().len(), 1);
    }

    #[test]
    fn output_without_protocol_lines_yields_no_records() {
        let records = parse_output("warming up\nall benchmarks passed\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn reparsing_a_serialized_record_is_identity() {
        let original = parse_record(LINE).unwrap();
        let reparsed = parse_record(&original.to_protocol_line()).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn duplicate_keys_take_the_first_occurrence() {
        let line = format!("{LINE} Vector=OTHER");
        assert_eq!(parse_record(&line).unwrap().vector, "RLE");
    }
}
