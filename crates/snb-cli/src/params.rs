//! Substitution parameter files.
//!
//! A parameter file has one header line followed by one `|`-separated
//! line per invocation, e.g. for complex query 3:
//!
//! ```text
//! personId|startDate|durationDays|countryXName|countryYName
//! 4398046511333|1306886400000|28|Germany|France
//! ```
//!
//! Dates may be epoch milliseconds, `YYYY-MM-DD` or RFC 3339.

use crate::error::CliError;
use snb_core::time::parse_timestamp;
use snb_queries::Operation;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

/// Reads every data line of `path` as an invocation of complex `query`.
///
/// Lines that do not parse are logged and skipped.
pub fn read_operations(
    path: &Path,
    query: u8,
    limit: Option<usize>,
) -> Result<Vec<Operation>, CliError> {
    if !(1..=14).contains(&query) {
        return Err(CliError::UnknownQuery {
            kind: "complex",
            number: query,
        });
    }
    if !path.exists() {
        return Err(CliError::MissingFile(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    let mut operations = Vec::new();
    for (number, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(query, line, limit) {
            Ok(op) => operations.push(op),
            Err(reason) => {
                warn!(path = %path.display(), line = number + 1, %reason, "skipping parameter line");
            }
        }
    }
    Ok(operations)
}

/// Splits a data line into its fields.
struct Fields<'a> {
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str, expected: usize) -> Result<Self, String> {
        let parts: Vec<&str> = line.trim().split('|').map(str::trim).collect();
        if parts.len() != expected {
            return Err(format!("expected {} fields, found {}", expected, parts.len()));
        }
        Ok(Self { parts })
    }

    fn number<T: FromStr>(&self, index: usize) -> Result<T, String> {
        self.parts[index]
            .parse()
            .map_err(|_| format!("field {}: not a number: {:?}", index + 1, self.parts[index]))
    }

    fn date(&self, index: usize) -> Result<i64, String> {
        parse_timestamp(self.parts[index])
            .ok_or_else(|| format!("field {}: not a date: {:?}", index + 1, self.parts[index]))
    }

    fn text(&self, index: usize) -> String {
        self.parts[index].to_string()
    }
}

/// Parses one data line of a complex query parameter file.
pub fn parse_line(query: u8, line: &str, limit: Option<usize>) -> Result<Operation, String> {
    let op = match query {
        1 => {
            let f = Fields::new(line, 2)?;
            Operation::Complex1 {
                person_id: f.number(0)?,
                first_name: f.text(1),
                limit,
            }
        }
        2 => {
            let f = Fields::new(line, 2)?;
            Operation::Complex2 {
                person_id: f.number(0)?,
                max_date: f.date(1)?,
                limit,
            }
        }
        3 => {
            let f = Fields::new(line, 5)?;
            Operation::Complex3 {
                person_id: f.number(0)?,
                start_date: f.date(1)?,
                duration_days: f.number(2)?,
                country_x: f.text(3),
                country_y: f.text(4),
                limit,
            }
        }
        4 => {
            let f = Fields::new(line, 3)?;
            Operation::Complex4 {
                person_id: f.number(0)?,
                start_date: f.date(1)?,
                duration_days: f.number(2)?,
                limit,
            }
        }
        5 => {
            let f = Fields::new(line, 2)?;
            Operation::Complex5 {
                person_id: f.number(0)?,
                min_date: f.date(1)?,
                limit,
            }
        }
        6 => {
            let f = Fields::new(line, 2)?;
            Operation::Complex6 {
                person_id: f.number(0)?,
                tag_name: f.text(1),
                limit,
            }
        }
        7 => Operation::Complex7 {
            person_id: Fields::new(line, 1)?.number(0)?,
            limit,
        },
        8 => Operation::Complex8 {
            person_id: Fields::new(line, 1)?.number(0)?,
            limit,
        },
        9 => {
            let f = Fields::new(line, 2)?;
            Operation::Complex9 {
                person_id: f.number(0)?,
                max_date: f.date(1)?,
                limit,
            }
        }
        10 => {
            let f = Fields::new(line, 2)?;
            let month: u32 = f.number(1)?;
            if !(1..=12).contains(&month) {
                return Err(format!("month out of range: {}", month));
            }
            Operation::Complex10 {
                person_id: f.number(0)?,
                month,
                limit,
            }
        }
        11 => {
            let f = Fields::new(line, 3)?;
            Operation::Complex11 {
                person_id: f.number(0)?,
                country_name: f.text(1),
                work_from_year: f.number(2)?,
                limit,
            }
        }
        12 => {
            let f = Fields::new(line, 2)?;
            Operation::Complex12 {
                person_id: f.number(0)?,
                tag_class_name: f.text(1),
                limit,
            }
        }
        13 => {
            let f = Fields::new(line, 2)?;
            Operation::Complex13 {
                person1_id: f.number(0)?,
                person2_id: f.number(1)?,
            }
        }
        14 => {
            let f = Fields::new(line, 2)?;
            Operation::Complex14 {
                person1_id: f.number(0)?,
                person2_id: f.number(1)?,
            }
        }
        other => return Err(format!("unknown complex query {}", other)),
    };
    Ok(op)
}

/// Builds short query `query` for an anchor id.
pub fn short_operation(query: u8, id: i64, limit: Option<usize>) -> Result<Operation, CliError> {
    let op = match query {
        1 => Operation::Short1 { person_id: id },
        2 => Operation::Short2 {
            person_id: id,
            limit,
        },
        3 => Operation::Short3 { person_id: id },
        4 => Operation::Short4 { message_id: id },
        5 => Operation::Short5 { message_id: id },
        6 => Operation::Short6 { message_id: id },
        7 => Operation::Short7 { message_id: id },
        number => {
            return Err(CliError::UnknownQuery {
                kind: "short",
                number,
            })
        }
    };
    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_query3_line() {
        let op = parse_line(3, "42|2011-06-01|28|Germany|France", Some(5)).unwrap();
        assert_eq!(
            op,
            Operation::Complex3 {
                person_id: 42,
                country_x: "Germany".to_string(),
                country_y: "France".to_string(),
                start_date: 1_306_886_400_000,
                duration_days: 28,
                limit: Some(5),
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert!(parse_line(1, "42", None).is_err());
        assert!(parse_line(2, "42|yesterday", None).is_err());
        assert!(parse_line(10, "42|13", None).is_err());
        assert!(parse_line(13, "x|1", None).is_err());
    }

    #[test]
    fn test_read_skips_header_and_bad_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("q13.txt");
        fs::write(&path, "person1Id|person2Id\n1|6\nbroken\n\n2|3\n").unwrap();

        let ops = read_operations(&path, 13, None).unwrap();
        assert_eq!(
            ops,
            vec![
                Operation::Complex13 {
                    person1_id: 1,
                    person2_id: 6
                },
                Operation::Complex13 {
                    person1_id: 2,
                    person2_id: 3
                },
            ]
        );
    }

    #[test]
    fn test_missing_parameter_file() {
        let dir = tempdir().unwrap();
        let result = read_operations(&dir.path().join("absent.txt"), 1, None);
        assert!(matches!(result, Err(CliError::MissingFile(_))));
    }

    #[test]
    fn test_unknown_queries() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_operations(dir.path(), 15, None),
            Err(CliError::UnknownQuery { number: 15, .. })
        ));
        assert!(short_operation(8, 1, None).is_err());
        assert_eq!(
            short_operation(4, 501, None).unwrap(),
            Operation::Short4 { message_id: 501 }
        );
    }
}
