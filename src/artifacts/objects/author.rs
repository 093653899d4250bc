//! Author and committer signatures
//!
//! Commit metadata stores identities as `Name <email> <epoch-seconds> <±hhmm>`.

use crate::errors::{OdbError, OdbResult};
use chrono::{DateTime, FixedOffset};

/// Author or committer information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a new author with the current timestamp
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    /// Create a new author with a specific timestamp
    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load author information from environment variables
    ///
    /// Reads GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL, and optionally GIT_AUTHOR_DATE.
    /// The date may be RFC 2822, `%Y-%m-%d %H:%M:%S %z`, or the raw
    /// `<epoch> <±hhmm>` form. If no date is provided, uses current time.
    pub fn load_from_env() -> OdbResult<Self> {
        let name = std::env::var("GIT_AUTHOR_NAME")
            .map_err(|_| OdbError::format("GIT_AUTHOR_NAME not set"))?;
        let email = std::env::var("GIT_AUTHOR_EMAIL")
            .map_err(|_| OdbError::format("GIT_AUTHOR_EMAIL not set"))?;

        match std::env::var("GIT_AUTHOR_DATE").ok() {
            Some(date) => {
                let timestamp = parse_date(&date)?;
                Ok(Author::new_with_timestamp(name, email, timestamp))
            }
            None => Ok(Author::new(name, email)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format author name and email as "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Format timestamp like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }
}

impl TryFrom<&str> for Author {
    type Error = OdbError;

    fn try_from(value: &str) -> OdbResult<Self> {
        // Split from right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(OdbError::format(format!("invalid signature {value:?}")));
        }

        let timestamp = parse_raw_date(parts[1], parts[0])?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| OdbError::format(format!("signature missing '<': {value:?}")))?;
        let email_end = name_email_part
            .rfind('>')
            .filter(|end| *end > email_start)
            .ok_or_else(|| OdbError::format(format!("signature missing '>': {value:?}")))?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

fn parse_date(date: &str) -> OdbResult<DateTime<FixedOffset>> {
    if let Some((seconds, offset)) = date.split_once(' ')
        && let Ok(timestamp) = parse_raw_date(seconds, offset)
    {
        return Ok(timestamp);
    }

    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .map_err(|_| OdbError::format(format!("invalid date {date:?}")))
}

fn parse_raw_date(seconds: &str, offset: &str) -> OdbResult<DateTime<FixedOffset>> {
    let seconds = seconds
        .parse::<i64>()
        .map_err(|_| OdbError::format(format!("invalid timestamp {seconds:?}")))?;

    let offset = parse_offset(offset)
        .ok_or_else(|| OdbError::format(format!("invalid timezone {offset:?}")))?;

    DateTime::from_timestamp(seconds, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| OdbError::format(format!("timestamp out of range: {seconds}")))
}

// "+0200" -> UTC+2
fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let (sign, digits) = match offset.as_bytes().first()? {
        b'+' => (1, &offset[1..]),
        b'-' => (-1, &offset[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
