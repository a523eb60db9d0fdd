//! Per-call signing timestamps.

use chrono::{DateTime, Utc};

/// Format a timestamp for AWS signatures.
///
/// Returns the date-time in `YYYYMMDD'T'HHMMSS'Z'` format.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::signing::format_datetime;
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2023, 12, 15, 10, 30, 45).unwrap();
/// assert_eq!(format_datetime(&dt), "20231215T103045Z");
/// ```
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Format a date stamp for AWS signatures.
///
/// Returns the date in `YYYYMMDD` format.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::signing::format_date_stamp;
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2023, 12, 15, 10, 30, 45).unwrap();
/// assert_eq!(format_date_stamp(&dt), "20231215");
/// ```
pub fn format_date_stamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%d").to_string()
}

/// The date and timestamp used by one signing operation.
///
/// Both strings are taken from the same instant, so the credential scope and
/// the `x-amz-date` header can never straddle midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    date: String,
    timestamp: String,
}

impl SigningContext {
    /// Capture the current UTC instant.
    pub fn now() -> Self {
        Self::at(&Utc::now())
    }

    /// Build a context for a fixed instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use integrations_aws_ses_query::signing::SigningContext;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let instant = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
    /// let context = SigningContext::at(&instant);
    ///
    /// assert_eq!(context.date(), "20150830");
    /// assert_eq!(context.timestamp(), "20150830T123600Z");
    /// ```
    pub fn at(instant: &DateTime<Utc>) -> Self {
        Self {
            date: format_date_stamp(instant),
            timestamp: format_datetime(instant),
        }
    }

    /// The `YYYYMMDD` date stamp.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The `YYYYMMDDTHHMMSSZ` timestamp sent as `x-amz-date`.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
