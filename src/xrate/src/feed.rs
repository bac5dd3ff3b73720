use serde::Deserialize;

/// The implicit rate of the feed's base currency. The base currency is never
/// listed as a record, so a lookup that matches nothing resolves to this
/// value.
const BASE_CURRENCY_RATE: f64 = 1.0;

/// The possible errors that can occur when extracting rates from a fetched
/// feed document.
#[derive(Debug)]
pub enum ExtractError {
    /// The response body could not be deserialized as a rate feed document.
    XmlDeserialize(String),
    /// A scanned `fx` record is missing one of its expected child elements.
    MissingField {
        /// Position of the record in document order, starting at zero.
        record: usize,
        /// Name of the missing child element.
        field: &'static str,
    },
    /// A scanned `fx` record carries a rate that is not a decimal number.
    InvalidRate {
        /// Position of the record in document order, starting at zero.
        record: usize,
        /// The offending rate text.
        value: String,
    },
}

impl core::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::XmlDeserialize(error) => {
                write!(f, "Failed to deserialize the feed document: {error}")
            }
            ExtractError::MissingField { record, field } => {
                write!(f, "Record {record} of the feed has no `{field}` element")
            }
            ExtractError::InvalidRate { record, value } => {
                write!(f, "Record {record} of the feed has an unparsable rate ({value})")
            }
        }
    }
}

impl std::error::Error for ExtractError {}

#[derive(Deserialize, Debug)]
struct FxRecord {
    currency: Option<String>,
    rate: Option<String>,
}

/// The `fx` records of one feed document, kept in document order. Every call
/// parses, consults, and discards its own instance.
#[derive(Deserialize, Debug)]
pub(crate) struct RateFeed {
    #[serde(rename = "fx", default)]
    records: Vec<FxRecord>,
}

impl RateFeed {
    /// Deserializes a fetched response body. Any child of an `fx` element
    /// other than `currency` and `rate` is ignored.
    pub(crate) fn parse(bytes: &[u8]) -> Result<Self, ExtractError> {
        serde_xml_rs::from_reader(bytes)
            .map_err(|e| ExtractError::XmlDeserialize(format!("{:?}", e)))
    }

    /// Returns the number of records in the document.
    pub(crate) fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Scans the records in document order and returns the rate of the first
    /// one whose currency code equals `currency_code`. Records past the
    /// match are not examined. When no record matches, the code is treated
    /// as the base currency and [BASE_CURRENCY_RATE] is returned.
    pub(crate) fn rate_for(&self, currency_code: &str) -> Result<f64, ExtractError> {
        for (index, record) in self.records.iter().enumerate() {
            let code = record
                .currency
                .as_deref()
                .ok_or(ExtractError::MissingField {
                    record: index,
                    field: "currency",
                })?;
            let rate_text = record.rate.as_deref().ok_or(ExtractError::MissingField {
                record: index,
                field: "rate",
            })?;
            let rate = rate_text
                .parse::<f64>()
                .map_err(|_| ExtractError::InvalidRate {
                    record: index,
                    value: rate_text.to_string(),
                })?;
            if code == currency_code {
                return Ok(rate);
            }
        }
        Ok(BASE_CURRENCY_RATE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::utils::test::load_file;

    const MALFORMED_XML: &str = "<exchange-rates><fx><currency>USD</fx></exchange-rates>";

    const BAD_RATE_XML: &str = "<exchange-rates>\
         <fx><currency>USD</currency><rate>one point two</rate></fx>\
         </exchange-rates>";

    /// The function tests that the rate of a single-record feed is returned
    /// verbatim.
    #[test]
    fn rate_for_single_record() {
        let feed = RateFeed::parse(&load_file("test-data/feed/single-rate.xml"))
            .expect("a parsed feed was expected");
        assert_eq!(feed.record_count(), 1);
        let rate = feed.rate_for("USD");
        assert!(matches!(rate, Ok(rate) if rate == 1.234));
    }

    /// The function tests that a code listed by no record resolves to the
    /// base currency's implicit rate.
    #[test]
    fn rate_for_unlisted_code_defaults_to_base() {
        let feed = RateFeed::parse(&load_file("test-data/feed/daily-rates.xml"))
            .expect("a parsed feed was expected");
        let rate = feed.rate_for("ZZZ");
        assert!(matches!(rate, Ok(rate) if rate == 1.0));
    }

    /// The function tests that a document with no `fx` records still parses
    /// and resolves every code to the base rate.
    #[test]
    fn rate_for_empty_feed_defaults_to_base() {
        let feed = RateFeed::parse(&load_file("test-data/feed/no-records.xml"))
            .expect("a parsed feed was expected");
        assert_eq!(feed.record_count(), 0);
        let rate = feed.rate_for("USD");
        assert!(matches!(rate, Ok(rate) if rate == 1.0));
    }

    /// The function tests that the first record wins when a feed lists the
    /// same code twice.
    #[test]
    fn rate_for_duplicate_codes_takes_first() {
        let feed = RateFeed::parse(&load_file("test-data/feed/duplicate-codes.xml"))
            .expect("a parsed feed was expected");
        let rate = feed.rate_for("USD");
        assert!(matches!(rate, Ok(rate) if rate == 1.2));
    }

    /// The function tests that a scanned record without a `rate` element is
    /// reported as a structural error rather than a wrong value.
    #[test]
    fn rate_for_record_without_rate_element() {
        let feed = RateFeed::parse(&load_file("test-data/feed/missing-rate.xml"))
            .expect("a parsed feed was expected");
        let rate = feed.rate_for("GBP");
        assert!(matches!(
            rate,
            Err(ExtractError::MissingField { record: 1, field: "rate" })
        ));
    }

    /// The function tests that records past the first match are never
    /// examined, so a malformed trailing record does not fail an earlier
    /// lookup.
    #[test]
    fn rate_for_stops_at_first_match() {
        let feed = RateFeed::parse(&load_file("test-data/feed/missing-rate.xml"))
            .expect("a parsed feed was expected");
        let rate = feed.rate_for("USD");
        assert!(matches!(rate, Ok(rate) if rate == 1.2));
    }

    /// The function tests that a malformed document surfaces as a
    /// deserialization error.
    #[test]
    fn parse_malformed_document() {
        let result = RateFeed::parse(MALFORMED_XML.as_bytes());
        assert!(matches!(result, Err(ExtractError::XmlDeserialize(_))));
    }

    /// The function tests that a rate which is not a decimal number is
    /// reported with the offending text.
    #[test]
    fn rate_for_record_with_unparsable_rate() {
        let feed = RateFeed::parse(BAD_RATE_XML.as_bytes()).expect("a parsed feed was expected");
        let rate = feed.rate_for("USD");
        assert!(matches!(
            rate,
            Err(ExtractError::InvalidRate { record: 0, value }) if value == "one point two"
        ));
    }
}
