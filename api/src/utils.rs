use chrono::NaiveDate;
use service::error::GenericError;

/// Tournaments are addressed by their ISO date, `YYYY-MM-DD`.
pub(crate) fn parse_date(date: &str) -> Result<NaiveDate, GenericError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| GenericError::BadRequest("Dates must be formatted as YYYY-MM-DD"))
}

pub(crate) fn parse_optional_date(date: Option<String>) -> Result<Option<NaiveDate>, GenericError> {
    date.as_deref().map(parse_date).transpose()
}
