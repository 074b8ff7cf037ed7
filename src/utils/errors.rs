use tracing::error;

use crate::error::GoldPriceError;

pub const FETCH_FAILED: &str = "❌ Failed to fetch gold prices from API";
pub const HISTORY_FETCH_FAILED: &str = "❌ Failed to fetch historical gold price data from API";

/// Turn a pipeline error into the message shown on Discord.
///
/// Validation errors are shown verbatim; anything past validation is logged with
/// its cause and replaced by a short generic message.
pub fn user_message(err: &GoldPriceError) -> String {
    match err {
        e if e.is_validation() => format!("❌ {}", e),
        GoldPriceError::NoData(_) => HISTORY_FETCH_FAILED.to_string(),
        GoldPriceError::Render(e) => {
            error!("Error generating gold price chart: {}", e);
            "❌ Failed to generate the price chart. Please try again later.".to_string()
        }
        e => {
            error!("Error fetching gold prices: {}", e);
            FETCH_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_verbatim() {
        let err = GoldPriceError::MissingParameter { required: "type", dependent: "days" };
        assert_eq!(user_message(&err), "❌ `type` parameter is required when `days` is specified");

        let err = GoldPriceError::DaysOutOfRange { days: 45 };
        assert!(user_message(&err).contains("between 1 and 30"));
    }

    #[test]
    fn test_no_data_message() {
        let err = GoldPriceError::NoData("SJ9999".to_string());
        assert_eq!(user_message(&err), HISTORY_FETCH_FAILED);
    }
}
