pub mod calendar;
pub mod config;
pub mod error;
pub mod logging;
pub mod numeric;
pub mod validation;
pub mod words;

pub use calendar::*;
pub use config::*;
pub use error::*;
pub use logging::*;
pub use numeric::*;
pub use validation::*;
pub use words::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.import.competitor_markup_low, 1.016);
        assert_eq!(config.import.competitor_markup_high, 1.0185);
        assert_eq!(config.documents.default_program, "PNAE/FNDE");
    }

    #[test]
    fn test_error_codes() {
        let error = PrestacaoError::validation("supplier", "missing proponent");
        assert_eq!(error.error_code(), "VALIDATION_ERROR");

        let error = PrestacaoError::value_mismatch(1000.0, 999.5);
        assert_eq!(error.error_code(), "VALUE_MISMATCH");
    }
}
