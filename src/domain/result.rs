//! Result type alias for the converter

use super::errors::ConverterError;

/// Result type alias for converter operations
///
/// # Examples
///
/// ```
/// use notebook_converter::domain::result::Result;
/// use notebook_converter::domain::errors::ConverterError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ConverterError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConverterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ConverterError::ProgressNotInitialized);
        assert!(result.is_err());
    }
}
