//! Mean imputation for numeric columns.

use crate::error::Result;
use crate::utils::strict_float_series;
use polars::prelude::*;

/// Outcome of filling one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeanFill {
    /// Nulls were replaced with the mean of the original non-null values.
    Filled { mean: f64, filled: usize },
    /// Every value was null, so no mean exists and nulls were kept.
    NoValues,
}

/// Statistical imputation with the column mean.
pub struct MeanImputer;

impl MeanImputer {
    /// Replace every null in `col_name` with the mean of its non-null values.
    ///
    /// The mean is computed once from the values present before filling and
    /// applied uniformly. The column is stored back as Float64.
    ///
    /// # Errors
    ///
    /// Fails when a present value cannot be read as a number; such text is
    /// never turned into a null and filled.
    pub fn fill_column(df: &mut DataFrame, col_name: &str) -> Result<MeanFill> {
        let series = strict_float_series(df, col_name)?;

        let Some(mean_val) = series.mean() else {
            df.replace(col_name, series)?;
            return Ok(MeanFill::NoValues);
        };

        let filled = series.null_count();
        let result = series
            .f64()?
            .fill_null_with_values(mean_val)?
            .into_series();
        df.replace(col_name, result)?;

        Ok(MeanFill::Filled {
            mean: mean_val,
            filled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_column_basic() {
        let mut df = df!["values" => [Some(1.0), None, Some(5.0)]].unwrap();

        let outcome = MeanImputer::fill_column(&mut df, "values").unwrap();

        assert_eq!(outcome, MeanFill::Filled { mean: 3.0, filled: 1 });
        let values = df.column("values").unwrap();
        assert_eq!(values.null_count(), 0);
        assert_eq!(values.get(1).unwrap().try_extract::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_fill_column_uses_original_mean_for_every_gap() {
        let mut df = df!["values" => [Some(10.0), None, None, Some(20.0)]].unwrap();

        MeanImputer::fill_column(&mut df, "values").unwrap();

        let values = df.column("values").unwrap();
        assert_eq!(values.get(1).unwrap().try_extract::<f64>().unwrap(), 15.0);
        assert_eq!(values.get(2).unwrap().try_extract::<f64>().unwrap(), 15.0);
        assert_eq!(values.get(0).unwrap().try_extract::<f64>().unwrap(), 10.0);
        assert_eq!(values.get(3).unwrap().try_extract::<f64>().unwrap(), 20.0);
    }

    #[test]
    fn test_fill_column_all_nulls_keeps_nulls() {
        let mut df = df!["values" => [Option::<f64>::None, None]].unwrap();

        let outcome = MeanImputer::fill_column(&mut df, "values").unwrap();

        assert_eq!(outcome, MeanFill::NoValues);
        assert_eq!(df.column("values").unwrap().null_count(), 2);
    }

    #[test]
    fn test_fill_column_integers_become_float() {
        let mut df = df!["values" => [Some(1i64), None, Some(2)]].unwrap();

        MeanImputer::fill_column(&mut df, "values").unwrap();

        let values = df.column("values").unwrap();
        assert!(matches!(values.dtype(), DataType::Float64));
        assert_eq!(values.get(1).unwrap().try_extract::<f64>().unwrap(), 1.5);
    }

    #[test]
    fn test_fill_column_numeric_text_is_parsed() {
        let mut df = df!["values" => [Some("10"), None, Some("20")]].unwrap();

        let outcome = MeanImputer::fill_column(&mut df, "values").unwrap();

        assert_eq!(outcome, MeanFill::Filled { mean: 15.0, filled: 1 });
        assert!(matches!(df.column("values").unwrap().dtype(), DataType::Float64));
    }

    #[test]
    fn test_fill_column_non_numeric_text_errors() {
        let mut df = df!["values" => [Some("10"), Some("abc"), Some("20")]].unwrap();

        let result = MeanImputer::fill_column(&mut df, "values");

        assert!(matches!(result, Err(crate::error::AnalysisError::Polars(_))));
        // Column left as it was
        assert!(matches!(df.column("values").unwrap().dtype(), DataType::String));
    }

    #[test]
    fn test_fill_column_missing_column_errors() {
        let mut df = df!["other" => [1.0]].unwrap();
        assert!(MeanImputer::fill_column(&mut df, "values").is_err());
    }
}
