//! Polars column access helpers.
//!
//! The dataset cache stores every column as text so that malformed cells
//! survive ingestion; these helpers read columns back uniformly as strings.

use polars::prelude::*;

/// Returns the named column cast to `String`, or `None` if it is absent.
pub fn string_column(df: &DataFrame, name: &str) -> PolarsResult<Option<StringChunked>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let cast = column.cast(&DataType::String)?;
    Ok(Some(cast.str()?.clone()))
}

/// Like [`string_column`], but substitutes an all-null column when absent.
pub fn string_column_or_empty(df: &DataFrame, name: &str) -> PolarsResult<StringChunked> {
    match string_column(df, name)? {
        Some(column) => Ok(column),
        None => Ok(StringChunked::full_null(name.into(), df.height())),
    }
}
