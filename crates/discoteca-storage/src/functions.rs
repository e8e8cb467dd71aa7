//! SQL functions used when building filters.

use diesel::sql_types::Text;

diesel::define_sql_function! {
  /// SQLite `lower(text)`. Filters compare `lower(column)` against a value the
  /// caller has already lower-cased, which makes the match case-insensitive.
  fn lower(x: Text) -> Text;
}
