/// DDL for one table of the assassin schema.
///
/// Statements are `&'static str` built with `const_format::concatcp!`
/// from the table constants, so they can be run as-is by a migration.
pub trait Schema {
    /// Table this record type lives in.
    fn name() -> &'static str;
    /// Idempotent `CREATE TABLE` statement.
    fn creates() -> &'static str;
    /// Idempotent `CREATE INDEX` statements, possibly none.
    fn indices() -> &'static str;
}
