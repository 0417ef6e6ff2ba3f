/// Numeric helpers shared by the scanner and the diagnostic printers.
///
/// Literal values are accumulated digit by digit rather than parsed from a
/// string, and every number shown to a user goes through one fixed,
/// locale-independent formatter.
pub mod num;
