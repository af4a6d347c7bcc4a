//! Writes reduced results to an output stream.

use std::fmt::Display;
use std::io::Write;

use crate::error::Result;

/// Writes each `(key, value)` pair as one line of two tab-separated fields,
/// in the order the reducing stage produced them. No header, no trailing
/// summary.
pub fn emit<W, K, R>(out: &mut W, pairs: &[(K, R)]) -> Result<()>
where
    W: Write,
    K: Display,
    R: Display,
{
    for (key, value) in pairs {
        writeln!(out, "{key}\t{value}")?;
    }
    out.flush()?;
    Ok(())
}
