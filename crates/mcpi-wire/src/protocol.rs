//! Line protocol codec
//!
//! Requests are single lines of the form `method(arg1,arg2,...)\n`.
//! Responses are single lines whose shape is fixed by the request that
//! produced them, never self-describing:
//! - one integer or one real
//! - a comma-separated list (`x,y,z`, `id,data`, block ids of a cuboid)
//! - a `|`-separated list of integers or of comma-separated records

use crate::param::Args;
use mcpi_core::{McpiError, Result, Vec3};
use std::str::FromStr;

/// Default server port
pub const DEFAULT_PORT: u16 = 4711;

/// Default server address
pub const DEFAULT_ADDRESS: &str = "localhost";

/// The only error signal the server has
pub const FAIL_RESPONSE: &str = "Fail";

/// Build the request line for `method` with `args`, terminator included
///
/// Rejects method names or string arguments that contain a line feed, since
/// they would split the request across two protocol lines.
pub fn request_line(method: &str, args: &Args) -> Result<String> {
    if method.is_empty() || method.contains(['\n', '(']) {
        return Err(McpiError::InvalidArgument(format!(
            "Bad method name: {:?}",
            method
        )));
    }

    let params = args.join();
    if params.contains('\n') {
        return Err(McpiError::InvalidArgument(format!(
            "Arguments of {} contain a line feed",
            method
        )));
    }

    Ok(format!("{}({})\n", method, params))
}

fn parse_field<T: FromStr>(field: &str, line: &str, what: &str) -> Result<T> {
    field.parse().map_err(|_| {
        McpiError::ProtocolError(format!("Expected {} but got {:?} in {:?}", what, field, line))
    })
}

/// Parse a single base-10 integer
pub fn parse_int<T: FromStr>(line: &str) -> Result<T> {
    parse_field(line, line, "an integer")
}

/// Parse a single real
pub fn parse_real(line: &str) -> Result<f64> {
    parse_field(line, line, "a number")
}

/// Parse exactly `N` comma-separated fields
pub fn parse_fixed<T: FromStr, const N: usize>(line: &str) -> Result<[T; N]> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != N {
        return Err(McpiError::ProtocolError(format!(
            "Expected {} fields but got {} in {:?}",
            N,
            fields.len(),
            line
        )));
    }

    let parsed = fields
        .into_iter()
        .map(|f| parse_field(f, line, "a number"))
        .collect::<Result<Vec<T>>>()?;
    parsed.try_into().map_err(|_| {
        McpiError::ProtocolError(format!("Expected {} fields in {:?}", N, line))
    })
}

/// Parse an `x,y,z` triple of reals
pub fn parse_vec3(line: &str) -> Result<Vec3> {
    parse_fixed::<f64, 3>(line).map(Vec3::from)
}

/// Parse a comma-separated list of integers of any length
///
/// An empty line is an empty list.
pub fn parse_int_csv<T: FromStr>(line: &str) -> Result<Vec<T>> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    line.split(',')
        .map(|f| parse_field(f, line, "an integer"))
        .collect()
}

/// Parse a `|`-separated list of integers, skipping empty entries
pub fn parse_int_list<T: FromStr>(line: &str) -> Result<Vec<T>> {
    line.split('|')
        .filter(|f| !f.is_empty())
        .map(|f| parse_field(f, line, "an integer"))
        .collect()
}

/// Parse a `|`-separated list of `N`-field integer records, skipping empty entries
pub fn parse_records<const N: usize>(line: &str) -> Result<Vec<[i64; N]>> {
    line.split('|')
        .filter(|r| !r.is_empty())
        .map(parse_fixed::<i64, N>)
        .collect()
}
