//! Request arguments and flattening
//!
//! Calls take heterogeneous, variable-length argument lists: an entity id
//! followed by a coordinate, two corners and a block, a setting name and a
//! flag. [`Arg`] is the tagged union covering every shape a caller can pass;
//! [`Args`] is an ordered list of them. Flattening walks the list depth-first,
//! left to right, and yields the [`Scalar`]s that end up comma-joined on the
//! request line.

use mcpi_core::{Block, Vec3, format_real};
use std::fmt;

/// A single value on the request line
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Real(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Real(v) => f.write_str(&format_real(*v)),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

/// One caller-supplied argument
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Scalar(Scalar),
    /// Expands to its three components
    Vec3(Vec3),
    /// Nested arguments, expanded in order
    Seq(Vec<Arg>),
    /// Contributes nothing to the request line
    Omitted,
}

impl Arg {
    /// Number of scalars this argument flattens to
    pub fn arity(&self) -> usize {
        match self {
            Arg::Scalar(_) => 1,
            Arg::Vec3(_) => 3,
            Arg::Seq(items) => items.iter().map(Arg::arity).sum(),
            Arg::Omitted => 0,
        }
    }

    /// Append the flattened scalars of this argument to `out`
    pub fn flatten_into(&self, out: &mut Vec<Scalar>) {
        match self {
            Arg::Scalar(s) => out.push(s.clone()),
            Arg::Vec3(v) => {
                out.push(Scalar::Real(v.x));
                out.push(Scalar::Real(v.y));
                out.push(Scalar::Real(v.z));
            }
            Arg::Seq(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            Arg::Omitted => {}
        }
    }
}

impl From<Scalar> for Arg {
    fn from(s: Scalar) -> Self {
        Arg::Scalar(s)
    }
}

macro_rules! int_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Scalar(Scalar::Int(v.into()))
                }
            }
        )*
    };
}

int_arg!(i8, i16, i32, i64, u8, u16, u32);

/// Goes through the shortest `f32` decimal, so `0.1f32` is sent as `0.1`
impl From<f32> for Arg {
    fn from(v: f32) -> Self {
        let real = v.to_string().parse().unwrap_or(f64::from(v));
        Arg::Scalar(Scalar::Real(real))
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Scalar(Scalar::Real(v))
    }
}

/// Flags travel as `0`/`1`
impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Scalar(Scalar::Int(i64::from(v)))
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Scalar(Scalar::Str(v.to_string()))
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Scalar(Scalar::Str(v))
    }
}

impl From<&String> for Arg {
    fn from(v: &String) -> Self {
        Arg::Scalar(Scalar::Str(v.clone()))
    }
}

impl From<Vec3> for Arg {
    fn from(v: Vec3) -> Self {
        Arg::Vec3(v)
    }
}

impl From<Block> for Arg {
    fn from(b: Block) -> Self {
        Arg::Seq(vec![b.id.into(), b.data.into()])
    }
}

impl From<Args> for Arg {
    fn from(args: Args) -> Self {
        Arg::Seq(args.0)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(items: [T; N]) -> Self {
        Arg::Seq(items.into_iter().map(Into::into).collect())
    }
}

/// `None` marks an argument left out of this call variant
impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        v.map_or(Arg::Omitted, Into::into)
    }
}

/// Ordered argument list for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Arg>);

impl Args {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an argument, builder style
    pub fn with(mut self, arg: impl Into<Arg>) -> Self {
        self.0.push(arg.into());
        self
    }

    pub fn push(&mut self, arg: impl Into<Arg>) {
        self.0.push(arg.into());
    }

    /// Put a scope token ahead of the existing arguments
    pub fn scoped(mut self, scope: impl Into<Arg>) -> Self {
        self.0.insert(0, scope.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.arity() == 0
    }

    /// Total scalar count after flattening
    pub fn arity(&self) -> usize {
        self.0.iter().map(Arg::arity).sum()
    }

    pub fn flatten(&self) -> Vec<Scalar> {
        let mut out = Vec::with_capacity(self.arity());
        for arg in &self.0 {
            arg.flatten_into(&mut out);
        }
        out
    }

    /// Flattened scalars joined with `,`
    pub fn join(&self) -> String {
        self.flatten()
            .iter()
            .map(Scalar::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<Vec<Arg>> for Args {
    fn from(args: Vec<Arg>) -> Self {
        Self(args)
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build an [`Args`] list from heterogeneous expressions
///
/// ```
/// use mcpi_core::Vec3;
/// use mcpi_wire::args;
///
/// let args = args![Vec3::new(1.0, 2.0, 3.0), 35, true];
/// assert_eq!(args.join(), "1.0,2.0,3.0,35,1");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::param::Args::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::param::Args::from(vec![$($crate::param::Arg::from($arg)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_vec3_flattens_in_order() {
        let args = args![Vec3::new(1.5, -2.0, 3.25)];
        assert_eq!(
            args.flatten(),
            vec![Scalar::Real(1.5), Scalar::Real(-2.0), Scalar::Real(3.25)]
        );
        assert_eq!(args.join(), "1.5,-2.0,3.25");
    }

    #[test]
    fn test_depth_first_left_to_right() {
        let path = vec![Vec3::new(0.0, 1.0, 2.0), Vec3::new(3.0, 4.0, 5.0)];
        let args = args![7, path, "name", Vec::<Arg>::new(), 8.5];

        assert_eq!(args.arity(), 1 + 6 + 1 + 0 + 1);
        assert_eq!(args.join(), "7,0.0,1.0,2.0,3.0,4.0,5.0,name,8.5");
    }

    #[test]
    fn test_nested_sequences() {
        let inner = Arg::Seq(vec![1.into(), Arg::Seq(vec![2.into(), 3.into()])]);
        let args = args![0, inner, 4];
        let ints: Vec<Scalar> = (0..5).map(Scalar::Int).collect();
        assert_eq!(args.flatten(), ints);
    }

    #[test]
    fn test_omitted_and_empty_contribute_nothing() {
        let none: Option<i32> = None;
        let args = args![none, Vec::<i32>::new(), Some(5), Arg::Omitted];
        assert_eq!(args.arity(), 1);
        assert_eq!(args.join(), "5");

        assert!(args![none].is_empty());
        assert_eq!(args![].join(), "");
    }

    #[test]
    fn test_scalar_conversions() {
        let args = args![true, false, 3u8, -4i64, 0.25f32, String::from("x")];
        assert_eq!(args.join(), "1,0,3,-4,0.25,x");
    }

    #[test]
    fn test_f32_keeps_its_shortest_form() {
        assert_eq!(args![0.1f32, 1.5f32, 3.0f32, -2.25f32].join(), "0.1,1.5,3.0,-2.25");
        assert_eq!(args![Vec3::new(0.1, 0.2, 0.3)].join(), "0.1,0.2,0.3");
    }

    #[test]
    fn test_block_expands_to_id_and_data() {
        let args = args![[1, 2, 3], Block::WOOL.data(14)];
        assert_eq!(args.join(), "1,2,3,35,14");
    }

    #[test]
    fn test_scoped_prepends() {
        let args = args![Vec3::new(1.0, 2.0, 3.0)].scoped(42);
        assert_eq!(args.join(), "42,1.0,2.0,3.0");

        let args = Args::new().with(Vec3::up()).scoped(None::<String>);
        assert_eq!(args.join(), "0.0,1.0,0.0");
    }
}
