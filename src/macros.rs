/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys are string literals. Any other leaf goes through
/// [`to_value`](crate::to_value), so integers become `Int64` and floats
/// become `Float64`; a leaf that cannot be serialized becomes `Null`.
///
/// ```rust
/// use serde_loose::{value, Value};
///
/// let v = value!({
///     "name": "loose",
///     "ports": [8000, 8001],
///     "owner": { "admin": true }
/// });
/// assert_eq!(v.pointer(&["owner", "admin"]), Some(&Value::Bool(true)));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
