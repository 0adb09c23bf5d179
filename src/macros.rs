/// Lazily compiled, process-wide `Regex` for a literal pattern.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declare an [`ActionSpec`](crate::ActionSpec) with attribute-like fields.
///
/// ```
/// use chainroute::{action, constraints, MethodSet};
///
/// let base = action! { name: "/user/base", path: "user", chained: "/", capture: 1 };
/// let edit = action! {
///     name: "/user/edit",
///     path: "edit",
///     chained: "/user/base",
///     args: [constraints::int()],
///     methods: MethodSet::POST,
/// };
/// assert!(base.is_link());
/// assert!(!edit.is_link());
/// ```
#[macro_export]
macro_rules! action {
    (
        name: $name:expr
        $(, path: $path:expr)?
        $(, chained: $parent:expr)?
        $(, capture: $capture:expr)?
        $(, args: $args:expr)?
        $(, methods: $methods:expr)?
        $(, order: $order:expr)?
        $(,)?
    ) => {{
        let spec = $crate::ActionSpec::new($name);
        $(let spec = spec.path($path);)?
        $(let spec = spec.chained($parent);)?
        $(let spec = spec.capture($capture);)?
        $(let spec = spec.args($args);)?
        $(let spec = spec.methods($methods);)?
        $(let spec = spec.order($order);)?
        spec
    }};
}
