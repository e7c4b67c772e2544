//! Macros for generating record accessor shorthands.
//!
//! Every derived value lives in the [`crate::accessors::Accessor`] table. These
//! macros generate the typed convenience methods on [`crate::Record`] that
//! forward to it, so the table stays the single place a value is defined.

/// Generate `fn name(&self) -> &str` methods for text-valued accessors.
///
/// # Example
///
/// ```ignore
/// impl Record {
///     text_accessors! {
///         oclc => Oclc,
///         title => Title,
///     }
/// }
/// ```
#[macro_export]
macro_rules! text_accessors {
    ($($method:ident => $accessor:ident),* $(,)?) => {
        $(
            #[doc = concat!("Value of the `", stringify!($method), "` accessor, empty when absent.")]
            #[must_use]
            pub fn $method(&self) -> &str {
                self.value($crate::accessors::Accessor::$accessor).as_text()
            }
        )*
    };
}

/// Generate `fn name(&self) -> &[String]` methods for list-valued accessors.
#[macro_export]
macro_rules! list_accessors {
    ($($method:ident => $accessor:ident),* $(,)?) => {
        $(
            #[doc = concat!("Values of the `", stringify!($method), "` accessor, empty when absent.")]
            #[must_use]
            pub fn $method(&self) -> &[String] {
                self.value($crate::accessors::Accessor::$accessor).as_list()
            }
        )*
    };
}
