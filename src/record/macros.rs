//! Descriptor generation for plain structs

/// Implements [`Record`](crate::Record) and [`AsSlot`](crate::AsSlot) for a
/// struct from a list of `field: "rules"` pairs.
///
/// Fields are visited in the order listed. A field marked `#[locked]` is
/// reported but never touched, whatever its rules say. Fields left out of the
/// list are invisible to the engine.
///
/// ```
/// #[derive(Debug, Default)]
/// struct Address {
///     line1: String,
///     postcode: String,
/// }
///
/// sanitize::record!(Address {
///     line1: "trim_space",
///     postcode: "trim_space,upper,strip_space",
/// });
///
/// let mut address = Address {
///     line1: " 1 High Street ".into(),
///     postcode: "sw1a 1aa".into(),
/// };
/// sanitize::apply(&mut address).unwrap();
/// assert_eq!(address.postcode, "SW1A1AA");
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $( $(#[$flag:ident])* $field:ident : $rules:expr ),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields(&mut self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $( $crate::record!(@field self, [$($flag)*] $field : $rules) ),*
                ]
            }
        }

        impl $crate::AsSlot for $ty {
            fn as_slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::record(self)
            }
        }
    };
    (@field $this:ident, [] $field:ident : $rules:expr) => {
        $crate::Field::new(
            ::std::stringify!($field),
            $rules,
            $crate::AsSlot::as_slot(&mut $this.$field),
        )
    };
    (@field $this:ident, [locked] $field:ident : $rules:expr) => {
        $crate::Field::locked(::std::stringify!($field), $rules)
    };
}
