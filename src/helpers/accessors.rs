use super::Map;
use super::merge::extend_map;

/// Field types whose setters merge a patch instead of replacing the value.
pub trait Merge {
    type Patch;

    fn merge(&mut self, patch: Self::Patch);
}

impl Merge for Map {
    type Patch = Map;

    fn merge(&mut self, patch: Map) {
        *self = extend_map(self, &patch);
    }
}

/// Generates fluent getter/setter pairs for the fields of a struct.
///
/// Each field is declared `replace` or `merge`. The getter shares the field
/// name and returns a clone of the current value; the setter writes and returns
/// `&mut Self`. `merge` setters take the field type's [`Merge::Patch`].
///
/// ```
/// use chart_kit::accessors;
///
/// #[derive(Debug, Default)]
/// struct Frame {
///     width: f64,
///     label: String,
/// }
///
/// accessors! {
///     Frame {
///         replace width: f64 => set_width,
///         replace label: String => set_label,
///     }
/// }
///
/// let mut frame = Frame::default();
/// frame.set_width(320.0).set_label("revenue".to_owned());
/// assert_eq!(frame.width(), 320.0);
/// ```
#[macro_export]
macro_rules! accessors {
    (
        $ty:ty {
            $( $mode:ident $field:ident : $fty:ty => $setter:ident ),* $(,)?
        }
    ) => {
        impl $ty {
            $( $crate::accessors!(@field $mode $field : $fty => $setter); )*
        }
    };
    (@field replace $field:ident : $fty:ty => $setter:ident) => {
        #[must_use]
        pub fn $field(&self) -> $fty {
            ::core::clone::Clone::clone(&self.$field)
        }

        pub fn $setter(&mut self, value: $fty) -> &mut Self {
            self.$field = value;
            self
        }
    };
    (@field merge $field:ident : $fty:ty => $setter:ident) => {
        #[must_use]
        pub fn $field(&self) -> $fty {
            ::core::clone::Clone::clone(&self.$field)
        }

        pub fn $setter(&mut self, patch: <$fty as $crate::helpers::Merge>::Patch) -> &mut Self {
            $crate::helpers::Merge::merge(&mut self.$field, patch);
            self
        }
    };
}
