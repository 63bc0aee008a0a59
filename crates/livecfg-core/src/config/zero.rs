//! The empty-value capability used by [`Manager::init_data`](super::Manager::init_data).

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// Types with a well-defined "empty" form.
///
/// A holder treats a value for which `is_zero` returns `true` as not yet
/// initialized. For the types in this module the empty form is also their
/// `Default` value. Structs and enums can derive it:
///
/// ```rust
/// use livecfg_core::config::ZeroValue;
///
/// #[derive(Default, ZeroValue)]
/// struct Limits {
///     max_conns: u32,
///     hosts: Vec<String>,
///     #[zero_value(skip)]
///     label: &'static str,
/// }
///
/// assert!(Limits { label: "edge", ..Default::default() }.is_zero());
/// assert!(!Limits { max_conns: 8, ..Default::default() }.is_zero());
/// ```
pub trait ZeroValue {
    /// Returns `true` if `self` is the empty form of its type.
    fn is_zero(&self) -> bool;
}

macro_rules! impl_zero_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ZeroValue for $ty {
                fn is_zero(&self) -> bool {
                    *self == 0 as $ty
                }
            }
        )*
    };
}

impl_zero_numeric!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

macro_rules! impl_zero_collection {
    ($($ty:ident < $($param:ident),+ >),* $(,)?) => {
        $(
            impl<$($param),+> ZeroValue for $ty<$($param),+> {
                fn is_zero(&self) -> bool {
                    self.is_empty()
                }
            }
        )*
    };
}

impl_zero_collection!(
    Vec<T>,
    VecDeque<T>,
    BTreeSet<T>,
    BTreeMap<K, V>,
);

impl<T, S> ZeroValue for HashSet<T, S> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> ZeroValue for HashMap<K, V, S> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> ZeroValue for [T] {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: ZeroValue, const N: usize> ZeroValue for [T; N] {
    fn is_zero(&self) -> bool {
        self.iter().all(ZeroValue::is_zero)
    }
}

impl ZeroValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl ZeroValue for char {
    fn is_zero(&self) -> bool {
        *self == '\0'
    }
}

impl ZeroValue for () {
    fn is_zero(&self) -> bool {
        true
    }
}

impl ZeroValue for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ZeroValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ZeroValue for Path {
    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl ZeroValue for PathBuf {
    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl ZeroValue for Duration {
    fn is_zero(&self) -> bool {
        Duration::is_zero(self)
    }
}

/// `None` is empty; `Some` never is, whatever it holds.
impl<T> ZeroValue for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<T: ZeroValue + ?Sized> ZeroValue for &T {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<T: ZeroValue + ?Sized> ZeroValue for Box<T> {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<T: ZeroValue + ?Sized> ZeroValue for Rc<T> {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<T: ZeroValue + ?Sized> ZeroValue for Arc<T> {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<B> ZeroValue for Cow<'_, B>
where
    B: ZeroValue + ToOwned + ?Sized,
{
    fn is_zero(&self) -> bool {
        self.as_ref().is_zero()
    }
}

macro_rules! impl_zero_tuple {
    ($($name:ident),+) => {
        impl<$($name: ZeroValue),+> ZeroValue for ($($name,)+) {
            #[allow(non_snake_case)]
            fn is_zero(&self) -> bool {
                let ($($name,)+) = self;
                true $(&& $name.is_zero())+
            }
        }
    };
}

impl_zero_tuple!(A);
impl_zero_tuple!(A, B);
impl_zero_tuple!(A, B, C);
impl_zero_tuple!(A, B, C, D);
impl_zero_tuple!(A, B, C, D, E);
impl_zero_tuple!(A, B, C, D, E, F);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZeroValue;

    #[derive(Default, ZeroValue)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    #[derive(Default, ZeroValue)]
    struct Wrapper(Option<u8>, Vec<u8>);

    #[derive(ZeroValue)]
    struct Marker;

    #[derive(Default, ZeroValue)]
    enum Mode {
        #[default]
        #[zero_value]
        Off,
        On,
        Custom(u8),
    }

    #[derive(Default, ZeroValue)]
    struct Generic<T> {
        inner: T,
    }

    #[test]
    fn test_primitives() {
        assert!(0u32.is_zero());
        assert!(!1i64.is_zero());
        assert!(0.0f64.is_zero());
        assert!(!0.5f32.is_zero());
        assert!(false.is_zero());
        assert!('\0'.is_zero());
        assert!(!'a'.is_zero());
    }

    #[test]
    fn test_strings_and_collections() {
        assert!(String::new().is_zero());
        assert!(!"x".is_zero());
        assert!(Vec::<u8>::new().is_zero());
        assert!(!vec![0u8].is_zero());
        assert!(HashMap::<String, u8>::new().is_zero());
        assert!(PathBuf::new().is_zero());
        assert!(Duration::ZERO.is_zero());
        assert!(Arc::new(String::new()).is_zero());
        assert!(Cow::Borrowed("").is_zero());
    }

    #[test]
    fn test_option_is_zero_only_when_none() {
        assert!(None::<u8>.is_zero());
        assert!(!Some(0u8).is_zero());
    }

    #[test]
    fn test_arrays_and_tuples() {
        assert!([0u8; 4].is_zero());
        assert!(![0u8, 1].is_zero());
        assert!((0u8, String::new()).is_zero());
        assert!(!(0u8, "a".to_string()).is_zero());
    }

    #[test]
    fn test_derived_struct() {
        assert!(Endpoint::default().is_zero());
        assert!(
            !Endpoint {
                host: "localhost".into(),
                port: 0
            }
            .is_zero()
        );
        assert!(Wrapper::default().is_zero());
        assert!(!Wrapper(Some(0), Vec::new()).is_zero());
        assert!(Marker.is_zero());
    }

    #[test]
    fn test_derived_enum() {
        assert!(Mode::Off.is_zero());
        assert!(Mode::default().is_zero());
        assert!(!Mode::On.is_zero());
        assert!(!Mode::Custom(0).is_zero());
        assert!(matches!(Mode::Custom(3), Mode::Custom(level) if level == 3));
    }

    #[test]
    fn test_derived_generic() {
        assert!(Generic::<u8>::default().is_zero());
        assert!(!Generic { inner: 3u8 }.is_zero());
    }
}
