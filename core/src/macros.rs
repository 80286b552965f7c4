/// Implements `Cell` for plain state enums, which serve as their own state.
///
/// # Examples
///
/// ```ignore
/// #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// enum OnOff {
///     On,
///     Off,
/// }
/// impl_state_cell!(OnOff);
/// ```
macro_rules! impl_state_cell {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::cell::Cell for $ty {
                type State = Self;

                #[inline]
                fn state(&self) -> Self {
                    *self
                }
            }
        )+
    };
}
