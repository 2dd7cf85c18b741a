/// Converts errors from their error type (of the member crate or module)
/// to that of a `tilecam::Error` variant.
///
/// ```rust,ignore
/// use tilecam_tiles::TileError;
/// tilecam::impl_err!(TileError, Tile);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
