/// Declares a table of optional `extern "C"` function pointers resolved by name.
///
/// ```ignore
/// gt_platform::dynamic_api! {
///     pub struct LibcApi {
///         fn strlen(*const c_char) -> usize;
///         fn abs(c_int) -> c_int;
///     }
/// }
/// let api = unsafe { LibcApi::load(&module, false) };
/// ```
///
/// Field names are the exported symbol names. Symbols the module does not
/// export stay `None`; `missing()` lists them.
#[macro_export]
macro_rules! dynamic_api {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( fn $sym:ident ( $($arg:ty),* $(,)? ) $(-> $ret:ty)? ; )*
        }
    ) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        #[derive(Clone, Copy)]
        $vis struct $name {
            $( pub $sym: Option<unsafe extern "C" fn($($arg),*) $(-> $ret)?>, )*
        }

        impl $name {
            /// Exported names, in declaration order.
            pub const SYMBOLS: &'static [&'static str] = &[$(stringify!($sym)),*];

            /// Resolves every function of the table from `module`.
            ///
            /// # Safety
            /// The declared signatures must match the functions `module` exports,
            /// and the table must not outlive `module`.
            pub unsafe fn load(module: &$crate::module::Module, verbose: bool) -> Self {
                Self {
                    $( $sym: unsafe { module.symbol(stringify!($sym), verbose) }, )*
                }
            }

            /// Names of the functions the module did not export.
            pub fn missing(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $( if self.$sym.is_none() { missing.push(stringify!($sym)); } )*
                missing
            }

            pub fn is_complete(&self) -> bool {
                $( self.$sym.is_some() && )* true
            }
        }
    };
}
