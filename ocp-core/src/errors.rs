pub use anyhow::{
    anyhow,
    bail,
    ensure,
};
pub use paste::paste;
pub use thiserror::Error;

pub type EmptyResult = anyhow::Result<()>;

// This macro builds an error enum plus one snake_case constructor per variant that wraps the
// variant in an `anyhow::Error`, e.g.
//
//     err_impl! {FooError,
//         #[error("no such bar: {0}")]
//         MissingBar(String),
//     }
//
// gives `FooError::missing_bar("baz")`.  Callers recover the variant with
// `err.downcast_ref::<FooError>()`.
#[macro_export]
macro_rules! err_impl {
    (@hidden $errtype:ident, $item:ident, String) => {
        $crate::errors::paste! {
            #[doc = "Wrap a new `" $item "` error in an `anyhow::Error`."]
            pub fn [<$item:snake>](in_: &str) -> ::anyhow::Error {
                $crate::errors::anyhow!($errtype::$item(in_.into()))
            }
        }
    };

    (@hidden $errtype:ident, $item:ident, $($dtype:tt)::+) => {
        $crate::errors::paste! {
            #[doc = "Wrap a new `" $item "` error in an `anyhow::Error`."]
            pub fn [<$item:snake>](in_: &$($dtype)::+) -> ::anyhow::Error {
                $crate::errors::anyhow!($errtype::$item(in_.clone()))
            }
        }
    };

    ($(#[$outer:meta])* $errtype:ident, $($(#[$errinfo:meta])* $item:ident($($dtype:tt)::+),)+) => {
        $(#[$outer])*
        #[derive(Debug, $crate::errors::Error)]
        pub enum $errtype {
            $($(#[$errinfo])* $item($($dtype)::+)),+
        }

        impl $errtype {
            $($crate::err_impl! {@hidden $errtype, $item, $($dtype)::+})+
        }
    };
}
