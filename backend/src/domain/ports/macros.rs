//! `define_port_error!` generates the error enums returned by port traits.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field type, so adapters
//! can write `CategoryRepositoryError::query(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::MenuItemId;

    define_port_error! {
        pub enum StockPortError {
            Unavailable => "stock service unavailable",
            Lookup { message: String } => "stock lookup failed: {message}",
            OutOfStock { item: MenuItemId, remaining: u32 } =>
                "item {item} has only {remaining} portions left",
        }
    }

    #[test]
    fn unit_variants_get_argument_free_constructors() {
        assert_eq!(StockPortError::unavailable(), StockPortError::Unavailable);
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StockPortError::lookup("timeout");
        assert_eq!(err.to_string(), "stock lookup failed: timeout");
    }

    #[test]
    fn typed_fields_keep_their_type() {
        let err = StockPortError::out_of_stock(MenuItemId::new(7), 2_u32);
        assert_eq!(err.to_string(), "item 7 has only 2 portions left");
    }
}
