//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `snake_case` constructor whose parameters accept
//! anything convertible into the field type.

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
    //! Generated constructors and messages.
    use crate::domain::FieldErrors;

    define_port_error! {
        pub enum SamplePortError {
            Unavailable => "store unavailable",
            Lookup { id: String } => "no record for {id}",
            Rejected { fields: FieldErrors } => "rejected: {fields}",
            Retry { message: String, attempts: u32 } => "{message} after {attempts} attempts",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::unavailable().to_string(), "store unavailable");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::lookup("u1");
        assert_eq!(err, SamplePortError::Lookup { id: "u1".to_owned() });
        assert_eq!(err.to_string(), "no record for u1");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = SamplePortError::rejected(FieldErrors::single("name", "name is required"));
        assert_eq!(err.to_string(), "rejected: name: name is required");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::retry("timed out", 3_u32);
        assert_eq!(err.to_string(), "timed out after 3 attempts");
    }
}
