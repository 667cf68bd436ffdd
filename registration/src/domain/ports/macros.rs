//! Helper macro generating port error enums with `impl Into` constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Builds the `", stringify!($variant), "` variant.")]
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
            #[doc = concat!("Builds the `", stringify!($variant), "` variant.")]
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
                $variant $( { $(
                    #[doc = concat!("`", stringify!($field), "` field.")]
                    $field : $ty
                ),* } )?,
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
    //! Regression coverage for the generated constructors.
    define_port_error! {
        pub enum ProbeError {
            Unreachable { host: String } => "unreachable: {host}",
            Rejected { status: u16 } => "rejected with {status}",
            Annotated { status: u16, note: Option<String> } => "annotated {status}",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = ProbeError::unreachable("api.splits.network");
        assert_eq!(err.to_string(), "unreachable: api.splits.network");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = ProbeError::rejected(409_u16);
        assert_eq!(err, ProbeError::Rejected { status: 409 });
    }

    #[test]
    fn optional_fields_accept_owned_values() {
        let err = ProbeError::annotated(500_u16, Some("boom".to_owned()));
        assert_eq!(
            err,
            ProbeError::Annotated {
                status: 500,
                note: Some("boom".to_owned()),
            }
        );
    }
}
