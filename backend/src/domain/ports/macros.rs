//! Helper macro for declaring adapter error enums on the driven ports.
//!
//! Each variant gets a snake_case constructor. Fields are accepted as
//! `impl Into<T>` so callers can pass `&str` where a `String` is stored.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ProbeError {
            Unreachable { message: String } => "unreachable: {message}",
            Rejected { message: String, attempts: u32 } => "rejected after {attempts}: {message}",
        }
    }

    #[test]
    fn constructor_accepts_borrowed_strings() {
        let err = ProbeError::unreachable("timeout");
        assert_eq!(err.to_string(), "unreachable: timeout");
    }

    #[test]
    fn constructor_handles_mixed_fields() {
        let err = ProbeError::rejected("busy", 3_u32);
        assert_eq!(
            err,
            ProbeError::Rejected {
                message: "busy".to_owned(),
                attempts: 3
            }
        );
        assert_eq!(err.to_string(), "rejected after 3: busy");
    }
}
