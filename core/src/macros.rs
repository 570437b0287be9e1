//! # Model Registration
//!
//! `openapi_object!` declares a model struct and implements
//! [`OpenApiObject`](crate::OpenApiObject) for it.

/// Declares an OpenAPI model struct and registers its field table.
///
/// Each field is tagged `plain` (stored as deserialized from JSON) or
/// `object` (a nested type that itself implements `OpenApiObject`). The
/// struct derives `Debug`, `Clone`, `Default` and `PartialEq`; other
/// attributes, such as serde derives, are passed through.
///
/// `plain` field types must implement `Serialize` and `DeserializeOwned`;
/// `object` field types must implement `OpenApiObject` and `Default`.
///
/// ```
/// use openapi_objects::{build_typed_object, openapi_object};
/// use serde_json::json;
///
/// openapi_object! {
///     pub struct V1Resources {
///         plain cpu: u32,
///     }
/// }
///
/// openapi_object! {
///     pub struct V1Work {
///         plain name: String,
///         object resources: V1Resources,
///     }
/// }
///
/// let built = build_typed_object(
///     &json!({"name": "flow", "resources": {"cpu": 2}}),
///     &V1Work::default(),
/// )
/// .unwrap();
/// assert_eq!(built.resources.cpu, 2);
/// ```
#[macro_export]
macro_rules! openapi_object {
    (@read plain $value:expr) => {
        $crate::FieldRef::Plain($crate::__private::to_plain(&$value))
    };
    (@read object $value:expr) => {
        $crate::FieldRef::Object(&$value)
    };
    (@write plain $ty:ty, $owner:expr, $field:expr, $value:expr) => {
        $value.into_plain::<$ty>($owner, $field)?
    };
    (@write object $ty:ty, $owner:expr, $field:expr, $value:expr) => {
        $value.into_object::<$ty>($owner, $field)?
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $kind:ident $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::OpenApiObject for $name {
            fn type_name(&self) -> &'static str {
                stringify!($name)
            }

            fn field_names(&self) -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn field(&self, name: &str) -> ::core::option::Option<$crate::FieldRef<'_>> {
                match name {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            $crate::openapi_object!(@read $kind self.$field)
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            fn construct(
                &self,
                fields: $crate::FieldSet,
            ) -> $crate::AppResult<::std::boxed::Box<dyn $crate::OpenApiObject>> {
                let built = <Self as $crate::OpenApiObject>::from_fields(fields)?;
                ::core::result::Result::Ok(::std::boxed::Box::new(built))
            }

            #[allow(unused_mut)]
            fn from_fields(mut fields: $crate::FieldSet) -> $crate::AppResult<Self> {
                let mut built = <Self as ::core::default::Default>::default();
                $(
                    if let ::core::option::Option::Some(value) = fields.remove(stringify!($field)) {
                        built.$field = $crate::openapi_object!(
                            @write $kind $ty, stringify!($name), stringify!($field), value
                        );
                    }
                )*
                fields.ensure_consumed(stringify!($name))?;
                ::core::result::Result::Ok(built)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }
    };
}
