/// Declares a mappable struct and its [`Series`](crate::Series) impl in one
/// place, replacing annotation scanning with explicit registration.
///
/// ```
/// fluxmap_core::series! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct CpuSample {
///         measurement = "cpu";
///         prefix env: Option<String>,
///         tag host: String,
///         time at: Option<fluxmap_core::Timestamp>,
///         field usage as "usage_idle": i64,
///         field temp: f64,
///     }
/// }
/// ```
///
/// Role keywords are `prefix`, `suffix`, `tag`, `time`, and `field`; `field`
/// accepts an `as "column"` rename. Every declaration needs a trailing comma.
/// The macro derives `Default` itself; list any other derives in the
/// attributes.
#[macro_export]
macro_rules! series {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            measurement = $measurement:literal;
            $($body:tt)*
        }
    ) => {
        $crate::series!(@munch
            { $(#[$meta])* ($vis) $name $measurement }
            [ ]
            $($body)*
        );
    };

    (@munch $ctx:tt [$($fields:tt)*] prefix $attr:ident : $ty:ty , $($rest:tt)*) => {
        $crate::series!(@munch $ctx
            [$($fields)* { NamePrefix, $attr, (stringify!($attr)), $ty }]
            $($rest)*);
    };
    (@munch $ctx:tt [$($fields:tt)*] suffix $attr:ident : $ty:ty , $($rest:tt)*) => {
        $crate::series!(@munch $ctx
            [$($fields)* { NameSuffix, $attr, (stringify!($attr)), $ty }]
            $($rest)*);
    };
    (@munch $ctx:tt [$($fields:tt)*] tag $attr:ident : $ty:ty , $($rest:tt)*) => {
        $crate::series!(@munch $ctx
            [$($fields)* { Tag, $attr, (stringify!($attr)), $ty }]
            $($rest)*);
    };
    (@munch $ctx:tt [$($fields:tt)*] time $attr:ident : $ty:ty , $($rest:tt)*) => {
        $crate::series!(@munch $ctx
            [$($fields)* { Timestamp, $attr, ("time"), $ty }]
            $($rest)*);
    };
    (@munch $ctx:tt [$($fields:tt)*] field $attr:ident as $col:literal : $ty:ty , $($rest:tt)*) => {
        $crate::series!(@munch $ctx
            [$($fields)* { Field, $attr, ($col), $ty }]
            $($rest)*);
    };
    (@munch $ctx:tt [$($fields:tt)*] field $attr:ident : $ty:ty , $($rest:tt)*) => {
        $crate::series!(@munch $ctx
            [$($fields)* { Field, $attr, (stringify!($attr)), $ty }]
            $($rest)*);
    };

    // All declarations consumed: emit the struct and the Series impl.
    (@munch
        { $(#[$meta:meta])* ($vis:vis) $name:ident $measurement:literal }
        [ $({ $role:ident, $attr:ident, ($col:expr), $ty:ty })* ]
    ) => {
        $(#[$meta])*
        #[derive(Default)]
        $vis struct $name {
            $( pub $attr: $ty, )*
        }

        impl $crate::Series for $name {
            fn schema() -> $crate::Result<$crate::schema::SeriesSchema> {
                $crate::schema::SeriesSchema::builder($measurement)
                    $(
                        .column(
                            stringify!($attr),
                            $col,
                            $crate::schema::Role::$role,
                            <$ty as $crate::ColumnValue>::TYPE,
                        )
                    )*
                    .build()
            }

            fn get(&self, attr: &str) -> $crate::Value {
                match attr {
                    $( stringify!($attr) => $crate::ColumnValue::into_value(self.$attr.clone()), )*
                    _ => $crate::Value::Null,
                }
            }

            fn set(&mut self, attr: &str, value: $crate::Value) -> $crate::Result<()> {
                match attr {
                    $(
                        stringify!($attr) => {
                            self.$attr = $crate::ColumnValue::from_value(value)?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::err!("unknown attribute `{}`", attr)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::schema::Role;
    use crate::{Series, Value};

    series! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct Sample {
            measurement = "sample";
            prefix env: Option<String>,
            tag host: String,
            time at: Option<crate::Timestamp>,
            field usage as "usage_idle": i64,
            field temp: f64,
        }
    }

    #[test]
    fn generates_schema_in_declaration_order() {
        let schema = Sample::schema().unwrap();
        assert_eq!(schema.measurement(), Some("sample"));

        let roles: Vec<_> = schema
            .columns()
            .iter()
            .map(|c| (c.attr(), c.column(), c.role()))
            .collect();
        assert_eq!(
            roles,
            vec![
                ("env", "env", Role::NamePrefix),
                ("host", "host", Role::Tag),
                ("at", "time", Role::Timestamp),
                ("usage", "usage_idle", Role::Field),
                ("temp", "temp", Role::Field),
            ]
        );
    }

    #[test]
    fn get_reads_declared_attributes() {
        let sample = Sample {
            env: None,
            host: "web1".to_string(),
            at: None,
            usage: 42,
            temp: 1.5,
        };

        assert_eq!(sample.get("host"), Value::String("web1".to_string()));
        assert_eq!(sample.get("usage"), Value::I64(42));
        assert_eq!(sample.get("env"), Value::Null);
        assert_eq!(sample.get("nope"), Value::Null);
    }

    #[test]
    fn set_assigns_and_rejects() {
        let mut sample = Sample::default();
        sample.set("usage", Value::I64(7)).unwrap();
        assert_eq!(sample.usage, 7);

        let err = sample.set("usage", Value::String("x".to_string())).unwrap_err();
        assert!(err.is_type_conversion());

        assert!(sample.set("nope", Value::I64(1)).is_err());
    }
}
