//! Record field description.
//!
//! A [`Record`] lists its columns and values in declaration order. The order
//! is significant: it fixes the column list of generated statements and must
//! stay aligned with the value positions.

use super::Value;
use std::borrow::Cow;

/// One column of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub column: Cow<'static, str>,
    pub value: Value,
}

impl Field {
    pub fn new(column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// A value that maps onto a single table row.
///
/// Usually implemented with [`impl_record!`](crate::impl_record).
pub trait Record {
    /// Columns and values in declaration order.
    fn fields(&self) -> Vec<Field>;

    fn columns(&self) -> Vec<String> {
        self.fields()
            .into_iter()
            .map(|f| f.column.into_owned())
            .collect()
    }

    fn values(&self) -> Vec<Value> {
        self.fields().into_iter().map(|f| f.value).collect()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn fields(&self) -> Vec<Field> {
        (**self).fields()
    }
}

/// Ordered `(column, literal)` pairs for a record.
pub fn extract_fields<R: Record + ?Sized>(record: &R) -> Vec<(String, String)> {
    record
        .fields()
        .into_iter()
        .map(|f| (f.column.into_owned(), f.value.render()))
        .collect()
}

/// Implement [`Record`] for a struct by listing its fields.
///
/// Fields are emitted in the listed order. A field followed by `=> "name"`
/// is written to column `name` instead of its identifier.
///
/// ```
/// use lite_orm::impl_record;
///
/// struct User {
///     id: u64,
///     user_name: String,
///     score: Option<f64>,
/// }
///
/// impl_record!(User { id, user_name => "name", score });
/// ```
#[macro_export]
macro_rules! impl_record {
    (@column $field:ident) => {
        ::std::stringify!($field)
    };
    (@column $field:ident, $column:literal) => {
        $column
    };
    ($ty:ty { $($field:ident $(=> $column:literal)?),* $(,)? }) => {
        impl $crate::models::Record for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::models::Field> {
                ::std::vec![
                    $(
                        $crate::models::Field::new(
                            $crate::impl_record!(@column $field $(, $column)?),
                            ::std::clone::Clone::clone(&self.$field),
                        ),
                    )*
                ]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Order {
        id: i64,
        customer_name: String,
        quantity: u32,
        unit_price: f64,
        paid: bool,
        note: Option<String>,
    }

    crate::impl_record!(Order {
        id,
        customer_name => "customer",
        quantity,
        unit_price => "price",
        paid,
        note,
    });

    struct Empty;

    impl Record for Empty {
        fn fields(&self) -> Vec<Field> {
            Vec::new()
        }
    }

    fn order() -> Order {
        Order {
            id: 12,
            customer_name: "Ada".to_string(),
            quantity: 7,
            unit_price: 3.1,
            paid: false,
            note: None,
        }
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let columns = order().columns();
        assert_eq!(
            columns,
            vec!["id", "customer", "quantity", "price", "paid", "note"]
        );
    }

    #[test]
    fn test_extract_fields_renders_values() {
        let pairs = extract_fields(&order());
        assert_eq!(
            pairs,
            vec![
                ("id".to_string(), "12".to_string()),
                ("customer".to_string(), "Ada".to_string()),
                ("quantity".to_string(), "7".to_string()),
                ("price".to_string(), "3.10".to_string()),
                ("paid".to_string(), "false".to_string()),
                ("note".to_string(), "invalid".to_string()),
            ]
        );
    }

    #[test]
    fn test_override_name_wins_over_identifier() {
        struct Renamed {
            foo_bar: i32,
        }
        crate::impl_record!(Renamed { foo_bar => "foo" });

        let fields = Renamed { foo_bar: 1 }.fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].column, "foo");
        assert_eq!(fields[0].value, Value::Int(1));
    }

    #[test]
    fn test_values_keep_type() {
        let values = order().values();
        assert_eq!(values[0], Value::Int(12));
        assert_eq!(values[2], Value::UInt(7));
        assert_eq!(values[5], Value::Null);
    }

    #[test]
    fn test_zero_field_record() {
        assert!(extract_fields(&Empty).is_empty());
        assert!(Empty.columns().is_empty());
    }

    #[test]
    fn test_reference_is_a_record() {
        let o = order();
        let r = &o;
        assert_eq!(r.columns(), o.columns());
    }
}
