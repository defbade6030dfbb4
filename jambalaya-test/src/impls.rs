//! `Inspect` implementations for std and ecosystem types.

use std::any::TypeId;
use std::borrow::Cow;
use std::cell::{Cell, OnceCell, Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::{Debug, Display};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use uuid::Uuid;

use crate::errors::{AccessorError, IntrospectionError};
use crate::inspect::{Accessor, Identity, Inspect, Literal, Shape, Value};

// Transparent wrappers forward every capability, identity included, so a
// value reached through `Rc` and through `&` is recognised as the same value.
macro_rules! forward_inspect {
    ([$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> Inspect for $ty {
            fn type_name(&self) -> &'static str {
                (**self).type_name()
            }

            fn identity(&self) -> Identity {
                (**self).identity()
            }

            fn shape(&self) -> Shape<'_> {
                (**self).shape()
            }

            fn properties(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
                (**self).properties()
            }

            fn methods(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
                (**self).methods()
            }
        }
    };
}

forward_inspect!([T: Inspect + ?Sized] &T);
forward_inspect!([T: Inspect + ?Sized] Box<T>);
forward_inspect!([T: Inspect + ?Sized] Rc<T>);
forward_inspect!([T: Inspect + ?Sized] Arc<T>);
forward_inspect!(['g, T: Inspect + ?Sized] Ref<'g, T>);
forward_inspect!(['g, T: Inspect + ?Sized] MutexGuard<'g, T>);
forward_inspect!(['g, T: Inspect + ?Sized] RwLockReadGuard<'g, T>);

// Interior mutability is one hop: the cell is an object whose single accessor
// takes a guard without blocking. A held borrow or lock is an accessor failure.
macro_rules! cell_inspect {
    ($cell:ident, $accessor:literal, $acquire:ident) => {
        impl<T: Inspect + ?Sized> Inspect for $cell<T> {
            fn shape(&self) -> Shape<'_> {
                Shape::Object
            }

            fn properties(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
                Ok(vec![Accessor::method($accessor, move || {
                    self.$acquire()
                        .map(Value::owned)
                        .map_err(AccessorError::from_display)
                })])
            }
        }
    };
}

cell_inspect!(RefCell, "borrow", try_borrow);
cell_inspect!(Mutex, "lock", try_lock);
cell_inspect!(RwLock, "read", try_read);

impl<T: Inspect + Copy> Inspect for Cell<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Object
    }

    fn properties(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
        Ok(vec![Accessor::method("get", move || Ok(Value::owned(self.get())))])
    }
}

// `None` is the absent value; `Some` is transparent.
macro_rules! optional_inspect {
    ($ty:ident, $get:ident) => {
        impl<T: Inspect> Inspect for $ty<T> {
            fn type_name(&self) -> &'static str {
                match self.$get() {
                    Some(value) => value.type_name(),
                    None => std::any::type_name::<Self>(),
                }
            }

            fn identity(&self) -> Identity {
                match self.$get() {
                    Some(value) => value.identity(),
                    None => Identity::new((self as *const Self).cast::<()>(), std::any::type_name::<Self>()),
                }
            }

            fn shape(&self) -> Shape<'_> {
                match self.$get() {
                    Some(value) => value.shape(),
                    None => Shape::Null,
                }
            }

            fn properties(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
                match self.$get() {
                    Some(value) => value.properties(),
                    None => Ok(Vec::new()),
                }
            }

            fn methods(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
                match self.$get() {
                    Some(value) => value.methods(),
                    None => Ok(Vec::new()),
                }
            }
        }
    };
}

optional_inspect!(Option, as_ref);
optional_inspect!(OnceCell, get);

macro_rules! text_inspect {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Literal::Text(self.to_string()))
                }
            }
        )*
    };
}

text_inspect!(String, str, Cow<'_, str>, Uuid);

macro_rules! integer_inspect {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Literal::number(self))
                }
            }
        )*
    };
}

integer_inspect!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_inspect {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn shape(&self) -> Shape<'_> {
                    // `Debug` keeps the fractional part (`1.0`, not `1`).
                    Shape::Scalar(Literal::Number(format!("{self:?}")))
                }
            }
        )*
    };
}

float_inspect!(f32, f64);

impl Inspect for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Literal::Bool(*self))
    }
}

impl Inspect for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Literal::Char(*self))
    }
}

macro_rules! naive_temporal_inspect {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Literal::Temporal(self.to_string()))
                }
            }
        )*
    };
}

naive_temporal_inspect!(NaiveDate, NaiveTime, NaiveDateTime);

impl<Tz> Inspect for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Literal::Temporal(self.to_rfc3339()))
    }
}

macro_rules! ignored_inspect {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Ignored
                }
            }
        )*
    };
}

ignored_inspect!((), TypeId);

impl<T: ?Sized> Inspect for PhantomData<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Ignored
    }
}

impl<T: Inspect> Inspect for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::List(self.iter().map(Value::borrowed).collect())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::List(self.iter().map(Value::borrowed).collect())
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::List(self.iter().map(Value::borrowed).collect())
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::List(self.iter().map(Value::borrowed).collect())
    }
}

impl<T, S> Inspect for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set
    }
}

impl<T> Inspect for BTreeSet<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set
    }
}

fn keyed_accessor<'a, K, V>((key, value): (&'a K, &'a V)) -> Accessor<'a>
where
    K: Display + Debug,
    V: Inspect,
{
    Accessor::new(key.to_string(), format!("get({key:?})"), move || Ok(Value::borrowed(value)))
}

impl<K, V> Inspect for BTreeMap<K, V>
where
    K: Display + Debug,
    V: Inspect,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Object
    }

    fn properties(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
        Ok(self.iter().map(keyed_accessor).collect())
    }
}

// Walked in key order so repeated runs render identically.
impl<K, V, S> Inspect for HashMap<K, V, S>
where
    K: Ord + Display + Debug,
    V: Inspect,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Object
    }

    fn properties(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(key, _)| *key);
        Ok(entries.into_iter().map(keyed_accessor).collect())
    }
}

/// JSON documents, e.g. a captured GraphQL response.
impl Inspect for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        use serde_json::Value as Json;

        match self {
            Json::Null => Shape::Null,
            Json::Bool(value) => Shape::Scalar(Literal::Bool(*value)),
            Json::Number(number) => Shape::Scalar(Literal::number(number)),
            Json::String(text) => Shape::Scalar(Literal::Text(text.clone())),
            Json::Array(items) => Shape::List(items.iter().map(Value::borrowed).collect()),
            Json::Object(_) => Shape::Object,
        }
    }

    fn properties(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
        let Some(object) = self.as_object() else {
            return Ok(Vec::new());
        };
        Ok(object
            .iter()
            .map(|(key, value)| {
                Accessor::new(key.clone(), format!("get({key:?})"), move || Ok(Value::borrowed(value)))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scalar(value: &dyn Inspect) -> Literal {
        match value.shape() {
            Shape::Scalar(literal) => literal,
            other => panic!("expected scalar, got {}", other.kind()),
        }
    }

    #[test]
    fn scalars_map_to_literals() {
        assert_eq!(scalar(&"A100".to_string()), Literal::Text("A100".into()));
        assert_eq!(scalar(&1i64), Literal::Number("1".into()));
        assert_eq!(scalar(&1.5f64), Literal::Number("1.5".into()));
        assert_eq!(scalar(&2.0f32), Literal::Number("2.0".into()));
        assert_eq!(scalar(&true), Literal::Bool(true));
        let date = NaiveDate::from_ymd_opt(2020, 1, 31).expect("valid date");
        assert_eq!(scalar(&date), Literal::Temporal("2020-01-31".into()));
    }

    #[test]
    fn wrappers_are_transparent() {
        let boxed: Box<u8> = Box::new(9);
        let shared = Rc::new(boxed);
        assert_eq!(shared.identity(), (**shared).identity());
        assert_eq!(shared.type_name(), "u8");
        assert!(matches!(Some(3u8).shape(), Shape::Scalar(_)));
        assert!(matches!(None::<u8>.shape(), Shape::Null));
    }

    #[test]
    fn once_cell_behaves_like_option() {
        let cell: OnceCell<String> = OnceCell::new();
        assert!(matches!(cell.shape(), Shape::Null));
        cell.set("ready".to_string()).expect("cell empty");
        assert_eq!(scalar(&cell), Literal::Text("ready".into()));
    }

    #[test]
    fn unordered_collections_are_sets() {
        let set: HashSet<u8> = [1, 2].into_iter().collect();
        assert!(matches!(set.shape(), Shape::Set));
        assert!(matches!(BTreeSet::<u8>::new().shape(), Shape::Set));
    }

    #[test]
    fn hash_map_accessors_follow_key_order() {
        let map: HashMap<u16, &str> = [(30, "c"), (1, "a"), (200, "b"), (7, "d")].into_iter().collect();
        assert!(matches!(map.shape(), Shape::Object));
        let segments: Vec<_> = map
            .properties()
            .expect("maps always introspect")
            .iter()
            .map(|a| a.segment().to_string())
            .collect();
        assert_eq!(segments, vec!["get(1)", "get(7)", "get(30)", "get(200)"]);
    }

    #[test]
    fn cells_expose_a_single_guarded_accessor() {
        let cell = RefCell::new(5u8);
        let accessors = cell.properties().expect("cells always introspect");
        assert_eq!(accessors.len(), 1);
        assert_eq!(accessors[0].segment(), "borrow()");

        let lock = Mutex::new("on".to_string());
        let mut accessors = lock.properties().expect("cells always introspect");
        let value = accessors.remove(0).invoke().expect("lock is free");
        assert_eq!(scalar(&*value), Literal::Text("on".into()));

        let copy = Cell::new(true);
        let mut accessors = copy.properties().expect("cells always introspect");
        assert_eq!(accessors[0].segment(), "get()");
        let value = accessors.remove(0).invoke().expect("cell reads never fail");
        assert_eq!(scalar(&*value), Literal::Bool(true));
    }

    #[test]
    fn held_borrows_and_locks_become_accessor_errors() {
        let cell = RefCell::new(1u8);
        let guard = cell.borrow_mut();
        let err = cell.properties().expect("cells always introspect").remove(0).invoke().expect_err("borrowed");
        assert!(err.description.contains("already mutably borrowed"), "unexpected description {}", err.description);
        drop(guard);

        let lock = RwLock::new(1u8);
        let guard = lock.write().expect("fresh lock");
        let err = lock.properties().expect("cells always introspect").remove(0).invoke().expect_err("locked");
        assert!(err.description.contains("would block"), "unexpected description {}", err.description);
        drop(guard);
    }

    #[test]
    fn guards_forward_identity_to_the_guarded_value() {
        let cell = RefCell::new(String::from("x"));
        let guard = cell.borrow();
        assert_eq!(guard.identity(), (*guard).identity());
        assert_eq!(guard.type_name(), std::any::type_name::<String>());
    }

    #[test]
    fn btree_map_exposes_keyed_accessors() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), 2u8);
        map.insert("a".to_string(), 1u8);
        let accessors = map.properties().expect("maps always introspect");
        let segments: Vec<_> = accessors.iter().map(|a| a.segment().to_string()).collect();
        assert_eq!(segments, vec![r#"get("a")"#, r#"get("b")"#]);
    }

    #[test]
    fn json_documents_map_to_shapes() {
        let doc = json!({ "data": { "order": null }, "ok": true, "tags": ["x"] });
        assert!(matches!(doc.shape(), Shape::Object));
        assert!(matches!(doc["data"]["order"].shape(), Shape::Null));
        assert!(matches!(doc["tags"].shape(), Shape::List(ref items) if items.len() == 1));
        let names: Vec<_> = doc
            .properties()
            .expect("json objects always introspect")
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, vec!["data", "ok", "tags"]);
    }

    #[test]
    fn marker_types_are_ignored() {
        assert!(matches!(().shape(), Shape::Ignored));
        assert!(matches!(PhantomData::<String>.shape(), Shape::Ignored));
        assert!(matches!(TypeId::of::<u8>().shape(), Shape::Ignored));
    }
}
