//! Entity rows and their public projections.

use crate::schema::EntityKind;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};

/// Public field-to-value view of one entity.
pub type Projection = Map<String, Value>;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub creation_date: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub creation_date: NaiveDateTime,
    /// Owning account.
    pub user_id: i64,
}

/// Borrowed view of one filterable field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field<'a> {
    Int(i64),
    Text(&'a str),
    Timestamp(NaiveDateTime),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    Account(Account),
    Listing(Listing),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Account(_) => EntityKind::Account,
            Record::Listing(_) => EntityKind::Listing,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Record::Account(a) => a.id,
            Record::Listing(l) => l.id,
        }
    }

    /// Field by schema column name; `None` for names the entity does not have.
    pub fn field(&self, column: &str) -> Option<Field<'_>> {
        match (self, column) {
            (Record::Account(a), "id") => Some(Field::Int(a.id)),
            (Record::Account(a), "name") => Some(Field::Text(&a.name)),
            (Record::Account(a), "email") => Some(Field::Text(&a.email)),
            (Record::Account(a), "creation_date") => Some(Field::Timestamp(a.creation_date)),
            (Record::Listing(l), "id") => Some(Field::Int(l.id)),
            (Record::Listing(l), "title") => Some(Field::Text(&l.title)),
            (Record::Listing(l), "description") => Some(Field::Text(&l.description)),
            (Record::Listing(l), "creation_date") => Some(Field::Timestamp(l.creation_date)),
            (Record::Listing(l), "user_id") => Some(Field::Int(l.user_id)),
            _ => None,
        }
    }

    pub fn project(&self) -> Projection {
        let mut map = Map::new();
        match self {
            Record::Account(a) => {
                map.insert("id".into(), Value::from(a.id));
                map.insert("name".into(), Value::from(a.name.clone()));
                map.insert("email".into(), Value::from(a.email.clone()));
                map.insert("creation_date".into(), timestamp(a.creation_date));
            }
            Record::Listing(l) => {
                map.insert("id".into(), Value::from(l.id));
                map.insert("title".into(), Value::from(l.title.clone()));
                map.insert("description".into(), Value::from(l.description.clone()));
                map.insert("creation_date".into(), timestamp(l.creation_date));
                map.insert("user_id".into(), Value::from(l.user_id));
            }
        }
        map
    }
}

impl From<Account> for Record {
    fn from(a: Account) -> Self {
        Record::Account(a)
    }
}

impl From<Listing> for Record {
    fn from(l: Listing) -> Self {
        Record::Listing(l)
    }
}

fn timestamp(ts: NaiveDateTime) -> Value {
    Value::String(ts.format(TIMESTAMP_FORMAT).to_string())
}
