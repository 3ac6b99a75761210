//! Analytics records: free-form JSON documents grouped by kind

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::ValidationError;

/// Keys assigned by the server; client values for them are discarded.
const RESERVED_KEYS: [&str; 2] = ["id", "createdAt"];

/// Attribute used to correlate records of one visitor
pub const VISITOR_KEY: &str = "visitor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Views,
    Actions,
    Goals,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Views, RecordKind::Actions, RecordKind::Goals];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Actions => "actions",
            Self::Goals => "goals",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "views" => Ok(Self::Views),
            "actions" => Ok(Self::Actions),
            "goals" => Ok(Self::Goals),
            _ => Err(ValidationError::InvalidFormat {
                field: "kind",
                reason: "must be one of views, actions, goals",
            }),
        }
    }
}

/// Stored analytics document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRecord {
    pub id: Uuid,
    #[serde(skip)]
    pub kind: RecordKind,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl AnalyticsRecord {
    pub fn visitor(&self) -> Option<&Value> {
        self.fields.get(VISITOR_KEY).filter(|v| !v.is_null())
    }
}

/// Client document accepted for storage
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub kind: RecordKind,
    pub fields: Map<String, Value>,
}

impl NewRecord {
    pub fn new(kind: RecordKind, body: Value) -> Result<Self, ValidationError> {
        let Value::Object(mut fields) = body else {
            return Err(ValidationError::InvalidFormat {
                field: "body",
                reason: "must be a JSON object",
            });
        };
        for key in RESERVED_KEYS {
            fields.remove(key);
        }
        Ok(Self { kind, fields })
    }

    pub fn visitor(&self) -> Option<&Value> {
        self.fields.get(VISITOR_KEY).filter(|v| !v.is_null())
    }
}

/// A goal with every view and action of the same visitor
#[derive(Debug, Clone, Serialize)]
pub struct GoalDetails {
    pub goal: AnalyticsRecord,
    pub visitor: Option<Value>,
    pub views: Vec<AnalyticsRecord>,
    pub actions: Vec<AnalyticsRecord>,
}
