//! Core type definitions for the model.

use serde::{Deserialize, Serialize};

/// JDBC type codes (`java.sql.Types`) as reported by schema readers.
pub mod jdbc {
    pub const BIT: i32 = -7;
    pub const TINYINT: i32 = -6;
    pub const SMALLINT: i32 = 5;
    pub const INTEGER: i32 = 4;
    pub const BIGINT: i32 = -5;
    pub const FLOAT: i32 = 6;
    pub const REAL: i32 = 7;
    pub const DOUBLE: i32 = 8;
    pub const NUMERIC: i32 = 2;
    pub const DECIMAL: i32 = 3;
    pub const CHAR: i32 = 1;
    pub const VARCHAR: i32 = 12;
    pub const LONGVARCHAR: i32 = -1;
    pub const NCHAR: i32 = -15;
    pub const NVARCHAR: i32 = -9;
    pub const LONGNVARCHAR: i32 = -16;
    pub const DATE: i32 = 91;
    pub const TIME: i32 = 92;
    pub const TIMESTAMP: i32 = 93;
    pub const TIME_WITH_TIMEZONE: i32 = 2013;
    pub const TIMESTAMP_WITH_TIMEZONE: i32 = 2014;
    pub const BINARY: i32 = -2;
    pub const VARBINARY: i32 = -3;
    pub const LONGVARBINARY: i32 = -4;
    pub const BLOB: i32 = 2004;
    pub const CLOB: i32 = 2005;
    pub const NCLOB: i32 = 2011;
    pub const BOOLEAN: i32 = 16;

    /// Check if the code denotes a character type.
    pub fn is_text(code: i32) -> bool {
        matches!(
            code,
            CHAR | VARCHAR | LONGVARCHAR | NCHAR | NVARCHAR | LONGNVARCHAR | CLOB | NCLOB
        )
    }

    /// Check if the code denotes a "long text" type (stored out of row).
    pub fn is_long_text(code: i32) -> bool {
        matches!(code, LONGVARCHAR | CLOB | BLOB)
    }
}

/// Temporal flavour of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateType {
    /// Date without time.
    DateOnly,
    /// Time without date.
    TimeOnly,
    /// Date and time.
    DateAndTime,
    /// Not a temporal attribute.
    #[default]
    Undefined,
}

impl DateType {
    /// Derive the date type from a JDBC type code.
    pub fn from_jdbc_code(code: i32) -> Self {
        match code {
            jdbc::DATE => DateType::DateOnly,
            jdbc::TIME | jdbc::TIME_WITH_TIMEZONE => DateType::TimeOnly,
            jdbc::TIMESTAMP | jdbc::TIMESTAMP_WITH_TIMEZONE => DateType::DateAndTime,
            _ => DateType::Undefined,
        }
    }
}

/// Referential action of a foreign key (`ON UPDATE` / `ON DELETE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// Propagate the change.
    Cascade,
    /// Reject the change.
    Restrict,
    /// Set referencing columns to null.
    SetNull,
    /// Reject the change at the end of the statement.
    #[default]
    NoAction,
    /// Set referencing columns to their default.
    SetDefault,
}

impl ReferentialAction {
    /// Decode a JDBC `importedKey*` rule code. Unknown codes map to `NoAction`.
    pub fn from_jdbc_code(code: i32) -> Self {
        match code {
            0 => ReferentialAction::Cascade,
            1 => ReferentialAction::Restrict,
            2 => ReferentialAction::SetNull,
            4 => ReferentialAction::SetDefault,
            _ => ReferentialAction::NoAction,
        }
    }

    /// The JDBC `importedKey*` rule code.
    pub fn jdbc_code(&self) -> i32 {
        match self {
            ReferentialAction::Cascade => 0,
            ReferentialAction::Restrict => 1,
            ReferentialAction::SetNull => 2,
            ReferentialAction::NoAction => 3,
            ReferentialAction::SetDefault => 4,
        }
    }
}

/// Constraint checking time of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Deferrability {
    /// Checked at commit.
    InitiallyDeferred,
    /// Checked per statement, may be deferred.
    InitiallyImmediate,
    /// Always checked per statement.
    #[default]
    NotDeferrable,
}

impl Deferrability {
    /// Decode a JDBC `importedKey*` deferrability code.
    pub fn from_jdbc_code(code: i32) -> Self {
        match code {
            5 => Deferrability::InitiallyDeferred,
            6 => Deferrability::InitiallyImmediate,
            _ => Deferrability::NotDeferrable,
        }
    }

    /// The JDBC `importedKey*` deferrability code.
    pub fn jdbc_code(&self) -> i32 {
        match self {
            Deferrability::InitiallyDeferred => 5,
            Deferrability::InitiallyImmediate => 6,
            Deferrability::NotDeferrable => 7,
        }
    }
}
