//! HTTP Method enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// HTTP methods a request template can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
}

/// Colour category used when listing requests by method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodColor {
    /// GET
    Green,
    /// POST
    Orange,
    /// PUT
    Blue,
    /// DELETE
    Red,
    /// PATCH
    Purple,
}

impl HttpMethod {
    /// Returns all available HTTP methods in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Get, Self::Post, Self::Put, Self::Delete, Self::Patch]
    }

    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Returns the display colour for this method.
    #[must_use]
    pub const fn color(self) -> MethodColor {
        match self {
            Self::Get => MethodColor::Green,
            Self::Post => MethodColor::Orange,
            Self::Put => MethodColor::Blue,
            Self::Delete => MethodColor::Red,
            Self::Patch => MethodColor::Purple,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            _ => Err(DomainError::UnsupportedMethod(s.to_string())),
        }
    }
}
