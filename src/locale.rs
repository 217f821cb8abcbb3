//! Supported display/response languages and storage vendors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// UI and response language. [`Locale::English`] is the default for
/// anything unrecognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    German,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::German];

    /// Language name used inside the system instruction.
    pub fn response_language(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::German => "German",
        }
    }

    /// Label shown in the language selector.
    pub fn label(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::German => "German / Deutsch",
        }
    }

    /// Parse a language name, falling back to the default with a warning.
    pub fn resolve(name: &str) -> Locale {
        name.parse().unwrap_or_else(|_| {
            warn!(language = name, "unsupported language, defaulting to English");
            Locale::default()
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "de" | "german" | "deutsch" | "german / deutsch" => Ok(Locale::German),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Storage platforms the prompts are written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    NetAppOntap,
    PureFlashArray,
    DellEmcPowerMax,
}

impl Vendor {
    pub const ALL: [Vendor; 3] = [
        Vendor::NetAppOntap,
        Vendor::PureFlashArray,
        Vendor::DellEmcPowerMax,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Vendor::NetAppOntap => "NetApp ONTAP",
            Vendor::PureFlashArray => "Pure FlashArray",
            Vendor::DellEmcPowerMax => "Dell EMC PowerMax",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Vendor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if let Some(vendor) = Vendor::ALL
            .into_iter()
            .find(|v| v.name().to_lowercase() == needle)
        {
            return Ok(vendor);
        }
        match needle.as_str() {
            "netapp" | "ontap" => Ok(Vendor::NetAppOntap),
            "pure" | "flasharray" => Ok(Vendor::PureFlashArray),
            "dell" | "emc" | "powermax" => Ok(Vendor::DellEmcPowerMax),
            _ => Err(format!(
                "unknown vendor '{}' (expected one of: {})",
                s.trim(),
                Vendor::ALL.map(Vendor::name).join(", ")
            )),
        }
    }
}
