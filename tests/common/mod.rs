//! Models shared by the integration tests

#![allow(dead_code)]

use typecol::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model)]
#[model(name = "UserMeta", check = "UserMeta::validate")]
pub struct UserMeta {
    pub flags: Vec<Flag>,
    pub login_count: u32,
}

impl UserMeta {
    pub fn new(login_count: u32, flags: &[(&str, bool)]) -> Self {
        Self {
            flags: flags
                .iter()
                .map(|(name, enabled)| Flag {
                    name: name.to_string(),
                    enabled: *enabled,
                })
                .collect(),
            login_count,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.flags.iter().any(|flag| flag.name.is_empty()) {
            return Err("flag names cannot be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub name: String,
    pub level: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub permissions: Vec<Permission>,
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub unit: String,
}

pub fn user_settings() -> UserSettings {
    UserSettings {
        permissions: vec![
            Permission {
                name: "read".to_string(),
                level: 1,
            },
            Permission {
                name: "write".to_string(),
                level: 2,
            },
        ],
        theme: "dark".to_string(),
    }
}
