use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rusoto_core::Region;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_REGION: &str = "ap-south-1";
pub const DEFAULT_TEMPLATE: &str = "template.json";
pub const DEFAULT_SERIAL_NUMBER: &str = "0x12345";
pub const DEFAULT_THING_TYPE: &str = "testthing";
pub const DEFAULT_THING_NAME: &str = "iot-dev-1";
pub const DEFAULT_CA_CERT: &str = "rootCA.pem";
pub const DEFAULT_VERIFICATION_CERT: &str = "verificationCert.pem";
pub const DEFAULT_DEVICE_CERT: &str = "devCert.pem";

/// A partial set of settings, as found in a config file or on the command line.
///
/// Layers are combined with [`Settings::merge`] and turned into a [`Config`]
/// with [`Config::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub template_path: Option<PathBuf>,
    pub serial_number: Option<String>,
    pub thing_type: Option<String>,
    pub thing_name: Option<String>,
    pub ca_cert: Option<PathBuf>,
    pub verification_cert: Option<PathBuf>,
    pub device_cert: Option<PathBuf>,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigFile {
            path: path.to_owned(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Values set in `overrides` win over the values in `self`.
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            region: overrides.region.or(self.region),
            endpoint: overrides.endpoint.or(self.endpoint),
            access_key_id: overrides.access_key_id.or(self.access_key_id),
            secret_access_key: overrides.secret_access_key.or(self.secret_access_key),
            session_token: overrides.session_token.or(self.session_token),
            template_path: overrides.template_path.or(self.template_path),
            serial_number: overrides.serial_number.or(self.serial_number),
            thing_type: overrides.thing_type.or(self.thing_type),
            thing_name: overrides.thing_name.or(self.thing_name),
            ca_cert: overrides.ca_cert.or(self.ca_cert),
            verification_cert: overrides.verification_cert.or(self.verification_cert),
            device_cert: overrides.device_cert.or(self.device_cert),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

// Keep secrets out of debug logs.
impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub region: Region,
    pub credentials: StaticCredentials,
    pub template_path: PathBuf,
    pub serial_number: String,
    pub thing_type: String,
    pub thing_name: String,
    pub ca_cert: PathBuf,
    pub verification_cert: PathBuf,
    pub device_cert: PathBuf,
}

impl Config {
    /// Fills in defaults and checks that credentials were supplied.
    pub fn resolve(settings: Settings) -> Result<Self, Error> {
        let region_name = settings
            .region
            .unwrap_or_else(|| DEFAULT_REGION.to_owned());
        let region = match settings.endpoint {
            Some(endpoint) => Region::Custom {
                name: region_name,
                endpoint,
            },
            None => Region::from_str(&region_name).map_err(|_| Error::Region(region_name))?,
        };

        let access_key_id = settings
            .access_key_id
            .ok_or_else(|| Error::Config("no access key id supplied".into()))?;
        let secret_access_key = settings
            .secret_access_key
            .ok_or_else(|| Error::Config("no secret access key supplied".into()))?;

        Ok(Config {
            region,
            credentials: StaticCredentials {
                access_key_id,
                secret_access_key,
                session_token: settings.session_token,
            },
            template_path: settings
                .template_path
                .unwrap_or_else(|| DEFAULT_TEMPLATE.into()),
            serial_number: settings
                .serial_number
                .unwrap_or_else(|| DEFAULT_SERIAL_NUMBER.into()),
            thing_type: settings
                .thing_type
                .unwrap_or_else(|| DEFAULT_THING_TYPE.into()),
            thing_name: settings
                .thing_name
                .unwrap_or_else(|| DEFAULT_THING_NAME.into()),
            ca_cert: settings.ca_cert.unwrap_or_else(|| DEFAULT_CA_CERT.into()),
            verification_cert: settings
                .verification_cert
                .unwrap_or_else(|| DEFAULT_VERIFICATION_CERT.into()),
            device_cert: settings
                .device_cert
                .unwrap_or_else(|| DEFAULT_DEVICE_CERT.into()),
        })
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config::resolve(Settings {
        access_key_id: Some("AKIDEXAMPLE".into()),
        secret_access_key: Some("secret".into()),
        ..Default::default()
    })
    .expect("test settings resolve")
}
