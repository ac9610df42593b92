pub mod aws_creds;

pub use aws_creds::*;

use async_trait::async_trait;
use rusoto_core::HttpClient;
use rusoto_iot::{
    CreateThingRequest, CreateThingResponse, DeleteThingRequest, DeleteThingResponse,
    DescribeThingRequest, DescribeThingResponse, Iot, IotClient, RegisterCACertificateRequest,
    RegisterCACertificateResponse, RegisterThingRequest, RegisterThingResponse,
    UpdateCACertificateRequest, UpdateCertificateRequest,
};

use crate::config::Config;
use crate::error::Error;

/// The subset of the AWS IoT control plane used for provisioning.
///
/// Operations take this as an explicit dependency so a fake can stand in for
/// the remote service in tests.
#[async_trait]
pub trait IotApi: Send + Sync {
    async fn describe_thing(
        &self,
        input: DescribeThingRequest,
    ) -> Result<DescribeThingResponse, Error>;

    async fn delete_thing(&self, input: DeleteThingRequest) -> Result<DeleteThingResponse, Error>;

    async fn create_thing(&self, input: CreateThingRequest) -> Result<CreateThingResponse, Error>;

    async fn register_thing(
        &self,
        input: RegisterThingRequest,
    ) -> Result<RegisterThingResponse, Error>;

    async fn register_ca_certificate(
        &self,
        input: RegisterCACertificateRequest,
    ) -> Result<RegisterCACertificateResponse, Error>;

    async fn update_ca_certificate(&self, input: UpdateCACertificateRequest) -> Result<(), Error>;

    async fn update_certificate(&self, input: UpdateCertificateRequest) -> Result<(), Error>;
}

#[async_trait]
impl IotApi for IotClient {
    async fn describe_thing(
        &self,
        input: DescribeThingRequest,
    ) -> Result<DescribeThingResponse, Error> {
        Iot::describe_thing(self, input)
            .await
            .map_err(|e| Error::remote("DescribeThing", e))
    }

    async fn delete_thing(&self, input: DeleteThingRequest) -> Result<DeleteThingResponse, Error> {
        Iot::delete_thing(self, input)
            .await
            .map_err(|e| Error::remote("DeleteThing", e))
    }

    async fn create_thing(&self, input: CreateThingRequest) -> Result<CreateThingResponse, Error> {
        Iot::create_thing(self, input)
            .await
            .map_err(|e| Error::remote("CreateThing", e))
    }

    async fn register_thing(
        &self,
        input: RegisterThingRequest,
    ) -> Result<RegisterThingResponse, Error> {
        Iot::register_thing(self, input)
            .await
            .map_err(|e| Error::remote("RegisterThing", e))
    }

    async fn register_ca_certificate(
        &self,
        input: RegisterCACertificateRequest,
    ) -> Result<RegisterCACertificateResponse, Error> {
        Iot::register_ca_certificate(self, input)
            .await
            .map_err(|e| Error::remote("RegisterCACertificate", e))
    }

    async fn update_ca_certificate(&self, input: UpdateCACertificateRequest) -> Result<(), Error> {
        Iot::update_ca_certificate(self, input)
            .await
            .map_err(|e| Error::remote("UpdateCACertificate", e))
    }

    async fn update_certificate(&self, input: UpdateCertificateRequest) -> Result<(), Error> {
        Iot::update_certificate(self, input)
            .await
            .map_err(|e| Error::remote("UpdateCertificate", e))
    }
}

/// Builds a client bound to the configured region and key pair.
///
/// Nothing is sent here, an unreachable endpoint only shows up on the first call.
pub fn new_client(config: &Config) -> Result<IotClient, Error> {
    let dispatcher = HttpClient::new().map_err(|e| Error::HttpClient(e.to_string()))?;

    log::debug!("Creating IoT client for region {:?}", config.region);

    Ok(IotClient::new_with(
        dispatcher,
        CredentialsFromConfig::new(&config.credentials),
        config.region.clone(),
    ))
}
