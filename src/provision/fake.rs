use std::sync::Mutex;

use async_trait::async_trait;
use rusoto_iot::{
    CreateThingRequest, CreateThingResponse, DeleteThingRequest, DeleteThingResponse,
    DescribeThingRequest, DescribeThingResponse, RegisterCACertificateRequest,
    RegisterCACertificateResponse, RegisterThingRequest, RegisterThingResponse,
    UpdateCACertificateRequest, UpdateCertificateRequest,
};

use crate::aws_iot::IotApi;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    DescribeThing(DescribeThingRequest),
    DeleteThing(DeleteThingRequest),
    CreateThing(CreateThingRequest),
    RegisterThing(RegisterThingRequest),
    RegisterCACertificate(RegisterCACertificateRequest),
    UpdateCACertificate(UpdateCACertificateRequest),
    UpdateCertificate(UpdateCertificateRequest),
}

/// Records every request and answers with canned responses, or fails the
/// named operation.
#[derive(Debug, Default)]
pub struct FakeIot {
    calls: Mutex<Vec<Call>>,
    failing: Option<&'static str>,
}

impl FakeIot {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn failing(operation: &'static str) -> Self {
        FakeIot {
            failing: Some(operation),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), Error> {
        self.calls.lock().unwrap().push(call);
        if self.failing == Some(operation) {
            return Err(Error::remote(operation, "simulated service failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl IotApi for FakeIot {
    async fn describe_thing(
        &self,
        input: DescribeThingRequest,
    ) -> Result<DescribeThingResponse, Error> {
        let thing_name = input.thing_name.clone();
        self.record("DescribeThing", Call::DescribeThing(input))?;
        Ok(DescribeThingResponse {
            thing_name: Some(thing_name),
            version: Some(3),
            ..Default::default()
        })
    }

    async fn delete_thing(&self, input: DeleteThingRequest) -> Result<DeleteThingResponse, Error> {
        self.record("DeleteThing", Call::DeleteThing(input))?;
        Ok(Default::default())
    }

    async fn create_thing(&self, input: CreateThingRequest) -> Result<CreateThingResponse, Error> {
        let thing_name = input.thing_name.clone();
        self.record("CreateThing", Call::CreateThing(input))?;
        Ok(CreateThingResponse {
            thing_arn: Some(format!("arn:aws:iot:ap-south-1:123456789012:thing/{}", thing_name)),
            thing_id: Some("thing-id".into()),
            thing_name: Some(thing_name),
            ..Default::default()
        })
    }

    async fn register_thing(
        &self,
        input: RegisterThingRequest,
    ) -> Result<RegisterThingResponse, Error> {
        self.record("RegisterThing", Call::RegisterThing(input))?;
        Ok(Default::default())
    }

    async fn register_ca_certificate(
        &self,
        input: RegisterCACertificateRequest,
    ) -> Result<RegisterCACertificateResponse, Error> {
        self.record("RegisterCACertificate", Call::RegisterCACertificate(input))?;
        Ok(RegisterCACertificateResponse {
            certificate_arn: Some("arn:aws:iot:ap-south-1:123456789012:cacert/abc".into()),
            certificate_id: Some("abc".into()),
            ..Default::default()
        })
    }

    async fn update_ca_certificate(&self, input: UpdateCACertificateRequest) -> Result<(), Error> {
        self.record("UpdateCACertificate", Call::UpdateCACertificate(input))
    }

    async fn update_certificate(&self, input: UpdateCertificateRequest) -> Result<(), Error> {
        self.record("UpdateCertificate", Call::UpdateCertificate(input))
    }
}
