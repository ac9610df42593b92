use std::collections::HashMap;

use rusoto_iot::{
    AttributePayload, CreateThingRequest, DeleteThingRequest, DescribeThingRequest,
    RegisterCACertificateRequest, RegisterThingRequest, UpdateCACertificateRequest,
    UpdateCertificateRequest,
};

use super::status::{AutoRegistrationStatus, CaCertificateStatus, CertificateStatus};
use crate::error::Error;

pub const PARAM_THING_NAME: &str = "ThingName";
pub const PARAM_SERIAL_NUMBER: &str = "SerialNumber";
pub const PARAM_CA_CERTIFICATE_PEM: &str = "CACertificatePem";
pub const PARAM_CERTIFICATE_PEM: &str = "CertificatePem";

/// Upper bound the service puts on a PEM body.
pub const MAX_CERTIFICATE_LEN: usize = 65536;

/// Attributes attached to every thing we create. Only the thing type for now.
pub fn attribute_payload(thing_type: &str) -> AttributePayload {
    let mut attributes = HashMap::new();
    attributes.insert("Type".to_owned(), thing_type.to_owned());

    AttributePayload {
        attributes: Some(attributes),
        ..Default::default()
    }
}

pub fn register_ca_certificate_request(
    ca_certificate: String,
    verification_certificate: String,
) -> RegisterCACertificateRequest {
    RegisterCACertificateRequest {
        allow_auto_registration: Some(true),
        ca_certificate,
        set_as_active: Some(true),
        verification_certificate,
        ..Default::default()
    }
}

/// Same length constraints the SDK checks before a request leaves the machine.
pub fn validate_register_ca_request(input: &RegisterCACertificateRequest) -> Result<(), Error> {
    check_pem_field("caCertificate", &input.ca_certificate)?;
    check_pem_field("verificationCertificate", &input.verification_certificate)
}

fn check_pem_field(field: &str, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::InvalidRequest(format!("{} must not be empty", field)));
    }
    if value.chars().count() > MAX_CERTIFICATE_LEN {
        return Err(Error::InvalidRequest(format!(
            "{} is longer than {} characters",
            field, MAX_CERTIFICATE_LEN
        )));
    }
    Ok(())
}

pub fn update_ca_certificate_request(certificate_id: &str) -> UpdateCACertificateRequest {
    UpdateCACertificateRequest {
        certificate_id: certificate_id.to_owned(),
        new_auto_registration_status: Some(AutoRegistrationStatus::Disable.as_str().to_owned()),
        new_status: Some(CaCertificateStatus::Inactive.as_str().to_owned()),
        remove_auto_registration: Some(true),
        ..Default::default()
    }
}

pub fn update_certificate_request(
    certificate_id: &str,
    status: CertificateStatus,
) -> UpdateCertificateRequest {
    UpdateCertificateRequest {
        certificate_id: certificate_id.to_owned(),
        new_status: status.as_str().to_owned(),
    }
}

/// The four template parameters, keyed the way the provisioning template expects.
pub fn provisioning_parameters(
    thing_name: &str,
    serial_number: &str,
    ca_certificate_pem: String,
    certificate_pem: String,
) -> HashMap<String, String> {
    let mut params = HashMap::with_capacity(4);
    params.insert(PARAM_THING_NAME.to_owned(), thing_name.to_owned());
    params.insert(PARAM_SERIAL_NUMBER.to_owned(), serial_number.to_owned());
    params.insert(PARAM_CA_CERTIFICATE_PEM.to_owned(), ca_certificate_pem);
    params.insert(PARAM_CERTIFICATE_PEM.to_owned(), certificate_pem);
    params
}

pub fn register_thing_request(
    template_body: String,
    parameters: HashMap<String, String>,
) -> RegisterThingRequest {
    RegisterThingRequest {
        parameters: Some(parameters),
        template_body,
    }
}

pub fn describe_thing_request(thing_name: &str) -> DescribeThingRequest {
    DescribeThingRequest {
        thing_name: thing_name.to_owned(),
    }
}

pub fn delete_thing_request(expected_version: i64, thing_name: &str) -> DeleteThingRequest {
    DeleteThingRequest {
        expected_version: Some(expected_version),
        thing_name: thing_name.to_owned(),
    }
}

pub fn create_thing_request(thing_name: &str, thing_type: &str) -> CreateThingRequest {
    CreateThingRequest {
        attribute_payload: Some(attribute_payload(thing_type)),
        thing_name: thing_name.to_owned(),
        ..Default::default()
    }
}
