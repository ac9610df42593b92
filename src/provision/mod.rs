pub mod builders;
pub mod status;

#[cfg(test)]
pub(crate) mod fake;

use std::path::Path;

use rusoto_iot::{
    CreateThingResponse, DescribeThingResponse, RegisterCACertificateResponse,
    RegisterThingResponse,
};

use crate::aws_iot::IotApi;
use crate::config::Config;
use crate::error::Error;
use status::CertificateStatus;

fn read_certificate(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_owned(),
        source,
    })
}

fn read_template(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::Template {
        path: path.to_owned(),
        source,
    })
}

/// Fetches an existing thing and prints its version and name.
pub async fn describe_thing<C: IotApi + ?Sized>(
    client: &C,
    name: &str,
) -> Result<DescribeThingResponse, Error> {
    let resp = client
        .describe_thing(builders::describe_thing_request(name))
        .await?;

    println!("Thing Ver: {}", display_opt(&resp.version));
    println!("Thing Name: {}", display_opt(&resp.thing_name));

    Ok(resp)
}

/// Deletes a thing, provided it is still at `expected_version`.
pub async fn delete_thing<C: IotApi + ?Sized>(
    client: &C,
    expected_version: i64,
    name: &str,
) -> Result<(), Error> {
    client
        .delete_thing(builders::delete_thing_request(expected_version, name))
        .await?;

    println!("Thing {} deleted (version {})", name, expected_version);

    Ok(())
}

/// Creates a bare thing carrying the configured thing type as an attribute.
pub async fn create_thing<C: IotApi + ?Sized>(
    client: &C,
    config: &Config,
    name: &str,
) -> Result<CreateThingResponse, Error> {
    let resp = client
        .create_thing(builders::create_thing_request(name, &config.thing_type))
        .await?;

    println!("Thing ARN: {}", display_opt(&resp.thing_arn));
    println!("Thing ID: {}", display_opt(&resp.thing_id));

    Ok(resp)
}

/// Registers a CA certificate, which can then be used to sign device certificates.
///
/// Unreadable files abort before anything is sent. A request that fails the
/// local check is still submitted and left for the service to judge.
pub async fn register_ca_certificate<C: IotApi + ?Sized>(
    client: &C,
    ca_cert_path: &Path,
    verification_cert_path: &Path,
) -> Result<RegisterCACertificateResponse, Error> {
    let ca_cert = read_certificate(ca_cert_path)?;
    let verification_cert = read_certificate(verification_cert_path)?;

    let request = builders::register_ca_certificate_request(ca_cert, verification_cert);
    if let Err(err) = builders::validate_register_ca_request(&request) {
        log::warn!("Error in registering CA cert: {}", err);
    }

    let resp = client.register_ca_certificate(request).await?;

    println!("Cert ARN: {}", display_opt(&resp.certificate_arn));
    println!("Cert ID: {}", display_opt(&resp.certificate_id));

    Ok(resp)
}

pub async fn deregister_ca_certificate<C: IotApi + ?Sized>(
    client: &C,
    cert_id: &str,
) -> Result<(), Error> {
    client
        .update_ca_certificate(builders::update_ca_certificate_request(cert_id))
        .await?;

    println!("CA cert deactivated");

    Ok(())
}

/// Registers a device and its certificate through the provisioning template.
pub async fn register_thing<C: IotApi + ?Sized>(
    client: &C,
    config: &Config,
    name: &str,
    ca_cert_path: &Path,
    dev_cert_path: &Path,
) -> Result<RegisterThingResponse, Error> {
    let ca_cert = read_certificate(ca_cert_path)?;
    let dev_cert = read_certificate(dev_cert_path)?;
    let template_body = read_template(&config.template_path)?;

    let parameters =
        builders::provisioning_parameters(name, &config.serial_number, ca_cert, dev_cert);
    log::info!(
        "Registering thing {} with template {}",
        name,
        config.template_path.display()
    );

    let resp = client
        .register_thing(builders::register_thing_request(template_body, parameters))
        .await?;

    println!("Thing registered: {:?}", resp);

    Ok(resp)
}

pub async fn deregister_device_certificate<C: IotApi + ?Sized>(
    client: &C,
    cert_id: &str,
) -> Result<(), Error> {
    client
        .update_certificate(builders::update_certificate_request(
            cert_id,
            CertificateStatus::Inactive,
        ))
        .await?;

    println!("Device cert deactivated");

    Ok(())
}

/// Registers the CA, provisions the configured thing and reads it back.
///
/// An unreadable CA certificate only skips the CA step; every other error
/// ends the sequence.
pub async fn run_default_sequence<C: IotApi + ?Sized>(
    client: &C,
    config: &Config,
) -> Result<(), Error> {
    match register_ca_certificate(client, &config.ca_cert, &config.verification_cert).await {
        Ok(_) => {}
        Err(err @ Error::ReadFile { .. }) => {
            log::error!("{}, skipping CA registration", err);
        }
        Err(err) => return Err(err),
    }

    register_thing(
        client,
        config,
        &config.thing_name,
        &config.ca_cert,
        &config.device_cert,
    )
    .await?;

    describe_thing(client, &config.thing_name).await?;

    Ok(())
}

fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<none>".into(),
    }
}
