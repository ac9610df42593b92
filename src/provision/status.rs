use std::fmt;

/// Status values we set on a registered CA certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaCertificateStatus {
    Inactive,
}

impl CaCertificateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaCertificateStatus::Inactive => "INACTIVE",
        }
    }
}

/// Whether devices signed by a CA are registered on first connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoRegistrationStatus {
    Disable,
}

impl AutoRegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoRegistrationStatus::Disable => "DISABLE",
        }
    }
}

/// Status values we set on a device certificate.
///
/// Distinct from [`CaCertificateStatus`]; the two only happen to share some
/// wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateStatus {
    Inactive,
}

impl CertificateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
