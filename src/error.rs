/// Application error with a stable process exit code.
///
/// Exit-code tiers:
/// - 2: input/schema problems (unreadable CSV, missing columns, bad CLI values)
/// - 3: data problems (malformed record, unknown country, empty dataset)
/// - 4: output problems (failed export writes)
#[derive(Debug, Clone)]
pub enum AppError {
    /// Input or schema problem.
    Input(String),
    /// A record violated the 16-share contract.
    MalformedRecord { country: String, reason: String },
    /// A country selection referenced a name not present in the table.
    UnknownCountry { name: String },
    /// No usable rows remain after ingest validation.
    NoData(String),
    /// Failed to write an export artifact.
    Export(String),
}

impl AppError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn malformed(country: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            country: country.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_country(name: impl Into<String>) -> Self {
        Self::UnknownCountry { name: name.into() }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData(message.into())
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Input(_) => 2,
            AppError::MalformedRecord { .. } => 3,
            AppError::UnknownCountry { .. } => 3,
            AppError::NoData(_) => 3,
            AppError::Export(_) => 4,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Input(message) => write!(f, "{message}"),
            AppError::MalformedRecord { country, reason } => {
                write!(f, "Malformed record for '{country}': {reason}")
            }
            AppError::UnknownCountry { name } => write!(f, "Unknown country: '{name}'"),
            AppError::NoData(message) => write!(f, "{message}"),
            AppError::Export(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AppError {}
