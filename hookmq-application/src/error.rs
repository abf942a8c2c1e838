use hookmq_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("config: {0}")]
    Config(String),

    #[error("config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
