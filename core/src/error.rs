use thiserror::Error;

pub type SelectResult<T> = Result<T, SelectError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("No branch registered for key {key}")]
    UnknownBranch { key: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("No resource of type {type_name} on the bus")]
    Missing { type_name: &'static str },
}
