pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Gateway unavailable: {message}")]
	GatewayUnavailable { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
impl From<nomina_providers::Error> for Error {
	fn from(err: nomina_providers::Error) -> Self {
		match err {
			nomina_providers::Error::InvalidConfig { message } => Self::InvalidRequest { message },
			other => Self::GatewayUnavailable { message: other.to_string() },
		}
	}
}
