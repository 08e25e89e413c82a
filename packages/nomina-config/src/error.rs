use std::{io, path::PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read related-people config {}: {source}", .path.display())]
	ReadConfig {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("Related-people config {} is not valid TOML: {source}", .path.display())]
	ParseConfig {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
	#[error("Invalid related-people config: {message}")]
	Validation { message: String },
}
