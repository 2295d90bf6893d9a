/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (field `database_url` reads
/// `DATABASE_URL`) and call `Config::from_env()` at startup. Use
/// `#[serde(default = "...")]` for optional variables.
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// # Panics
    ///
    /// Panics if a required env var is missing or cannot be deserialized.
    fn from_env() -> Self {
        Self::try_from_env().expect("failed to load config from environment")
    }

    fn try_from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit set of variables instead of the process environment.
    fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
